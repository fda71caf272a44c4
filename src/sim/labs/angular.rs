//! `angular-velocity`: rate at which the line between two bodies turns

use glam::DVec2;

use super::{integrate_all, pair};
use crate::consts::DISPLAY_SCALE;
use crate::error::LabResult;
use crate::heading_velocity;
use crate::sim::arena::BodyArena;
use crate::sim::body::{Body, Sprite, palette};
use crate::sim::params::SimParams;
use crate::sim::scenario::ScenarioId;
use crate::sim::stats::{self, Stat};

pub fn init(center: DVec2, params: &SimParams) -> BodyArena {
    BodyArena::seeded([
        Body::new(
            "A",
            center + DVec2::new(-100.0, -100.0),
            heading_velocity(params.v1, params.angle1),
            palette::CYAN,
            Sprite::Auto,
        ),
        Body::new(
            "B",
            center + DVec2::new(100.0, 100.0),
            heading_velocity(params.v2, params.angle2),
            palette::MAGENTA,
            Sprite::Auto,
        ),
    ])
}

pub fn step(bodies: &mut BodyArena, dt: f64) -> LabResult<()> {
    integrate_all(bodies, dt);
    Ok(())
}

/// Angular velocity of B about A: the component of relative velocity along the unit
/// perpendicular `(-Δy/r, Δx/r)`, divided by `r`. Zero when the bodies coincide.
pub fn angular_velocity(a: &Body, b: &Body) -> f64 {
    let dp = b.pos - a.pos;
    let dv = b.vel - a.vel;
    let r = dp.length();
    if r < f64::EPSILON {
        return 0.0;
    }
    let perp = DVec2::new(-dp.y / r, dp.x / r);
    dv.dot(perp) / r
}

pub fn stats(bodies: &BodyArena) -> LabResult<Vec<Stat>> {
    let (a, b) = pair(bodies, ScenarioId::AngularVelocity)?;
    Ok(vec![
        Stat::new("Separation", stats::metres(a.pos.distance(b.pos) / DISPLAY_SCALE)),
        Stat::new("Relative Speed", stats::speed((b.vel - a.vel).length())),
        Stat::new(
            "Angular Velocity",
            stats::radians_per_sec(angular_velocity(a, b)),
        ),
    ])
}
