//! `1d`: two bodies on parallel lanes at constant velocity

use glam::DVec2;

use super::{integrate_all, pair};
use crate::consts::DISPLAY_SCALE;
use crate::error::LabResult;
use crate::sim::arena::BodyArena;
use crate::sim::body::{Body, Sprite, palette};
use crate::sim::params::SimParams;
use crate::sim::scenario::ScenarioId;
use crate::sim::stats::{self, Stat};

pub fn init(center: DVec2, params: &SimParams) -> BodyArena {
    BodyArena::seeded([
        Body::new(
            "A",
            center + DVec2::new(-150.0, -60.0),
            DVec2::new(params.v1, 0.0),
            palette::CYAN,
            Sprite::Auto,
        ),
        Body::new(
            "B",
            center + DVec2::new(-50.0, 60.0),
            DVec2::new(params.v2, 0.0),
            palette::MAGENTA,
            Sprite::Auto,
        ),
    ])
}

pub fn step(bodies: &mut BodyArena, dt: f64) -> LabResult<()> {
    integrate_all(bodies, dt);
    Ok(())
}

pub fn stats(bodies: &BodyArena) -> LabResult<Vec<Stat>> {
    let (a, b) = pair(bodies, ScenarioId::OneD)?;
    Ok(vec![
        Stat::new("Relative Velocity", stats::speed(b.vel.x - a.vel.x)),
        Stat::new("Separation", stats::metres(a.pos.distance(b.pos) / DISPLAY_SCALE)),
    ])
}
