//! `flag-flutter`: a walking man's flag streams along the wind he feels

use glam::DVec2;

use crate::error::LabResult;
use crate::sim::arena::BodyArena;
use crate::sim::body::{Body, Sprite, palette};
use crate::sim::params::SimParams;
use crate::sim::scenario::ScenarioId;
use crate::sim::stats::{self, Stat};

pub fn init(center: DVec2, params: &SimParams) -> BodyArena {
    BodyArena::seeded([
        Body::new(
            "Man",
            center + DVec2::new(0.0, 100.0),
            DVec2::new(params.v1, 0.0),
            palette::WHITE,
            Sprite::FlagMan,
        ),
        Body::new(
            "Wind",
            center + DVec2::new(0.0, -200.0),
            wind_velocity(params),
            palette::CYAN,
            Sprite::Ball,
        ),
    ])
}

/// Wind vector in flag space (angle measured toward +y)
pub fn wind_velocity(params: &SimParams) -> DVec2 {
    let rad = params.angle2.to_radians();
    DVec2::new(params.v2 * rad.cos(), params.v2 * rad.sin())
}

/// Wind felt by the man; he only moves horizontally
pub fn relative_wind(params: &SimParams) -> DVec2 {
    wind_velocity(params) - DVec2::new(params.v1, 0.0)
}

/// Direction the flag points (degrees, `atan2` of the relative wind)
pub fn flag_angle(params: &SimParams) -> f64 {
    let rel = relative_wind(params);
    rel.y.atan2(rel.x).to_degrees()
}

pub fn step(bodies: &mut BodyArena, dt: f64, params: &SimParams) -> LabResult<()> {
    if let Some(wind) = bodies.get_mut(1) {
        wind.vel = wind_velocity(params);
    }
    let man = bodies.require_mut(0, ScenarioId::FlagFlutter, "man")?;
    man.vel = DVec2::new(params.v1, 0.0);
    man.pos.x += man.vel.x * dt;
    Ok(())
}

pub fn stats(bodies: &BodyArena, params: &SimParams) -> LabResult<Vec<Stat>> {
    bodies.require(0, ScenarioId::FlagFlutter, "man")?;
    Ok(vec![
        Stat::new("Relative Wind", stats::speed(relative_wind(params).length())),
        Stat::new("Flag Angle", stats::degrees(flag_angle(params))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_man_walks_horizontally() {
        let params = SimParams {
            v1: 8.0,
            ..Default::default()
        };
        let mut bodies = init(DVec2::ZERO, &params);
        step(&mut bodies, 2.5, &params).unwrap();
        assert_eq!(bodies.get(0).unwrap().pos, DVec2::new(20.0, 100.0));
    }

    #[test]
    fn test_walking_into_still_air_flag_trails_behind() {
        let params = SimParams {
            v1: 10.0,
            v2: 0.0,
            ..Default::default()
        };
        let stats = stats(&init(DVec2::ZERO, &params), &params).unwrap();
        assert_eq!(stats[0].value, "10.0 m/s");
        assert_eq!(stats[1].value, "180.0°");
    }

    #[test]
    fn test_matching_tailwind_goes_slack() {
        let params = SimParams {
            v1: 10.0,
            v2: 10.0,
            angle2: 0.0,
            ..Default::default()
        };
        assert!(relative_wind(&params).length() < 1e-9);
    }

    #[test]
    fn test_crosswind_angle() {
        let params = SimParams {
            v1: 10.0,
            v2: 10.0,
            angle2: 90.0,
            ..Default::default()
        };
        // rel = (-10, 10)
        assert!((flag_angle(&params) - 135.0).abs() < 1e-9);
    }
}
