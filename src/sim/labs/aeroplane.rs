//! `aeroplane`: plane airspeed plus wind gives the ground track

use glam::DVec2;

use crate::error::LabResult;
use crate::sim::arena::BodyArena;
use crate::sim::body::{Body, Sprite, palette};
use crate::sim::params::SimParams;
use crate::sim::scenario::ScenarioId;
use crate::sim::stats::{self, Stat};
use crate::{heading_velocity, normalize_degrees, screen_heading};

pub fn init(center: DVec2, params: &SimParams) -> BodyArena {
    let (plane, wind) = velocities(params);
    BodyArena::seeded([
        Body::new(
            "Plane",
            center + DVec2::new(-100.0, -50.0),
            plane,
            palette::WHITE,
            Sprite::Plane,
        ),
        Body::new(
            "Wind",
            center + DVec2::new(-100.0, 50.0),
            wind,
            palette::CYAN,
            Sprite::Ball,
        ),
    ])
}

/// (plane velocity w.r.t. air, wind velocity w.r.t. ground)
pub fn velocities(params: &SimParams) -> (DVec2, DVec2) {
    (
        heading_velocity(params.v1, params.angle1),
        heading_velocity(params.v2, params.angle2),
    )
}

pub fn step(bodies: &mut BodyArena, dt: f64, params: &SimParams) -> LabResult<()> {
    let (plane_vel, wind_vel) = velocities(params);

    // The wind marker only carries the wind vector; it does not move
    bodies.require_mut(1, ScenarioId::Aeroplane, "wind")?.vel = wind_vel;

    let plane = bodies.require_mut(0, ScenarioId::Aeroplane, "plane")?;
    plane.vel = plane_vel;
    plane.pos += (plane_vel + wind_vel) * dt;
    Ok(())
}

pub fn stats(bodies: &BodyArena, params: &SimParams) -> LabResult<Vec<Stat>> {
    bodies.require(0, ScenarioId::Aeroplane, "plane")?;
    let (plane_vel, wind_vel) = velocities(params);
    let ground = plane_vel + wind_vel;
    let drift = normalize_degrees(screen_heading(ground) - screen_heading(plane_vel));

    Ok(vec![
        Stat::new("Ground Speed", stats::speed(ground.length())),
        Stat::new("Drift Angle", stats::degrees(drift)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_integrates_vector_sum() {
        let params = SimParams {
            v1: 40.0,
            angle1: 90.0,
            v2: 30.0,
            angle2: 0.0,
            ..Default::default()
        };
        let mut bodies = init(DVec2::ZERO, &params);
        step(&mut bodies, 1.0, &params).unwrap();
        let plane = bodies.get(0).unwrap();
        assert!((plane.pos - DVec2::new(-70.0, -90.0)).length() < 1e-9);
        // Wind marker holds still
        assert_eq!(bodies.get(1).unwrap().pos, DVec2::new(-100.0, 50.0));
    }

    #[test]
    fn test_plane_follows_parameter_changes() {
        let mut params = SimParams {
            v1: 40.0,
            angle1: 0.0,
            v2: 0.0,
            ..Default::default()
        };
        let mut bodies = init(DVec2::ZERO, &params);
        params.angle1 = 180.0;
        step(&mut bodies, 1.0, &params).unwrap();
        assert!((bodies.get(0).unwrap().pos.x - (-140.0)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_wind_is_noop() {
        let params = SimParams::default();
        let mut bodies = init(DVec2::ZERO, &params);
        bodies.retain(|b| b.id == "Plane");
        let before = bodies.clone();
        assert!(step(&mut bodies, 1.0, &params).is_err());
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_stats_crosswind() {
        // 40 north with a 30 east wind: 50 m/s, track 53.13° vs heading 90°
        let params = SimParams {
            v1: 40.0,
            angle1: 90.0,
            v2: 30.0,
            angle2: 0.0,
            ..Default::default()
        };
        let bodies = init(DVec2::ZERO, &params);
        let stats = stats(&bodies, &params).unwrap();
        assert_eq!(stats[0].value, "50.0 m/s");
        assert_eq!(stats[1].value, "-36.9°");
    }

    #[test]
    fn test_drift_angle_wraps_across_180() {
        // Heading 170°, wind pushes the track past 180°
        let params = SimParams {
            v1: 40.0,
            angle1: 170.0,
            v2: 30.0,
            angle2: 270.0,
            ..Default::default()
        };
        let bodies = init(DVec2::ZERO, &params);
        let stats = stats(&bodies, &params).unwrap();
        let drift: f64 = stats[1].value.trim_end_matches('°').parse().unwrap();
        assert!(drift > 0.0 && drift < 90.0, "drift {drift}");
    }
}
