//! `min-distance`: closest approach of two bodies on perpendicular paths
//!
//! The running minimum lives with the host; this module only reports the current
//! separation and formats whatever minimum it is handed.

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
            center + DVec2::new(-200.0, -100.0),
            DVec2::new(params.v1, 0.0),
            palette::CYAN,
            Sprite::Auto,
        ),
        Body::new(
            "B",
            center + DVec2::new(100.0, 200.0),
            DVec2::new(0.0, -params.v2),
            palette::MAGENTA,
            Sprite::Auto,
        ),
    ])
}

pub fn step(bodies: &mut BodyArena, dt: f64) -> LabResult<()> {
    integrate_all(bodies, dt);
    Ok(())
}

/// Current separation in display metres
pub fn display_distance(bodies: &BodyArena) -> LabResult<f64> {
    let (a, b) = pair(bodies, ScenarioId::MinDistance)?;
    Ok(a.pos.distance(b.pos) / DISPLAY_SCALE)
}

pub fn stats(bodies: &BodyArena, min_distance: f64) -> LabResult<Vec<Stat>> {
    let current = display_distance(bodies)?;
    Ok(vec![
        Stat::new("Current Distance", stats::metres(current)),
        Stat::new("Min Distance achieved", stats::running_minimum(min_distance)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_distance() {
        let bodies = init(DVec2::ZERO, &SimParams::default());
        // |(-300, -300)| / 10
        let d = display_distance(&bodies).unwrap();
        assert!((d - 42.426_406_871_192_85).abs() < 1e-9);
    }

    #[test]
    fn test_stats_before_tracking() {
        let bodies = init(DVec2::ZERO, &SimParams::default());
        let stats = stats(&bodies, f64::INFINITY).unwrap();
        assert_eq!(stats[0], Stat::new("Current Distance", "42.4 m".into()));
        assert_eq!(stats[1], Stat::new("Min Distance achieved", "--- m".into()));
    }

    #[test]
    fn test_distance_dips_at_closest_approach() {
        let (v1, v2) = (30.0, 20.0);
        let params = SimParams {
            v1,
            v2,
            ..Default::default()
        };
        let t_star = (300.0 * v1 + 300.0 * v2) / (v1 * v1 + v2 * v2);

        let at = |t: f64| {
            let mut bodies = init(DVec2::ZERO, &params);
            step(&mut bodies, t).unwrap();
            display_distance(&bodies).unwrap()
        };
        let before = at(t_star - 1.0);
        let closest = at(t_star);
        let after = at(t_star + 1.0);
        assert!(before > closest && after > closest);
        assert!(at(t_star - 2.0) > before);
        assert!(at(t_star + 2.0) > after);
    }
}
