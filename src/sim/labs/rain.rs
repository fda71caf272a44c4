//! `rain`: a man walking through slanted rain
//!
//! Everything is re-derived from parameters each step and sped up by `RAIN_TIME_SCALE`
//! so motion stays visible at realistic speeds.

use glam::DVec2;

use crate::consts::{
    CLOUD_COUNT, CLOUD_PARALLAX, MAN_WRAP_LIMIT, RAIN_TIME_SCALE, SKY_WRAP_LIMIT,
};
use crate::error::LabResult;
use crate::sim::arena::BodyArena;
use crate::sim::body::{Body, Role, Sprite, palette};
use crate::sim::params::SimParams;
use crate::sim::scenario::ScenarioId;
use crate::sim::stats::{self, Stat};
use crate::wrap_symmetric;

/// Height of the cloud anchor above the man
pub const MAN_DROP: f64 = 100.0;

/// Background cloud layout relative to the anchor: (dx, dy, scale)
const CLOUD_LAYOUT: [(f64, f64, f64); CLOUD_COUNT] = [
    (-300.0, -250.0, 0.8),
    (200.0, -280.0, 1.2),
    (-100.0, -350.0, 0.6),
    (400.0, -220.0, 0.9),
    (-400.0, -300.0, 0.7),
];

/// The standard cloud set around `anchor`, drifting at `wind`
pub fn clouds(anchor: DVec2, wind: f64) -> [Body; CLOUD_COUNT] {
    let mut n = 0;
    CLOUD_LAYOUT.map(|(dx, dy, scale)| {
        n += 1;
        Body::new(
            &format!("Cloud{n}"),
            anchor + DVec2::new(dx, dy),
            DVec2::new(wind, 0.0),
            palette::WHITE,
            Sprite::Cloud,
        )
        .with_role(Role::Cloud { scale })
    })
}

pub fn init(center: DVec2, params: &SimParams) -> BodyArena {
    let man = center + DVec2::new(0.0, MAN_DROP);
    let [c1, c2, c3, c4, c5] = clouds(man - DVec2::new(0.0, MAN_DROP), params.v2);
    BodyArena::seeded([
        Body::new(
            "Man",
            man,
            DVec2::new(params.v1, 0.0),
            palette::WHITE,
            Sprite::Man,
        ),
        Body::new(
            "Rain",
            center + DVec2::new(0.0, -200.0),
            rain_velocity(params),
            palette::CYAN,
            Sprite::RainSource,
        ),
        c1,
        c2,
        c3,
        c4,
        c5,
    ])
}

/// Rain velocity w.r.t. ground
pub fn rain_velocity(params: &SimParams) -> DVec2 {
    DVec2::new(params.v2, params.fall_speed())
}

/// Rain velocity as seen by the man
pub fn relative_rain(params: &SimParams) -> DVec2 {
    rain_velocity(params) - DVec2::new(params.v1, 0.0)
}

pub fn step(bodies: &mut BodyArena, dt: f64, params: &SimParams) -> LabResult<()> {
    let scaled = dt * RAIN_TIME_SCALE;

    if let Ok(man) = bodies.require_sprite_mut(Sprite::Man, ScenarioId::Rain, "man") {
        man.vel = DVec2::new(params.v1, 0.0);
        man.pos.x = wrap_symmetric(man.pos.x + man.vel.x * scaled, MAN_WRAP_LIMIT);
    }

    if let Ok(rain) = bodies.require_sprite_mut(Sprite::RainSource, ScenarioId::Rain, "rain") {
        rain.vel = rain_velocity(params);
        let next = rain.pos + rain.vel * scaled;
        rain.pos = DVec2::new(
            wrap_symmetric(next.x, SKY_WRAP_LIMIT),
            wrap_symmetric(next.y, SKY_WRAP_LIMIT),
        );
    }

    for cloud in bodies.iter_mut().filter(|b| b.is_cloud()) {
        cloud.vel = DVec2::new(params.v2, 0.0);
        cloud.pos.x = wrap_symmetric(
            cloud.pos.x + cloud.vel.x * scaled * CLOUD_PARALLAX,
            SKY_WRAP_LIMIT,
        );
    }
    Ok(())
}

pub fn stats(bodies: &BodyArena, params: &SimParams) -> LabResult<Vec<Stat>> {
    bodies.require_sprite(Sprite::Man, ScenarioId::Rain, "man")?;
    let rel = relative_rain(params);
    let umbrella = rel.x.atan2(rel.y).to_degrees();

    Ok(vec![
        Stat::new("Rain w.r.t. Man", stats::speed(rel.length())),
        Stat::new("Umbrella Angle", stats::degrees(umbrella)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::params::RainModel;

    fn params() -> SimParams {
        SimParams {
            v1: 4.0,
            v2: 10.0,
            rain_speed: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_init_layout() {
        let bodies = init(DVec2::ZERO, &params());
        assert_eq!(bodies.len(), 2 + CLOUD_COUNT);
        assert_eq!(bodies.iter().filter(|b| b.is_cloud()).count(), CLOUD_COUNT);
        let cloud = bodies.by_id("Cloud4").unwrap();
        assert_eq!(cloud.pos, DVec2::new(400.0, -220.0));
        assert_eq!(cloud.cloud_scale(), Some(0.9));
    }

    #[test]
    fn test_time_scale_and_parallax() {
        let params = params();
        let mut bodies = init(DVec2::ZERO, &params);
        step(&mut bodies, 1.0, &params).unwrap();
        assert_eq!(bodies.by_id("Man").unwrap().pos, DVec2::new(20.0, 100.0));
        assert_eq!(bodies.by_id("Rain").unwrap().pos, DVec2::new(50.0, -50.0));
        assert_eq!(bodies.by_id("Cloud1").unwrap().pos, DVec2::new(-275.0, -250.0));
    }

    #[test]
    fn test_man_wraps_at_limit() {
        let params = params();
        let mut bodies = init(DVec2::new(395.0, 0.0), &params);
        step(&mut bodies, 1.0, &params).unwrap();
        assert_eq!(bodies.by_id("Man").unwrap().pos.x, -MAN_WRAP_LIMIT);
    }

    #[test]
    fn test_rain_wraps_independently() {
        let params = SimParams {
            rain_speed: 200.0,
            ..params()
        };
        let mut bodies = init(DVec2::ZERO, &params);
        // y: -200 + 200 * 5 = 800, still inside; one more step leaves
        step(&mut bodies, 1.0, &params).unwrap();
        assert_eq!(bodies.by_id("Rain").unwrap().pos.y, 800.0);
        step(&mut bodies, 1.0, &params).unwrap();
        assert_eq!(bodies.by_id("Rain").unwrap().pos.y, -SKY_WRAP_LIMIT);
        assert!(bodies.by_id("Man").unwrap().pos.x.abs() <= MAN_WRAP_LIMIT);
    }

    #[test]
    fn test_velocities_follow_parameters() {
        let mut params = params();
        let mut bodies = init(DVec2::ZERO, &params);
        params.v2 = -6.0;
        params.rain_speed = 12.0;
        step(&mut bodies, 0.1, &params).unwrap();
        assert_eq!(bodies.by_id("Rain").unwrap().vel, DVec2::new(-6.0, 12.0));
        assert!(bodies.iter().filter(|b| b.is_cloud()).all(|c| c.vel.x == -6.0));
    }

    #[test]
    fn test_stats_umbrella_angle() {
        let stats = stats(&init(DVec2::ZERO, &params()), &params()).unwrap();
        // rel = (6, 30)
        assert_eq!(stats[0].value, "30.6 m/s");
        assert_eq!(stats[1].value, "11.3°");
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_constant_fall() {
        let params = SimParams {
            rain_model: RainModel::ConstantFall,
            v1: 10.0,
            v2: 10.0,
            ..params()
        };
        let stats = stats(&init(DVec2::ZERO, &params), &params).unwrap();
        assert_eq!(stats[0].value, "10.0 m/s");
        assert_eq!(stats[1].value, "0.0°");
    }
}
