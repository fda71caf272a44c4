//! `river`: a boat or swimmer crossing a river with a current
//!
//! The vessel's ground velocity is its heading velocity plus the current. Reaching a bank
//! while heading into it zeroes the vertical component:
//! - boat: held on the bank line, carried along by the current only
//! - swimmer: walks `GRASS_DEPTH` further onto the grass while drifting, then stops. The
//!   climb keeps the vertical speed it landed with, whatever the heading does afterwards.

use glam::DVec2;

use crate::consts::{GRASS_DEPTH, MIN_CROSSING_SPEED, RIVER_HALF_WIDTH, RIVER_WIDTH};
use crate::error::LabResult;
use crate::heading_velocity;
use crate::sim::arena::BodyArena;
use crate::sim::body::{Bank, Body, Landing, Role, Sprite, VesselState, palette};
use crate::sim::params::{SimParams, VisualTheme};
use crate::sim::scenario::ScenarioId;
use crate::sim::stats::{self, INFINITE, Stat};

pub fn init(center: DVec2, params: &SimParams) -> BodyArena {
    let start = center + DVec2::new(0.0, RIVER_HALF_WIDTH);
    let vessel = VesselState::new(
        center.y - RIVER_HALF_WIDTH,
        center.y + RIVER_HALF_WIDTH,
        start,
    );
    BodyArena::seeded([
        Body::new(
            "Boat",
            start,
            heading_velocity(params.v1, params.angle1),
            palette::MINT,
            Sprite::Boat,
        )
        .with_role(Role::Vessel(vessel)),
        Body::new(
            "B",
            start,
            DVec2::new(params.v2, 0.0),
            palette::MAGENTA,
            Sprite::Ball,
        ),
    ])
}

pub fn step(bodies: &mut BodyArena, dt: f64, params: &SimParams) -> LabResult<()> {
    let heading = heading_velocity(params.v1, params.angle1);
    let current = DVec2::new(params.v2, 0.0);

    if let Some(marker) = bodies.get_mut(1) {
        marker.vel = current;
        marker.integrate(dt);
    }

    let vessel = bodies.require_mut(0, ScenarioId::River, "vessel")?;
    advance_vessel(
        vessel,
        heading,
        current,
        params.theme == VisualTheme::Swimmer,
        dt,
    );
    Ok(())
}

fn advance_vessel(body: &mut Body, heading: DVec2, current: DVec2, swimmer: bool, dt: f64) {
    let Body { pos, vel, role, .. } = body;
    let Role::Vessel(vessel) = role else {
        *vel = heading + current;
        *pos += *vel * dt;
        return;
    };

    let landing = vessel.landing;
    match landing {
        Landing::Afloat => {
            *vel = heading + current;
            let mut next = *pos + *vel * dt;
            if let Some(bank) = vessel.crossed_bank(next.y, vel.y) {
                let bank_y = vessel.bank_y(bank);
                let rate = vel.y.abs();
                vel.y = 0.0;
                if swimmer {
                    // Whatever carried past the line counts toward the climb
                    let climbed = (next.y - bank_y).abs().min(GRASS_DEPTH);
                    next.y = bank_y + bank.outward() * climbed;
                    vessel.landing = if climbed >= GRASS_DEPTH {
                        *vel = DVec2::ZERO;
                        Landing::Ashore { bank }
                    } else {
                        Landing::Climbing {
                            bank,
                            climbed,
                            rate,
                        }
                    };
                } else {
                    next.y = bank_y;
                    vessel.landing = Landing::Ashore { bank };
                }
                log::debug!("vessel reached {:?} bank at x = {:.1}", bank, next.x);
            }
            *pos = next;
        }
        Landing::Climbing { bank, .. } if !swimmer => {
            // A boat never leaves the bank line
            *vel = DVec2::new(current.x, 0.0);
            pos.x += current.x * dt;
            pos.y = vessel.bank_y(bank);
            vessel.landing = Landing::Ashore { bank };
        }
        Landing::Climbing {
            bank,
            climbed,
            rate,
        } => {
            let rise = (rate * dt).min(GRASS_DEPTH - climbed);
            pos.x += current.x * dt;
            pos.y += bank.outward() * rise;
            let climbed = climbed + rise;
            if climbed >= GRASS_DEPTH {
                *vel = DVec2::ZERO;
                vessel.landing = Landing::Ashore { bank };
            } else {
                *vel = DVec2::new(current.x, bank.outward() * rate);
                vessel.landing = Landing::Climbing {
                    bank,
                    climbed,
                    rate,
                };
            }
        }
        Landing::Ashore { .. } if swimmer => {
            *vel = DVec2::ZERO;
        }
        Landing::Ashore { bank } => {
            if heading.y * bank.outward() < 0.0 {
                // Steering back into the water relaunches the boat
                vessel.landing = Landing::Afloat;
                *vel = heading + current;
                *pos += *vel * dt;
            } else {
                *vel = DVec2::new(current.x, 0.0);
                pos.x += current.x * dt;
                pos.y = vessel.bank_y(bank);
            }
        }
    }

    vessel.record(*pos);
}

pub fn stats(bodies: &BodyArena, params: &SimParams) -> LabResult<Vec<Stat>> {
    let vessel = bodies.require(0, ScenarioId::River, "vessel")?;
    let width = vessel.vessel().map_or(RIVER_WIDTH, VesselState::width);

    let heading = heading_velocity(params.v1, params.angle1);
    let ground = heading + DVec2::new(params.v2, 0.0);
    let crossing_time = (heading.y.abs() >= MIN_CROSSING_SPEED).then(|| width / heading.y.abs());
    let drift = crossing_time.map_or(0.0, |t| ground.x * t);

    Ok(vec![
        Stat::new(
            "Crossing Time",
            crossing_time.map_or_else(|| INFINITE.to_owned(), stats::seconds),
        ),
        Stat::new("Drift", stats::metres(drift)),
        Stat::new("Ground Speed", stats::speed(ground.length())),
    ])
}
