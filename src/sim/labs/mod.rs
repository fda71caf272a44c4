//! Per-lab rules: initial layout, stepping and statistics.
//!
//! Stepping and statistics return `LabResult` so a missing body surfaces as
//! `LabError::MissingBody`; the interpreter in `scenario` turns that into a no-op.

pub mod aeroplane;
pub mod angular;
pub mod closest;
pub mod flag;
pub mod pursuit;
pub mod rain;
pub mod river;

use super::arena::BodyArena;
use super::body::Body;
use super::scenario::ScenarioId;
use crate::error::LabResult;

/// Constant-velocity update for every body
pub(crate) fn integrate_all(bodies: &mut BodyArena, dt: f64) {
    for body in bodies.iter_mut() {
        body.integrate(dt);
    }
}

/// The first two bodies of a two-body lab
pub(crate) fn pair(bodies: &BodyArena, scenario: ScenarioId) -> LabResult<(&Body, &Body)> {
    let a = bodies.require(0, scenario, "first")?;
    let b = bodies.require(1, scenario, "second")?;
    Ok((a, b))
}
