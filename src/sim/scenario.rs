//! Scenario registry and interpreter
//!
//! The set of labs is closed: each identifier maps to one `ScenarioId` variant, and every
//! per-lab rule is reached through a `match` here.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::arena::BodyArena;
use super::labs::{aeroplane, angular, closest, flag, pursuit, rain, river};
use super::params::SimParams;
use super::stats::Stat;
use super::upgrade;
use crate::error::{LabError, LabResult};

/// One selectable lab mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    #[serde(rename = "1d")]
    OneD,
    #[serde(rename = "river")]
    River,
    #[serde(rename = "aeroplane")]
    Aeroplane,
    #[serde(rename = "rain")]
    Rain,
    #[serde(rename = "flag-flutter")]
    FlagFlutter,
    #[serde(rename = "angular-velocity")]
    AngularVelocity,
    #[serde(rename = "min-distance")]
    MinDistance,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 7] = [
        ScenarioId::OneD,
        ScenarioId::River,
        ScenarioId::Aeroplane,
        ScenarioId::Rain,
        ScenarioId::FlagFlutter,
        ScenarioId::AngularVelocity,
        ScenarioId::MinDistance,
    ];

    /// Registry identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::OneD => "1d",
            ScenarioId::River => "river",
            ScenarioId::Aeroplane => "aeroplane",
            ScenarioId::Rain => "rain",
            ScenarioId::FlagFlutter => "flag-flutter",
            ScenarioId::AngularVelocity => "angular-velocity",
            ScenarioId::MinDistance => "min-distance",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioId::OneD => "1D Pursuit (2D Sandbox)",
            ScenarioId::River => "River-Boat",
            ScenarioId::Aeroplane => "Aeroplane-Wind",
            ScenarioId::Rain => "Rain-Man",
            ScenarioId::FlagFlutter => "Flag Fluttering",
            ScenarioId::AngularVelocity => "Angular Velocity",
            ScenarioId::MinDistance => "Closest Approach",
        }
    }

    /// Fresh bodies for this lab around `center`
    pub fn init(self, center: DVec2, params: &SimParams) -> BodyArena {
        match self {
            ScenarioId::OneD => pursuit::init(center, params),
            ScenarioId::River => river::init(center, params),
            ScenarioId::Aeroplane => aeroplane::init(center, params),
            ScenarioId::Rain => rain::init(center, params),
            ScenarioId::FlagFlutter => flag::init(center, params),
            ScenarioId::AngularVelocity => angular::init(center, params),
            ScenarioId::MinDistance => closest::init(center, params),
        }
    }

    /// Advance `bodies` by `dt` seconds.
    ///
    /// `dt <= 0` leaves everything untouched. Absent bodies make the step a no-op for
    /// whatever needed them.
    pub fn step(self, bodies: &mut BodyArena, dt: f64, params: &SimParams) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        if bodies.schema() < upgrade::SCHEMA_VERSION {
            upgrade::upgrade(bodies, self);
        }

        let result = match self {
            ScenarioId::OneD => pursuit::step(bodies, dt),
            ScenarioId::River => river::step(bodies, dt, params),
            ScenarioId::Aeroplane => aeroplane::step(bodies, dt, params),
            ScenarioId::Rain => rain::step(bodies, dt, params),
            ScenarioId::FlagFlutter => flag::step(bodies, dt, params),
            ScenarioId::AngularVelocity => angular::step(bodies, dt),
            ScenarioId::MinDistance => closest::step(bodies, dt),
        };
        if let Err(err) = result {
            log::trace!("step skipped: {err}");
        }
    }

    /// HUD readings for the current state; empty when required bodies are absent
    pub fn stats(self, bodies: &BodyArena, params: &SimParams, min_distance: f64) -> Vec<Stat> {
        let result = match self {
            ScenarioId::OneD => pursuit::stats(bodies),
            ScenarioId::River => river::stats(bodies, params),
            ScenarioId::Aeroplane => aeroplane::stats(bodies, params),
            ScenarioId::Rain => rain::stats(bodies, params),
            ScenarioId::FlagFlutter => flag::stats(bodies, params),
            ScenarioId::AngularVelocity => angular::stats(bodies),
            ScenarioId::MinDistance => closest::stats(bodies, min_distance),
        };
        result.unwrap_or_else(|err| {
            log::trace!("stats unavailable: {err}");
            Vec::new()
        })
    }

    /// Separation in display metres that the host folds into its running minimum
    pub fn tracked_distance(self, bodies: &BodyArena) -> Option<f64> {
        match self {
            ScenarioId::MinDistance => closest::display_distance(bodies).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s)
    }
}

/// Resolve a registry identifier
pub fn lookup(id: &str) -> LabResult<ScenarioId> {
    match id {
        "1d" => Ok(ScenarioId::OneD),
        "river" => Ok(ScenarioId::River),
        "aeroplane" => Ok(ScenarioId::Aeroplane),
        "rain" => Ok(ScenarioId::Rain),
        "flag-flutter" => Ok(ScenarioId::FlagFlutter),
        "angular-velocity" => Ok(ScenarioId::AngularVelocity),
        "min-distance" => Ok(ScenarioId::MinDistance),
        other => Err(LabError::UnknownScenario(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_id() {
        for id in ScenarioId::ALL {
            assert_eq!(lookup(id.as_str()).unwrap(), id);
            assert_eq!(id.to_string().parse::<ScenarioId>().unwrap(), id);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("projectile").unwrap_err();
        assert!(matches!(err, LabError::UnknownScenario(ref id) if id == "projectile"));
        assert!(lookup("River").is_err());
    }

    #[test]
    fn test_serde_uses_registry_ids() {
        for id in ScenarioId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_step_zero_dt_is_noop() {
        let params = SimParams::default();
        for id in ScenarioId::ALL {
            let mut bodies = id.init(DVec2::ZERO, &params);
            let before = bodies.clone();
            id.step(&mut bodies, 0.0, &params);
            assert_eq!(bodies, before, "{id}");
        }
    }

    #[test]
    fn test_stats_on_empty_arena() {
        let params = SimParams::default();
        for id in ScenarioId::ALL {
            assert!(id.stats(&BodyArena::new(), &params, f64::INFINITY).is_empty(), "{id}");
            assert!(id.tracked_distance(&BodyArena::new()).is_none());
        }
    }

    #[test]
    fn test_step_on_empty_arena() {
        let params = SimParams::default();
        for id in ScenarioId::ALL {
            let mut bodies = BodyArena::new();
            id.step(&mut bodies, 0.5, &params);
            assert!(bodies.is_empty(), "{id}");
        }
    }
}
