//! Scenario simulation module
//!
//! All lab physics lives here. This module must stay pure and deterministic:
//! - Elapsed time and parameters are the only inputs
//! - Stable iteration order (arena insertion order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod labs;
pub mod params;
pub mod scenario;
pub mod stats;
pub mod upgrade;

pub use arena::BodyArena;
pub use body::{Bank, Body, Color, Landing, Role, Sprite, VesselState, palette};
pub use params::{LEGACY_FALL_SPEED, RainModel, SimParams, VisualTheme};
pub use scenario::{ScenarioId, lookup};
pub use stats::Stat;
pub use upgrade::{SCHEMA_VERSION, upgrade};
