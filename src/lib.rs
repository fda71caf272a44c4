//! Kinelab - relative velocity lab simulations
//!
//! Core modules:
//! - `sim`: Scenario engine (bodies, stepping, statistics)
//! - `renderer`: Drawing-surface adapters (recording + HTML canvas)
//! - `session`: Per-lab host driver (frame loop state, snapshots)
//! - `catalog`: Lab catalog with visibility flags
//! - `settings`: Persisted user preferences

pub mod catalog;
pub mod error;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use catalog::Catalog;
pub use error::LabError;
pub use session::LabSession;
pub use settings::LabSettings;

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    /// Largest frame time the host will feed into a single step (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Capacity of a scenario body arena
    pub const MAX_BODIES: usize = 16;

    /// Pixels per displayed metre for distance readouts
    pub const DISPLAY_SCALE: f64 = 10.0;

    /// River geometry (banks at center.y ± half width)
    pub const RIVER_HALF_WIDTH: f64 = 150.0;
    pub const RIVER_WIDTH: f64 = 2.0 * RIVER_HALF_WIDTH;
    /// Distance a swimmer keeps walking past the bank before stopping
    pub const GRASS_DEPTH: f64 = 40.0;
    /// Vertical speeds below this never cross the river
    pub const MIN_CROSSING_SPEED: f64 = 0.1;

    /// Path trace sampling
    pub const PATH_MIN_STEP: f64 = 5.0;
    pub const PATH_CAPACITY: usize = 500;

    /// Rain scenario
    pub const RAIN_TIME_SCALE: f64 = 5.0;
    pub const CLOUD_PARALLAX: f64 = 0.5;
    pub const MAN_WRAP_LIMIT: f64 = 400.0;
    pub const SKY_WRAP_LIMIT: f64 = 800.0;
    pub const CLOUD_COUNT: usize = 5;
}

/// Velocity vector for a speed and heading in degrees (counter-clockwise from +x, y down)
#[inline]
pub fn heading_velocity(speed: f64, degrees: f64) -> DVec2 {
    let rad = degrees.to_radians();
    DVec2::new(speed * rad.cos(), -speed * rad.sin())
}

/// Heading of a screen-space vector in degrees (counter-clockwise from +x, y down)
#[inline]
pub fn screen_heading(v: DVec2) -> f64 {
    (-v.y).atan2(v.x).to_degrees()
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Teleport `value` to the opposite side once it leaves [-limit, limit]
#[inline]
pub fn wrap_symmetric(value: f64, limit: f64) -> f64 {
    if value > limit {
        -limit
    } else if value < -limit {
        limit
    } else {
        value
    }
}
