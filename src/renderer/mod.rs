//! 2D rendering module
//!
//! Scenario draw rules (`scenes`) talk to a `DrawSurface`, the drawing-utilities
//! collaborator. `RecordingSurface` captures draw calls for tests; `CanvasSurface`
//! draws to an HTML canvas in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod scenes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCmd, RecordingSurface};
pub use scenes::look_for;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::Color;

/// Pixels per m/s when drawing velocity arrows
pub const VECTOR_SCALE: f64 = 2.0;
/// Grid spacing in world units
pub const GRID_SPACING: f64 = 50.0;

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Optional decorations, driven by user settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlays {
    pub vectors: bool,
    pub path: bool,
    pub lightning: bool,
}

impl Default for Overlays {
    fn default() -> Self {
        Self {
            vectors: true,
            path: true,
            lightning: true,
        }
    }
}

/// Per-frame render inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub canvas: CanvasSize,
    /// Seconds since the lab started (animation clock)
    pub time: f64,
    pub overlays: Overlays,
}

/// Scene background
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    Plain,
    Sky,
    River { upper: f64, lower: f64 },
    Storm { ground_y: f64, flash: f64 },
}

/// Resolved sprite appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Look {
    Ball,
    Car,
    Boat,
    Swimmer,
    Plane,
    Man,
    FlagMan { flag_angle: f64 },
    RainSource,
    Cloud { scale: f64 },
}

/// Primitive drawing operations in world coordinates (origin at the canvas center)
pub trait DrawSurface {
    fn clear(&mut self, canvas: CanvasSize);
    fn backdrop(&mut self, backdrop: Backdrop);
    fn grid(&mut self, spacing: f64);
    fn road(&mut self, y: f64);
    fn sprite(&mut self, pos: DVec2, look: Look, color: Color, label: &str);
    fn vector(&mut self, origin: DVec2, v: DVec2, color: Color, label: &str);
    fn dashed_line(&mut self, from: DVec2, to: DVec2);
    fn path(&mut self, points: &[DVec2], color: Color);
    /// Rain streaks around `around`, slanted `slant` degrees from vertical
    fn rain(&mut self, around: DVec2, slant: f64, time: f64);
}
