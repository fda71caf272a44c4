//! Display statistics and their formatting
//!
//! Every reading is a label plus a one-decimal value with a unit suffix.

use serde::Serialize;

/// Shown instead of a crossing time that never ends
pub const INFINITE: &str = "∞";
/// Shown while the running minimum is still unset
pub const UNSET: &str = "---";

/// One labelled reading for the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

impl Stat {
    pub fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

pub fn speed(v: f64) -> String {
    format!("{v:.1} m/s")
}

pub fn metres(d: f64) -> String {
    format!("{d:.1} m")
}

pub fn degrees(a: f64) -> String {
    format!("{a:.1}°")
}

pub fn radians_per_sec(w: f64) -> String {
    format!("{w:.1} rad/s")
}

pub fn seconds(t: f64) -> String {
    format!("{t:.1} s")
}

/// Running minimum in metres, `--- m` until the first sample
pub fn running_minimum(min: f64) -> String {
    if min.is_infinite() {
        format!("{UNSET} m")
    } else {
        metres(min)
    }
}
