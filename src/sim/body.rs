//! Kinematic bodies and their per-scenario roles

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PATH_CAPACITY, PATH_MIN_STEP};

/// Packed 0xRRGGBB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// CSS hex form, e.g. `#00d4ff`
    pub fn css(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Body colors used across the labs
pub mod palette {
    use super::Color;

    pub const CYAN: Color = Color(0x00d4ff);
    pub const MAGENTA: Color = Color(0xff0055);
    pub const MINT: Color = Color(0x00ff9d);
    pub const WHITE: Color = Color(0xffffff);
}

/// Visual representation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sprite {
    /// Follows the user's visual theme
    Auto,
    Ball,
    Boat,
    Plane,
    Man,
    RainSource,
    Cloud,
    FlagMan,
}

/// River bank a vessel can run into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bank {
    /// Top of the screen (smaller y)
    Upper,
    /// Bottom of the screen (larger y)
    Lower,
}

impl Bank {
    /// Sign of y when moving from the water onto this bank
    #[inline]
    pub fn outward(self) -> f64 {
        match self {
            Bank::Upper => -1.0,
            Bank::Lower => 1.0,
        }
    }
}

/// Where a river vessel is relative to the water
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Landing {
    /// In the water, free to cross
    Afloat,
    /// Swimmer walking up the grass past `bank` at the `rate` it landed with
    Climbing { bank: Bank, climbed: f64, rate: f64 },
    /// Stopped at (boat) or beyond (swimmer) `bank`
    Ashore { bank: Bank },
}

/// River boat/swimmer extras: bank geometry, landing state and path trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    pub upper_bank: f64,
    pub lower_bank: f64,
    pub landing: Landing,
    /// Sampled positions, oldest first
    pub path: VecDeque<DVec2>,
}

impl VesselState {
    pub fn new(upper_bank: f64, lower_bank: f64, start: DVec2) -> Self {
        let mut path = VecDeque::with_capacity(PATH_CAPACITY);
        path.push_back(start);
        Self {
            upper_bank,
            lower_bank,
            landing: Landing::Afloat,
            path,
        }
    }

    #[inline]
    pub fn bank_y(&self, bank: Bank) -> f64 {
        match bank {
            Bank::Upper => self.upper_bank,
            Bank::Lower => self.lower_bank,
        }
    }

    /// Distance between the banks
    #[inline]
    pub fn width(&self) -> f64 {
        (self.lower_bank - self.upper_bank).abs()
    }

    /// Bank reached at `next_y` while moving with vertical speed `vy`
    pub fn crossed_bank(&self, next_y: f64, vy: f64) -> Option<Bank> {
        if vy < 0.0 && next_y <= self.upper_bank {
            Some(Bank::Upper)
        } else if vy > 0.0 && next_y >= self.lower_bank {
            Some(Bank::Lower)
        } else {
            None
        }
    }

    /// Append `pos` to the trace once it is far enough from the last sample
    pub fn record(&mut self, pos: DVec2) {
        let far_enough = self
            .path
            .back()
            .is_none_or(|last| last.distance(pos) > PATH_MIN_STEP);
        if far_enough {
            self.path.push_back(pos);
            while self.path.len() > PATH_CAPACITY {
                self.path.pop_front();
            }
        }
    }
}

/// Scenario-specific extras carried by a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Generic,
    Vessel(VesselState),
    Cloud { scale: f64 },
}

/// A simulated point object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Unique within one arena
    pub id: String,
    pub pos: DVec2,
    pub vel: DVec2,
    pub color: Color,
    pub label: String,
    pub sprite: Sprite,
    pub role: Role,
}

impl Body {
    pub fn new(id: &str, pos: DVec2, vel: DVec2, color: Color, sprite: Sprite) -> Self {
        Self {
            id: id.to_owned(),
            pos,
            vel,
            color,
            label: id.to_owned(),
            sprite,
            role: Role::Generic,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Constant-velocity position update
    #[inline]
    pub fn integrate(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    pub fn is_cloud(&self) -> bool {
        self.sprite == Sprite::Cloud
    }

    pub fn vessel(&self) -> Option<&VesselState> {
        match &self.role {
            Role::Vessel(v) => Some(v),
            _ => None,
        }
    }

    pub fn cloud_scale(&self) -> Option<f64> {
        match self.role {
            Role::Cloud { scale } => Some(scale),
            _ => None,
        }
    }
}
