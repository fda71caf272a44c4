//! User-adjustable simulation inputs

use serde::{Deserialize, Serialize};

use super::scenario::ScenarioId;

/// Fall speed used by the first rain lab, before fall speed became adjustable
pub const LEGACY_FALL_SPEED: f64 = 10.0;

/// Visual theme for `Sprite::Auto` bodies and the river vessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualTheme {
    #[default]
    Ball,
    Car,
    Boat,
    Swimmer,
}

impl VisualTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualTheme::Ball => "ball",
            VisualTheme::Car => "car",
            VisualTheme::Boat => "boat",
            VisualTheme::Swimmer => "swimmer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ball" => Some(VisualTheme::Ball),
            "car" => Some(VisualTheme::Car),
            "boat" => Some(VisualTheme::Boat),
            "swimmer" | "man" => Some(VisualTheme::Swimmer),
            _ => None,
        }
    }
}

/// How the rain lab picks its fall speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[allow(deprecated)]
pub enum RainModel {
    /// Fall speed comes from `SimParams::rain_speed`
    #[default]
    Parameterized,
    /// Fixed fall speed of `LEGACY_FALL_SPEED`
    #[deprecated(note = "fall speed is adjustable; use RainModel::Parameterized")]
    ConstantFall,
}

/// Per-frame inputs, read-only to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Speed of the first body (m/s)
    pub v1: f64,
    /// Speed of the second body, current or wind (m/s)
    pub v2: f64,
    /// Heading of the first body (degrees, counter-clockwise from +x)
    pub angle1: f64,
    /// Heading of the second body / wind (degrees)
    pub angle2: f64,
    /// Rain fall speed (m/s)
    pub rain_speed: f64,
    pub theme: VisualTheme,
    pub show_grid: bool,
    #[serde(default)]
    pub rain_model: RainModel,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            v1: 40.0,
            v2: 20.0,
            angle1: 90.0,
            angle2: 0.0,
            rain_speed: 30.0,
            theme: VisualTheme::Ball,
            show_grid: true,
            rain_model: RainModel::Parameterized,
        }
    }
}

impl SimParams {
    /// Starting values for a lab
    pub fn defaults_for(scenario: ScenarioId) -> Self {
        let base = Self::default();
        match scenario {
            ScenarioId::OneD => Self {
                v1: 60.0,
                v2: 30.0,
                theme: VisualTheme::Car,
                ..base
            },
            ScenarioId::River => Self {
                v1: 30.0,
                v2: 15.0,
                angle1: 90.0,
                theme: VisualTheme::Boat,
                ..base
            },
            ScenarioId::Aeroplane => Self {
                v1: 50.0,
                v2: 20.0,
                angle1: 45.0,
                angle2: 0.0,
                ..base
            },
            ScenarioId::Rain => Self {
                v1: 5.0,
                v2: 10.0,
                rain_speed: 30.0,
                ..base
            },
            ScenarioId::FlagFlutter => Self {
                v1: 10.0,
                v2: 20.0,
                angle2: 0.0,
                ..base
            },
            ScenarioId::AngularVelocity => Self {
                v1: 30.0,
                v2: 30.0,
                angle1: 0.0,
                angle2: 90.0,
                ..base
            },
            ScenarioId::MinDistance => Self {
                v1: 30.0,
                v2: 20.0,
                ..base
            },
        }
    }

    /// Vertical speed of the rain
    #[allow(deprecated)]
    pub fn fall_speed(&self) -> f64 {
        match self.rain_model {
            RainModel::Parameterized => self.rain_speed,
            RainModel::ConstantFall => LEGACY_FALL_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_roundtrip_str() {
        for theme in [
            VisualTheme::Ball,
            VisualTheme::Car,
            VisualTheme::Boat,
            VisualTheme::Swimmer,
        ] {
            assert_eq!(VisualTheme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(VisualTheme::from_str("Man"), Some(VisualTheme::Swimmer));
        assert_eq!(VisualTheme::from_str("rocket"), None);
    }

    #[test]
    #[allow(deprecated)]
    fn test_fall_speed_models() {
        let mut params = SimParams {
            rain_speed: 42.0,
            ..Default::default()
        };
        assert_eq!(params.fall_speed(), 42.0);
        params.rain_model = RainModel::ConstantFall;
        assert_eq!(params.fall_speed(), LEGACY_FALL_SPEED);
    }

    #[test]
    fn test_params_missing_rain_model_defaults() {
        let json = r#"{"v1":1,"v2":2,"angle1":3,"angle2":4,"rain_speed":5,"theme":"car","show_grid":false}"#;
        let params: SimParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.rain_model, RainModel::Parameterized);
        assert_eq!(params.theme, VisualTheme::Car);
    }
}
