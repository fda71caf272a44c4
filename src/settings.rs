//! Lab settings and preferences
//!
//! Persisted separately from session snapshots in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::renderer::Overlays;
use crate::sim::{ScenarioId, SimParams, VisualTheme};

/// Lab settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabSettings {
    /// Sprite theme override; `None` keeps each lab's own default
    pub theme: Option<VisualTheme>,

    // === Overlays ===
    /// Background grid in the sandbox labs
    pub show_grid: bool,
    /// Velocity arrows
    pub show_vectors: bool,
    /// River path trace
    pub show_path: bool,

    // === Accessibility ===
    /// Reduced motion (no lightning flashes)
    pub reduced_motion: bool,

    /// Lab opened on the next visit
    pub last_scenario: ScenarioId,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            theme: None,

            show_grid: true,
            show_vectors: true,
            show_path: true,

            reduced_motion: false,

            last_scenario: ScenarioId::OneD,
        }
    }
}

impl LabSettings {
    /// Starting parameters for `scenario` with these preferences applied
    pub fn params_for(&self, scenario: ScenarioId) -> SimParams {
        let mut params = SimParams::defaults_for(scenario);
        if let Some(theme) = self.theme {
            params.theme = theme;
        }
        params.show_grid = self.show_grid;
        params
    }

    /// Effective overlays (lightning respects reduced_motion)
    pub fn overlays(&self) -> Overlays {
        Overlays {
            vectors: self.show_vectors,
            path: self.show_path,
            lightning: !self.reduced_motion,
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "kinelab_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(settings) = serde_json::from_str(&json)
        {
            log::info!("Loaded settings from LocalStorage");
            return settings;
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_lab_theme_without_override() {
        let settings = LabSettings::default();
        assert_eq!(settings.params_for(ScenarioId::OneD).theme, VisualTheme::Car);
        assert_eq!(settings.params_for(ScenarioId::River).theme, VisualTheme::Boat);
    }

    #[test]
    fn test_params_apply_overrides() {
        let settings = LabSettings {
            theme: Some(VisualTheme::Swimmer),
            show_grid: false,
            ..Default::default()
        };
        let params = settings.params_for(ScenarioId::River);
        assert_eq!(params.theme, VisualTheme::Swimmer);
        assert!(!params.show_grid);
        assert_eq!(params.v1, SimParams::defaults_for(ScenarioId::River).v1);
    }

    #[test]
    fn test_reduced_motion_disables_lightning() {
        let mut settings = LabSettings::default();
        assert!(settings.overlays().lightning);
        settings.reduced_motion = true;
        let overlays = settings.overlays();
        assert!(!overlays.lightning);
        assert!(overlays.vectors);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: LabSettings =
            serde_json::from_str(r#"{"show_vectors":false,"last_scenario":"rain"}"#).unwrap();
        assert!(!settings.show_vectors);
        assert!(settings.show_grid);
        assert_eq!(settings.last_scenario, ScenarioId::Rain);
        assert_eq!(settings.theme, None);
    }
}
