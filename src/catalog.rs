//! Lab catalog with per-lab visibility
//!
//! The built-in registry lists every lab on the site. Visibility flags are admin-controlled
//! and persisted to LocalStorage; labs added to the registry later start out visible.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

/// Catalog id of the lab this crate drives
pub const RELATIVE_VELOCITY: &str = "relative-velocity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Experimental,
    Kinematics,
    Electrostatics,
    Gravitation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Experimental => "experimental",
            Category::Kinematics => "kinematics",
            Category::Electrostatics => "electrostatics",
            Category::Gravitation => "gravitation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabEntry {
    pub simulation_id: String,
    pub name: String,
    pub category: Category,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

const BUILTIN: &[(&str, &str, Category)] = &[
    ("freelab", "Free Lab (Multipurpose)", Category::Experimental),
    ("vernier-calipers", "Vernier Calipers", Category::Experimental),
    ("screw-gauge", "Screw Gauge", Category::Experimental),
    ("simple-pendulum", "Simple Pendulum", Category::Experimental),
    ("ohms-law", "Ohm's Law", Category::Experimental),
    ("meter-bridge", "Meter Bridge", Category::Experimental),
    ("sonometer", "Sonometer", Category::Experimental),
    ("focal-length-concave", "Focal Length of Concave Mirror", Category::Experimental),
    ("focal-length-convex", "Focal Length of Convex Lens", Category::Experimental),
    ("youngs-modulus", "Young's Modulus", Category::Experimental),
    ("surface-tension", "Surface Tension by Capillary Rise", Category::Experimental),
    ("viscosity", "Coefficient of Viscosity", Category::Experimental),
    ("refractive-index", "Refractive Index of Glass", Category::Experimental),
    ("resistance-thermometer", "Resistance of Thermometer", Category::Experimental),
    ("potentiometer-emf", "Potentiometer - EMF of Cell", Category::Experimental),
    ("resistivity", "Resistivity of Material", Category::Experimental),
    ("projectile-motion", "Projectile Motion", Category::Kinematics),
    (RELATIVE_VELOCITY, "Relative Velocity", Category::Kinematics),
    ("circular-motion", "Uniform Circular Motion", Category::Kinematics),
    ("coulombs-law", "Coulomb's Law", Category::Electrostatics),
    ("electric-field", "Electric Field", Category::Electrostatics),
    ("gauss-law", "Gauss's Law", Category::Electrostatics),
    ("electric-potential", "Electric Potential", Category::Electrostatics),
    ("capacitors", "Capacitors", Category::Electrostatics),
    ("dipole", "Electric Dipole", Category::Electrostatics),
    ("keplers-laws", "Kepler's Laws", Category::Gravitation),
    ("gravitational-field", "Gravitational Field", Category::Gravitation),
    ("satellite-motion", "Satellite Motion", Category::Gravitation),
    ("gravitational-potential", "Gravitational Potential", Category::Gravitation),
];

/// Registry of labs, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<LabEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "kinelab_catalog";

    /// Every registered lab, all visible
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|&(id, name, category)| LabEntry {
                    simulation_id: id.to_owned(),
                    name: name.to_owned(),
                    category,
                    visible: true,
                })
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&LabEntry> {
        self.entries.iter().find(|e| e.simulation_id == id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|e| e.visible)
    }

    pub fn visible(&self) -> impl Iterator<Item = &LabEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &LabEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> LabResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.simulation_id == id)
            .ok_or_else(|| LabError::UnknownLab(id.to_owned()))?;
        entry.visible = visible;
        log::info!(
            "lab '{}' is now {}",
            id,
            if visible { "visible" } else { "hidden" }
        );
        Ok(())
    }

    /// Apply saved visibility flags. Unknown saved ids are dropped.
    pub fn merge(&mut self, saved: &Catalog) {
        for entry in &mut self.entries {
            if let Some(old) = saved.get(&entry.simulation_id) {
                entry.visible = old.visible;
            }
        }
    }

    /// Load the catalog from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut catalog = Self::builtin();
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str::<Catalog>(&json) {
                Ok(saved) => {
                    catalog.merge(&saved);
                    log::info!("Loaded catalog ({} visible)", catalog.visible().count());
                }
                Err(err) => log::warn!("Ignoring saved catalog: {err}"),
            }
        }
        catalog
    }

    /// Save the catalog to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Catalog saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::builtin()
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
    fn test_builtin_has_relative_velocity() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.entries.len(), 29);
        let entry = catalog.get(RELATIVE_VELOCITY).unwrap();
        assert_eq!(entry.name, "Relative Velocity");
        assert_eq!(entry.category, Category::Kinematics);
        assert!(catalog.is_visible(RELATIVE_VELOCITY));
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog
            .by_category(Category::Kinematics)
            .map(|e| e.simulation_id.as_str())
            .collect();
        assert_eq!(
            ids,
            ["projectile-motion", "relative-velocity", "circular-motion"]
        );
        assert_eq!(catalog.by_category(Category::Gravitation).count(), 4);
    }

    #[test]
    fn test_set_visible() {
        let mut catalog = Catalog::builtin();
        catalog.set_visible("sonometer", false).unwrap();
        assert!(!catalog.is_visible("sonometer"));
        assert_eq!(catalog.visible().count(), 28);

        let err = catalog.set_visible("warp-drive", true).unwrap_err();
        assert!(matches!(err, LabError::UnknownLab(ref id) if id == "warp-drive"));
        assert!(!catalog.is_visible("warp-drive"));
    }

    #[test]
    fn test_merge_keeps_new_labs_visible() {
        let json = r#"{"entries":[
            {"simulationId":"dipole","name":"Electric Dipole","category":"electrostatics","visible":false},
            {"simulationId":"retired-lab","name":"Old","category":"kinematics","visible":false}
        ]}"#;
        let saved: Catalog = serde_json::from_str(json).unwrap();
        let mut catalog = Catalog::builtin();
        catalog.merge(&saved);
        assert!(!catalog.is_visible("dipole"));
        assert!(catalog.is_visible("capacitors"));
        assert!(catalog.get("retired-lab").is_none());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_string(&Catalog::builtin().entries[0]).unwrap();
        assert!(json.contains("\"simulationId\":\"freelab\""));
        assert!(json.contains("\"category\":\"experimental\""));
    }
}
