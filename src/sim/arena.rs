//! Fixed-capacity body store for one scenario session

use serde::{Deserialize, Serialize};

use super::body::{Body, Sprite};
use super::scenario::ScenarioId;
use super::upgrade::SCHEMA_VERSION;
use crate::consts::MAX_BODIES;
use crate::error::{LabError, LabResult};

/// Ordered bodies of the active scenario (insertion order is draw order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyArena {
    bodies: Vec<Body>,
    /// Layout version, see `sim::upgrade`
    #[serde(default)]
    schema: u32,
}

impl Default for BodyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyArena {
    /// Empty arena at the current schema.
    ///
    /// `push` drops it back to unversioned, so a host-built layout is upgraded on its first step.
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(MAX_BODIES),
            schema: SCHEMA_VERSION,
        }
    }

    /// Adopt a body list from outside the engine.
    ///
    /// The result is treated as unversioned, so the next step runs the schema upgrade.
    pub fn from_bodies(bodies: Vec<Body>) -> LabResult<Self> {
        let mut arena = Self {
            bodies: Vec::with_capacity(MAX_BODIES),
            schema: 0,
        };
        for body in bodies {
            arena.push(body)?;
        }
        Ok(arena)
    }

    /// Build an arena from a scenario's static layout
    pub(crate) fn seeded<const N: usize>(bodies: [Body; N]) -> Self {
        const { assert!(N <= MAX_BODIES) };
        let mut arena = Self::new();
        arena.bodies.extend(bodies);
        debug_assert!(arena.ids_unique());
        arena
    }

    /// Append a body from outside `init`; the arena becomes unversioned
    pub fn push(&mut self, body: Body) -> LabResult<()> {
        if self.bodies.len() >= MAX_BODIES {
            return Err(LabError::ArenaFull(MAX_BODIES));
        }
        if self.by_id(&body.id).is_some() {
            return Err(LabError::DuplicateBody(body.id));
        }
        self.bodies.push(body);
        self.schema = 0;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(&Body) -> bool) {
        self.bodies.retain(keep);
    }

    /// Body at `index`, or `MissingBody` naming its role in `scenario`
    pub fn require(
        &self,
        index: usize,
        scenario: ScenarioId,
        role: &'static str,
    ) -> LabResult<&Body> {
        self.bodies
            .get(index)
            .ok_or(LabError::MissingBody { scenario, role })
    }

    pub fn require_mut(
        &mut self,
        index: usize,
        scenario: ScenarioId,
        role: &'static str,
    ) -> LabResult<&mut Body> {
        self.bodies
            .get_mut(index)
            .ok_or(LabError::MissingBody { scenario, role })
    }

    /// First body drawn as `sprite`
    pub fn require_sprite(
        &self,
        sprite: Sprite,
        scenario: ScenarioId,
        role: &'static str,
    ) -> LabResult<&Body> {
        self.bodies
            .iter()
            .find(|b| b.sprite == sprite)
            .ok_or(LabError::MissingBody { scenario, role })
    }

    pub fn require_sprite_mut(
        &mut self,
        sprite: Sprite,
        scenario: ScenarioId,
        role: &'static str,
    ) -> LabResult<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.sprite == sprite)
            .ok_or(LabError::MissingBody { scenario, role })
    }

    pub fn schema(&self) -> u32 {
        self.schema
    }

    pub(crate) fn set_schema(&mut self, schema: u32) {
        self.schema = schema;
    }

    fn ids_unique(&self) -> bool {
        self.bodies
            .iter()
            .enumerate()
            .all(|(i, a)| self.bodies[i + 1..].iter().all(|b| b.id != a.id))
    }
}

impl<'a> IntoIterator for &'a BodyArena {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
