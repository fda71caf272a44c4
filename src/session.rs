//! Per-frame lab driver
//!
//! Owns the active scenario, its bodies and parameters, and the running minimum distance.
//! The browser host calls `advance`, `render` and `stats` once per animation frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::error::{LabError, LabResult};
use crate::renderer::{CanvasSize, DrawSurface, FrameInfo, Overlays};
use crate::sim::{BodyArena, ScenarioId, SimParams, Stat, upgrade};

/// Current snapshot envelope version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub scenario: ScenarioId,
    pub params: SimParams,
    pub bodies: BodyArena,
    #[serde(default)]
    pub elapsed: f64,
    /// Running minimum in display metres; `None` until a distance has been tracked
    #[serde(default)]
    pub min_distance: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LabSession {
    scenario: ScenarioId,
    params: SimParams,
    canvas: CanvasSize,
    overlays: Overlays,
    bodies: BodyArena,
    /// Display metres; ∞ until the first tracked frame
    min_distance: f64,
    paused: bool,
    /// Simulated seconds since the last (re)initialization
    elapsed: f64,
}

impl LabSession {
    /// World origin is the canvas center, so every lab initializes around zero
    const CENTER: DVec2 = DVec2::ZERO;

    pub fn new(scenario: ScenarioId, params: SimParams, canvas: CanvasSize) -> Self {
        let bodies = scenario.init(Self::CENTER, &params);
        log::info!("lab session started: {}", scenario.label());
        Self {
            scenario,
            params,
            canvas,
            overlays: Overlays::default(),
            bodies,
            min_distance: f64::INFINITY,
            paused: false,
            elapsed: 0.0,
        }
    }

    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn bodies(&self) -> &BodyArena {
        &self.bodies
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    pub fn set_overlays(&mut self, overlays: Overlays) {
        self.overlays = overlays;
    }

    /// Discard the current bodies and start `scenario` fresh
    pub fn switch_scenario(&mut self, scenario: ScenarioId) {
        log::debug!("switching lab {} -> {}", self.scenario, scenario);
        self.scenario = scenario;
        self.reset();
    }

    /// Re-initialize the current lab with the current parameters
    pub fn reset(&mut self) {
        self.bodies = self.scenario.init(Self::CENTER, &self.params);
        self.min_distance = f64::INFINITY;
        self.elapsed = 0.0;
    }

    /// Replace parameters; bodies keep their state and pick the change up on the next step
    pub fn set_params(&mut self, params: SimParams) {
        self.params = params;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Step the lab by one frame of `dt` seconds (clamped to `MAX_FRAME_DT`)
    pub fn advance(&mut self, dt: f64) {
        if self.paused || dt.is_nan() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        self.scenario.step(&mut self.bodies, dt, &self.params);
        self.elapsed += dt;

        if let Some(d) = self.scenario.tracked_distance(&self.bodies) {
            self.min_distance = self.min_distance.min(d);
        }
    }

    pub fn stats(&self) -> Vec<Stat> {
        self.scenario
            .stats(&self.bodies, &self.params, self.min_distance)
    }

    /// Draw the current frame; `time` drives purely visual animation
    pub fn render(&self, surface: &mut dyn DrawSurface, time: f64) {
        let frame = FrameInfo {
            canvas: self.canvas,
            time,
            overlays: self.overlays,
        };
        self.scenario
            .render(surface, &self.bodies, &self.params, &frame);
    }

    pub fn snapshot(&self) -> LabResult<String> {
        let snapshot = SessionSnapshot {
            version: SNAPSHOT_VERSION,
            scenario: self.scenario,
            params: self.params.clone(),
            bodies: self.bodies.clone(),
            elapsed: self.elapsed,
            min_distance: self.min_distance.is_finite().then_some(self.min_distance),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Load state saved by `snapshot`. Older body layouts are upgraded here, once.
    pub fn restore(&mut self, json: &str) -> LabResult<()> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(LabError::UnsupportedSnapshot(snapshot.version));
        }

        // Deserialized arenas skip the push checks; rebuild to enforce them
        let schema = snapshot.bodies.schema();
        let mut bodies = BodyArena::from_bodies(snapshot.bodies.iter().cloned().collect())?;
        bodies.set_schema(schema);
        upgrade(&mut bodies, snapshot.scenario);

        self.scenario = snapshot.scenario;
        self.params = snapshot.params;
        self.bodies = bodies;
        self.elapsed = snapshot.elapsed.max(0.0);
        self.min_distance = snapshot
            .min_distance
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(f64::INFINITY);
        log::info!(
            "restored {} session ({} bodies)",
            self.scenario,
            self.bodies.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::sim::{Body, Sprite, palette};

    fn new_session(id: ScenarioId) -> LabSession {
        LabSession::new(id, SimParams::default(), CanvasSize::default())
    }

    #[test]
    fn test_min_distance_tracks_closest_approach() {
        let params = SimParams {
            v1: 30.0,
            v2: 20.0,
            ..Default::default()
        };
        let mut session = LabSession::new(ScenarioId::MinDistance, params, CanvasSize::default());
        assert_eq!(session.stats()[1].value, "--- m");

        for _ in 0..2000 {
            session.advance(1.0 / 60.0);
        }
        // dp0 = (300, 300), dv = (-30, -20): closest at t = 15000 / 1300
        assert!((session.min_distance() - 8.3205).abs() < 0.01);
        assert_eq!(session.stats()[1].value, "8.3 m");
    }

    #[test]
    fn test_min_distance_never_increases() {
        let mut session = new_session(ScenarioId::MinDistance);
        let mut last = f64::INFINITY;
        for _ in 0..600 {
            session.advance(0.05);
            assert!(session.min_distance() <= last);
            last = session.min_distance();
        }
    }

    #[test]
    fn test_advance_clamps_frame_time() {
        let mut session = new_session(ScenarioId::OneD);
        let start = session.bodies().get(0).unwrap().pos;
        session.advance(5.0);
        let moved = session.bodies().get(0).unwrap().pos - start;
        assert!((moved.x - 40.0 * MAX_FRAME_DT).abs() < 1e-9);
        assert!((session.elapsed() - MAX_FRAME_DT).abs() < 1e-12);
    }

    #[test]
    fn test_pause_freezes_bodies() {
        let mut session = new_session(ScenarioId::OneD);
        let before = session.bodies().clone();
        session.pause();
        session.advance(0.05);
        assert_eq!(session.bodies(), &before);
        session.resume();
        session.advance(0.05);
        assert_ne!(session.bodies(), &before);
    }

    #[test]
    fn test_switch_resets_state() {
        let mut session = new_session(ScenarioId::MinDistance);
        session.advance(0.1);
        assert!(session.min_distance().is_finite());

        session.switch_scenario(ScenarioId::Rain);
        assert_eq!(session.scenario(), ScenarioId::Rain);
        assert_eq!(session.bodies().len(), 7);
        assert!(session.min_distance().is_infinite());
        assert_eq!(session.elapsed(), 0.0);
    }

    #[test]
    fn test_set_params_keeps_bodies() {
        let mut session = new_session(ScenarioId::Aeroplane);
        session.advance(0.1);
        let before = session.bodies().clone();
        session.set_params(SimParams {
            v1: 80.0,
            ..Default::default()
        });
        assert_eq!(session.bodies(), &before);
        assert_eq!(session.params().v1, 80.0);
    }

    #[test]
    fn test_snapshot_restores_state() {
        let mut session = new_session(ScenarioId::River);
        for _ in 0..30 {
            session.advance(0.05);
        }
        let json = session.snapshot().unwrap();

        let mut restored = new_session(ScenarioId::OneD);
        restored.restore(&json).unwrap();
        assert_eq!(restored.scenario(), ScenarioId::River);
        assert_eq!(restored.bodies(), session.bodies());
        assert!((restored.elapsed() - session.elapsed()).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_keeps_running_minimum() {
        let params = SimParams {
            v1: 30.0,
            v2: 20.0,
            ..Default::default()
        };
        let mut session =
            LabSession::new(ScenarioId::MinDistance, params.clone(), CanvasSize::default());
        // Past the closest approach at ~11.5 s
        for _ in 0..1000 {
            session.advance(1.0 / 60.0);
        }
        let json = session.snapshot().unwrap();

        let mut restored = LabSession::new(ScenarioId::OneD, params, CanvasSize::default());
        restored.restore(&json).unwrap();
        assert_eq!(restored.min_distance(), session.min_distance());
        restored.advance(1.0 / 60.0);
        assert!((restored.min_distance() - 8.3205).abs() < 0.01);
        assert_eq!(restored.stats()[1].value, "8.3 m");
    }

    #[test]
    fn test_restore_without_minimum_starts_untracked() {
        let mut fresh = new_session(ScenarioId::MinDistance);
        let json = fresh.snapshot().unwrap();
        assert!(json.contains("\"min_distance\":null"));
        fresh.advance(0.05);
        fresh.restore(&json).unwrap();
        assert_eq!(fresh.min_distance(), f64::INFINITY);
        assert_eq!(fresh.stats()[1].value, "--- m");
    }

    #[test]
    fn test_restore_upgrades_old_rain_layout() {
        let man = Body::new(
            "Man",
            DVec2::new(0.0, 100.0),
            DVec2::ZERO,
            palette::WHITE,
            Sprite::Man,
        );
        let bodies = BodyArena::from_bodies(vec![man]).unwrap();
        let json = serde_json::json!({
            "version": 1,
            "scenario": "rain",
            "params": SimParams::default(),
            "bodies": bodies,
        })
        .to_string();

        let mut session = new_session(ScenarioId::OneD);
        session.restore(&json).unwrap();
        assert_eq!(session.bodies().iter().filter(|b| b.is_cloud()).count(), 5);
        assert_eq!(session.bodies().schema(), crate::sim::SCHEMA_VERSION);
    }

    #[test]
    fn test_restore_rejects_newer_snapshot() {
        let mut json: serde_json::Value =
            serde_json::from_str(&new_session(ScenarioId::OneD).snapshot().unwrap()).unwrap();
        json["version"] = serde_json::json!(SNAPSHOT_VERSION + 1);

        let mut session = new_session(ScenarioId::OneD);
        let err = session.restore(&json.to_string()).unwrap_err();
        assert!(matches!(err, LabError::UnsupportedSnapshot(v) if v == SNAPSHOT_VERSION + 1));
        assert!(matches!(
            session.restore("not json"),
            Err(LabError::Snapshot(_))
        ));
    }

    #[test]
    fn test_render_respects_overlays() {
        let mut session = new_session(ScenarioId::Aeroplane);
        let mut surface = RecordingSurface::new();
        session.render(&mut surface, 0.0);
        assert_eq!(surface.vector_labels().len(), 2);

        session.set_overlays(Overlays {
            vectors: false,
            ..Default::default()
        });
        session.render(&mut surface, 0.0);
        assert!(surface.vector_labels().is_empty());
    }
}
