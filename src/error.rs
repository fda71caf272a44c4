//! Error types for the lab engine

use thiserror::Error;

use crate::sim::ScenarioId;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("scenario '{scenario}' has no {role} body")]
    MissingBody {
        scenario: ScenarioId,
        role: &'static str,
    },

    #[error("body id '{0}' is already present")]
    DuplicateBody(String),

    #[error("body arena is full ({0} bodies)")]
    ArenaFull(usize),

    #[error("unknown lab '{0}'")]
    UnknownLab(String),

    #[error("session snapshot version {0} is newer than supported")]
    UnsupportedSnapshot(u32),

    #[error("invalid session snapshot")]
    Snapshot(#[from] serde_json::Error),
}

pub type LabResult<T> = Result<T, LabError>;
