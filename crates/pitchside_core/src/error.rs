use thiserror::Error;

use crate::live::vocabulary::Phase;

/// Failures at the edges of the core: request decoding and config loading.
///
/// Degenerate scoring input (empty histories, missing groups, empty logs)
/// is never an error; those paths return zero/empty/default values.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    /// Stable code for the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Json(_) => "INVALID_JSON",
            CoreError::Yaml(_) => "INVALID_YAML",
            CoreError::Io(_) => "IO_ERROR",
            CoreError::InvalidConfig(_) => "INVALID_CONFIG",
            CoreError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }
}

/// A capture step the protocol refused. State is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("match clock is not running")]
    ClockNotRunning,

    #[error("no phase selected")]
    NoActivePhase,

    #[error("action '{action}' is not available in phase {phase:?}")]
    UnknownAction { phase: Phase, action: String },

    #[error("no pending action to qualify")]
    NoPendingAction,

    #[error("no active subject")]
    NoActiveSubject,

    #[error("subject '{0}' is not being tracked")]
    UnknownSubject(String),

    #[error("capture log is empty")]
    EmptyLog,
}

pub type Result<T> = std::result::Result<T, CoreError>;
