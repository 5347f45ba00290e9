//! Configuration-class failures.
//!
//! Invalid player input never produces an error; it is reported as an ignored
//! outcome by the dispatcher. Everything here is fatal at startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown control id `{0}`")]
    UnknownControl(String),
    #[error("control `{control}` requires a value")]
    MissingValue { control: &'static str },
    #[error("unknown {kind} id `{value}`")]
    UnknownId { kind: &'static str, value: String },
    #[error("catalog invalid: {0}")]
    InvalidCatalog(String),
    #[error("config invalid: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("asset `{0}` not found")]
    MissingAsset(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GameError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownId {
            kind,
            value: value.to_string(),
        }
    }
}
