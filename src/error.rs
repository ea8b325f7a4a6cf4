//! Error type shared by table construction, config loading and request
//! validation. The projection engine itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Engine configuration is malformed (bad bracket table, bad RMD table).
    #[error("Configuration error: {0}")]
    Config(String),

    /// An analysis request violates an input precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdvisorError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AdvisorError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
