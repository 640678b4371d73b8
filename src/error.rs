//! Error types for CivixNet.

use thiserror::Error;

/// Every failure the library can surface to a caller.
#[derive(Error, Debug)]
pub enum CivixError {
    /// A name or credential does not satisfy the account rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// An account name that is not part of the graph.
    #[error("account not found: {0}")]
    NotFound(String),

    /// `add_account` on a name already present (case-insensitive).
    #[error("account already exists: {0}")]
    AlreadyExists(String),

    /// Malformed or inconsistent external input.
    #[error("load error: {0}")]
    Load(String),

    /// A snapshot that cannot be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<bincode::Error> for CivixError {
    fn from(e: bincode::Error) -> Self {
        CivixError::Snapshot(e.to_string())
    }
}

impl CivixError {
    /// Short machine-readable tag, used in session responses.
    pub fn code(&self) -> &'static str {
        match self {
            CivixError::Validation(_) => "validation",
            CivixError::NotFound(_) => "not_found",
            CivixError::AlreadyExists(_) => "already_exists",
            CivixError::Load(_) => "load",
            CivixError::Snapshot(_) => "snapshot",
            CivixError::Io(_) => "io",
            CivixError::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, CivixError>;
