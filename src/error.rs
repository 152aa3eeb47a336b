//! Error types shared by the preparation and curve commands.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, TradeArcError>;

#[derive(Debug, Error)]
pub enum TradeArcError {
    /// A required input file does not exist.
    #[error("missing input {what}: {}", path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The CSV parsed but does not have the expected trade table layout.
    #[error("unexpected trade table layout: {0}")]
    InvalidCsv(String),

    #[error("no coordinates known for home country {0:?}")]
    UnknownHome(String),
}

impl TradeArcError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}

/// Fail with `MissingInput` unless `path` exists.
pub fn require_input(what: &'static str, path: &std::path::Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(TradeArcError::MissingInput { what, path: path.to_path_buf() })
    }
}
