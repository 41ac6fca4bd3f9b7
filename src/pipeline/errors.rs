//! # Pipeline Errors
//!
//! Every failure a run can hit. The CLI converts these to one message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::schema::SchemaError;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("cannot write report to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Io { .. } => "TOPUP_IO_ERROR",
            PipelineError::Parse { .. } => "TOPUP_PARSE_ERROR",
            PipelineError::Schema(e) => e.code().code(),
            PipelineError::Aggregate(e) => e.code(),
            PipelineError::Write { .. } => "TOPUP_WRITE_ERROR",
            PipelineError::Config(_) => "TOPUP_CONFIG_ERROR",
        }
    }
}
