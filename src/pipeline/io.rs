//! Document reading and report writing
//!
//! - Input: one JSON document per file, UTF-8
//! - Output: the rendered report, written in a single call

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{PipelineError, PipelineResult};

/// Read and parse a JSON document.
///
/// # Errors
///
/// `Io` if the file is missing or unreadable, `Parse` if it is not valid JSON.
pub fn read_records(path: &Path) -> PipelineResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the report text, replacing any previous report
pub fn write_report(path: &Path, text: &str) -> PipelineResult<()> {
    fs::write(path, text).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })
}
