//! Pipeline configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! empty object `{}` is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{PipelineError, PipelineResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Companies document (default "companies.json")
    #[serde(default = "default_companies_path")]
    pub companies_path: PathBuf,

    /// Users document (default "users.json")
    #[serde(default = "default_users_path")]
    pub users_path: PathBuf,

    /// Report destination (default "output.txt")
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Validate inputs and drop inactive users (default true).
    /// When false, inputs are only decoded and inactive users are reported.
    #[serde(default = "default_strict_mode")]
    pub strict_mode: bool,
}

fn default_companies_path() -> PathBuf {
    PathBuf::from("companies.json")
}
fn default_users_path() -> PathBuf {
    PathBuf::from("users.json")
}
fn default_output_path() -> PathBuf {
    PathBuf::from("output.txt")
}
fn default_strict_mode() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            companies_path: default_companies_path(),
            users_path: default_users_path(),
            output_path: default_output_path(),
            strict_mode: default_strict_mode(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;

        let config: PipelineConfig = serde_json::from_str(&content).map_err(|e| {
            PipelineError::Config(format!("invalid config JSON in '{}': {}", path.display(), e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Checks paths are set and the report cannot overwrite an input
    pub fn validate(&self) -> PipelineResult<()> {
        let paths = [
            ("companies_path", &self.companies_path),
            ("users_path", &self.users_path),
            ("output_path", &self.output_path),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(PipelineError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.output_path == self.companies_path || self.output_path == self.users_path {
            return Err(PipelineError::Config(format!(
                "output_path '{}' would overwrite an input document",
                self.output_path.display()
            )));
        }

        Ok(())
    }
}
