//! CLI command implementations
//!
//! `run_command` is the single error boundary of a run: any pipeline error
//! is logged once here and handed back to `main`, which prints it and exits.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::error;

use crate::observability::{init_logging, log_event, Event};
use crate::pipeline::{Pipeline, PipelineConfig};

use super::args::{Cli, Command, InputArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_logging();
    let cli = Cli::parse_args();
    run_command(cli.command.unwrap_or_default())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Run { inputs, output } => report(&inputs, output.as_deref()),
        Command::Validate { inputs } => validate(&inputs),
    };

    if let Err(ref e) = result {
        error!(event = %Event::RunFailed, code = e.code_str(), cause = e.cause_code().unwrap_or("-"), "{}", e.message());
    }

    result
}

/// Build the report and write it
pub fn report(inputs: &InputArgs, output: Option<&Path>) -> CliResult<()> {
    let config = resolve_config(inputs, output)?;
    let summary = Pipeline::new(config).run()?;

    write_response(serde_json::to_value(&summary)?)?;

    Ok(())
}

/// Check both documents and print their record counts
pub fn validate(inputs: &InputArgs) -> CliResult<()> {
    let config = resolve_config(inputs, None)?;
    let strict_mode = config.strict_mode;
    let counts = Pipeline::new(config).check()?;

    write_response(json!({
        "valid": true,
        "strict_mode": strict_mode,
        "companies": counts.companies,
        "users": counts.users,
    }))?;

    Ok(())
}

/// Merge the config file (or defaults) with command-line overrides.
///
/// Flags win over file values. The merged config is validated again.
pub fn resolve_config(inputs: &InputArgs, output: Option<&Path>) -> CliResult<PipelineConfig> {
    let mut config = match &inputs.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(path) = &inputs.companies {
        config.companies_path = path.clone();
    }
    if let Some(path) = &inputs.users {
        config.users_path = path.clone();
    }
    if let Some(path) = output {
        config.output_path = PathBuf::from(path);
    }
    if inputs.lenient {
        config.strict_mode = false;
    }

    config.validate()?;
    log_event(Event::ConfigLoaded);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_flags() {
        let config = resolve_config(&InputArgs::default(), None).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("topup.json");
        fs::write(&path, r#"{"users_path": "file_users.json", "output_path": "file.txt"}"#).unwrap();

        let inputs = InputArgs {
            config: Some(path),
            companies: None,
            users: Some(PathBuf::from("flag_users.json")),
            lenient: true,
        };
        let config = resolve_config(&inputs, Some(Path::new("flag.txt"))).unwrap();

        assert_eq!(config.users_path, PathBuf::from("flag_users.json"));
        assert_eq!(config.output_path, PathBuf::from("flag.txt"));
        assert_eq!(config.companies_path, PathBuf::from("companies.json"));
        assert!(!config.strict_mode);
    }

    #[test]
    fn test_override_that_clobbers_input_rejected() {
        let inputs = InputArgs::default();
        let err = resolve_config(&inputs, Some(Path::new("companies.json"))).unwrap_err();
        assert_eq!(err.code_str(), "TOPUP_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_run_command_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("output.txt");
        let cmd = Command::Run {
            inputs: InputArgs {
                config: None,
                companies: Some(dir.path().join("companies.json")),
                users: Some(dir.path().join("users.json")),
                lenient: false,
            },
            output: Some(output.clone()),
        };

        let err = run_command(cmd).unwrap_err();
        assert_eq!(err.cause_code(), Some("TOPUP_IO_ERROR"));
        assert!(!output.exists());
    }
}
