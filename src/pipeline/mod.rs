//! Pipeline Orchestrator subsystem
//!
//! Sequences read → validate → filter → decode → sort → aggregate → report.
//!
//! # Modes
//!
//! - strict (default): schema validation runs and inactive users are dropped
//! - lenient: no schema validation, inactive users are reported
//!
//! Unmatched users are dropped in both modes.

mod config;
mod errors;
mod io;
mod ordering;
mod orchestrator;

pub use config::PipelineConfig;
pub use errors::{PipelineError, PipelineResult};
pub use io::{read_records, write_report};
pub use ordering::{sort_companies, sort_users, UserFilter, UserSelection};
pub use orchestrator::{
    build_aggregation, companies_from_document, users_from_document, Aggregation, InputCounts,
    Pipeline, RunSummary,
};
