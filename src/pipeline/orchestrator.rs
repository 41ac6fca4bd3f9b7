//! Pipeline orchestration
//!
//! Run order:
//! 1. Companies: read, validate (strict mode), decode, sort by id
//! 2. Users: read, validate (strict mode), filter, decode the kept users
//! 3. Sort users by (company_id, last_name)
//! 4. Aggregate
//! 5. Render and write the report
//!
//! Every step returns its first error. The report is rendered in memory and
//! written once, so a failed run leaves no output file behind.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::config::PipelineConfig;
use super::errors::PipelineResult;
use super::io::{read_records, write_report};
use super::ordering::{sort_companies, sort_users, UserFilter, UserSelection};
use crate::aggregate::{aggregate, CompanyAggregate};
use crate::observability::{log_event, Event};
use crate::records::{decode_companies, Company};
use crate::report::render;
use crate::schema::{validate_companies, validate_users};

/// Aggregates plus the counts behind them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub aggregates: Vec<CompanyAggregate>,
    /// Records in the users document
    pub users_loaded: usize,
    /// Users removed by the company/active filter
    pub users_dropped: usize,
}

impl Aggregation {
    /// Users that made it into an aggregate
    pub fn users_reported(&self) -> usize {
        self.users_loaded - self.users_dropped
    }
}

/// Record counts of both inputs, from `Pipeline::check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputCounts {
    pub companies: usize,
    pub users: usize,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub strict_mode: bool,
    pub companies: usize,
    pub users_loaded: usize,
    pub users_reported: usize,
    pub users_dropped: usize,
    pub output_path: PathBuf,
    pub finished_at: DateTime<Utc>,
}

/// Turns a companies document into sorted typed records
pub fn companies_from_document(
    document: &Value,
    source: &str,
    strict_mode: bool,
) -> PipelineResult<Vec<Company>> {
    if strict_mode {
        validate_companies(document, source)?;
    }
    let mut companies = decode_companies(document, source)?;
    sort_companies(&mut companies);
    Ok(companies)
}

/// Filters a users document and decodes the users that pass, in document order
pub fn users_from_document(
    document: &Value,
    source: &str,
    filter: &UserFilter,
    strict_mode: bool,
) -> PipelineResult<UserSelection> {
    if strict_mode {
        validate_users(document, source)?;
    }
    let selection = filter.select(document, source)?;
    info!(
        event = %Event::UsersFiltered,
        kept = selection.users.len(),
        dropped = selection.dropped(),
        "users filtered"
    );
    Ok(selection)
}

/// Sorts and aggregates selected users.
///
/// `companies` must already be in report order.
pub fn build_aggregation(
    companies: &[Company],
    selection: UserSelection,
) -> PipelineResult<Aggregation> {
    let users_loaded = selection.loaded;
    let users_dropped = selection.dropped();
    let mut users = selection.users;

    sort_users(&mut users);

    let aggregates = aggregate(users, companies)?;
    log_event(Event::AggregationComplete);

    Ok(Aggregation {
        aggregates,
        users_loaded,
        users_dropped,
    })
}

/// One configured report run
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline for the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads, validates and decodes both inputs without aggregating.
    pub fn check(&self) -> PipelineResult<InputCounts> {
        let companies = self.load_companies()?;
        let selection = self.load_users(&companies)?;
        Ok(InputCounts {
            companies: companies.len(),
            users: selection.loaded,
        })
    }

    /// Runs steps 1–4 and returns the aggregates. Writes nothing.
    pub fn prepare(&self) -> PipelineResult<Aggregation> {
        let companies = self.load_companies()?;
        let selection = self.load_users(&companies)?;
        build_aggregation(&companies, selection)
    }

    /// Runs the whole pipeline and writes the report.
    pub fn run(&self) -> PipelineResult<RunSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", run_id = %run_id);
        let _enter = span.enter();

        info!(
            event = %Event::RunStart,
            strict_mode = self.config.strict_mode,
            output = %self.config.output_path.display(),
            "run started"
        );

        let aggregation = self.prepare()?;
        let text = render(&aggregation.aggregates);
        write_report(&self.config.output_path, &text)?;

        info!(
            event = %Event::ReportWritten,
            companies = aggregation.aggregates.len(),
            bytes = text.len(),
            "report written"
        );

        Ok(RunSummary {
            run_id,
            strict_mode: self.config.strict_mode,
            companies: aggregation.aggregates.len(),
            users_loaded: aggregation.users_loaded,
            users_reported: aggregation.users_reported(),
            users_dropped: aggregation.users_dropped,
            output_path: self.config.output_path.clone(),
            finished_at: Utc::now(),
        })
    }

    fn load_companies(&self) -> PipelineResult<Vec<Company>> {
        let path = &self.config.companies_path;
        let document = self.read(path)?;
        let companies = companies_from_document(&document, &label(path), self.config.strict_mode)?;
        info!(event = %Event::CompaniesLoaded, count = companies.len(), "companies loaded");
        Ok(companies)
    }

    fn load_users(&self, companies: &[Company]) -> PipelineResult<UserSelection> {
        let path = &self.config.users_path;
        let document = self.read(path)?;
        let filter = UserFilter::new(companies, self.config.strict_mode);
        let selection = users_from_document(&document, &label(path), &filter, self.config.strict_mode)?;
        info!(event = %Event::UsersLoaded, count = selection.loaded, "users loaded");
        Ok(selection)
    }

    /// Reads a document, noting when its validation will be skipped
    fn read(&self, path: &Path) -> PipelineResult<Value> {
        debug!(path = %path.display(), "reading document");
        let document = read_records(path)?;
        if !self.config.strict_mode {
            warn!(event = %Event::ValidationSkipped, path = %path.display(), "lenient mode, schema not validated");
        }
        Ok(document)
    }
}

/// Source label used in schema errors
fn label(path: &Path) -> String {
    path.display().to_string()
}
