//! Aggregator subsystem
//!
//! Consumes typed companies and users and produces one `CompanyAggregate`
//! per company.
//!
//! # Flow
//!
//! 1. Index companies by id, one empty aggregate each
//! 2. Fold users into the index: credit the top-up, split by email eligibility
//! 3. Return aggregates in company order
//!
//! A user is email-eligible only when both the company and the user opt in.

mod aggregator;
mod errors;
mod types;

pub use aggregator::{aggregate, TopUpLedger};
pub use errors::{AggregateError, AggregateResult};
pub use types::CompanyAggregate;
