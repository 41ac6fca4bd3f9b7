//! topup-report - validate company and user records, apply token top-ups
//! and write a per-company report
//!
//! Pipeline: schema → records → aggregate → report, driven by `pipeline`.

pub mod aggregate;
pub mod cli;
pub mod observability;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod schema;
