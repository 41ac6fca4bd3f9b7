//! # Aggregation Errors

use thiserror::Error;

/// Result type for aggregation
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Aggregation errors. All of them mean a caller broke a precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("user {user_id} references company {company_id}, which is not in the company index")]
    UnknownCompany { user_id: i64, company_id: i64 },

    #[error("company id {0} appears more than once")]
    DuplicateCompany(i64),

    #[error("token arithmetic overflowed for company {company_id}")]
    Overflow { company_id: i64 },

    #[error("company {company_id} has users but no {key}")]
    MissingTerms { company_id: i64, key: &'static str },
}

impl AggregateError {
    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AggregateError::UnknownCompany { .. } => "TOPUP_AGGREGATE_UNKNOWN_COMPANY",
            AggregateError::DuplicateCompany(_) => "TOPUP_AGGREGATE_DUPLICATE_COMPANY",
            AggregateError::Overflow { .. } => "TOPUP_AGGREGATE_OVERFLOW",
            AggregateError::MissingTerms { .. } => "TOPUP_AGGREGATE_MISSING_TERMS",
        }
    }
}
