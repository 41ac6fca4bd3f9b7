//! Aggregation output

use crate::records::CreditedUser;

/// Per-company result of one aggregation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyAggregate {
    pub company_id: i64,
    pub company_name: String,
    /// Users whose company and own email flags are both set, in input order
    pub users_emailed: Vec<CreditedUser>,
    /// Every other joined user, in input order
    pub users_not_emailed: Vec<CreditedUser>,
    /// `top_up` times the number of joined users
    pub total_top_ups: i64,
}

impl CompanyAggregate {
    /// Creates an aggregate with no users joined yet
    pub fn empty(company_id: i64, company_name: impl Into<String>) -> Self {
        Self {
            company_id,
            company_name: company_name.into(),
            users_emailed: Vec::new(),
            users_not_emailed: Vec::new(),
            total_top_ups: 0,
        }
    }

    /// Number of users joined to this company
    pub fn joined_count(&self) -> usize {
        self.users_emailed.len() + self.users_not_emailed.len()
    }
}
