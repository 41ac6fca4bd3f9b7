//! Join, partition and top-up aggregation
//!
//! Users are folded into a ledger keyed by company. The ledger is created
//! from the company list, threaded through the fold by value and turned into
//! the result at the end; nothing else holds it.

use std::collections::HashMap;

use super::errors::{AggregateError, AggregateResult};
use super::types::CompanyAggregate;
use crate::records::{Company, CreditedUser, User};

/// Fold state: one aggregate per company, in company order.
#[derive(Debug)]
pub struct TopUpLedger<'c> {
    companies: &'c [Company],
    /// company id -> position in `companies` and `aggregates`
    positions: HashMap<i64, usize>,
    aggregates: Vec<CompanyAggregate>,
}

impl<'c> TopUpLedger<'c> {
    /// Indexes companies by id with empty aggregates.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCompany` if two companies share an id.
    pub fn index(companies: &'c [Company]) -> AggregateResult<Self> {
        let mut positions = HashMap::with_capacity(companies.len());
        let mut aggregates = Vec::with_capacity(companies.len());

        for (position, company) in companies.iter().enumerate() {
            if positions.insert(company.id, position).is_some() {
                return Err(AggregateError::DuplicateCompany(company.id));
            }
            aggregates.push(CompanyAggregate::empty(company.id, company.display_name()));
        }

        Ok(Self {
            companies,
            positions,
            aggregates,
        })
    }

    /// Credits one user to its company and files it as emailed or not.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCompany` if the user's company was never indexed,
    /// `MissingTerms` if that company lacks `top_up` or `email_status`,
    /// `Overflow` if a balance or the company total leaves the i64 range.
    pub fn credit(mut self, user: User) -> AggregateResult<Self> {
        let position = *self.positions.get(&user.company_id).ok_or(
            AggregateError::UnknownCompany {
                user_id: user.id,
                company_id: user.company_id,
            },
        )?;
        let company = &self.companies[position];
        let missing = |key| AggregateError::MissingTerms {
            company_id: company.id,
            key,
        };
        let top_up = company.top_up.ok_or_else(|| missing("top_up"))?;
        let company_emails = company.email_status.ok_or_else(|| missing("email_status"))?;
        let overflow = AggregateError::Overflow {
            company_id: company.id,
        };

        let tokens_updated = user
            .tokens
            .checked_add(top_up)
            .ok_or_else(|| overflow.clone())?;

        let entry = &mut self.aggregates[position];
        entry.total_top_ups = entry
            .total_top_ups
            .checked_add(top_up)
            .ok_or(overflow)?;

        let emailed = company_emails && user.email_status;
        let credited = CreditedUser {
            user,
            tokens_updated,
        };
        if emailed {
            entry.users_emailed.push(credited);
        } else {
            entry.users_not_emailed.push(credited);
        }

        Ok(self)
    }

    /// Returns the aggregates in company order
    pub fn finish(self) -> Vec<CompanyAggregate> {
        self.aggregates
    }
}

/// Joins users to companies and computes per-company top-ups.
///
/// Output follows the order of `companies`. Within each company, users keep
/// the order of `users`. Every user must reference an indexed company; the
/// pipeline filters unmatched users before calling this.
pub fn aggregate(users: Vec<User>, companies: &[Company]) -> AggregateResult<Vec<CompanyAggregate>> {
    let ledger = TopUpLedger::index(companies)?;
    let ledger = users.into_iter().try_fold(ledger, TopUpLedger::credit)?;
    Ok(ledger.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(id: i64, top_up: i64, email_status: bool) -> Company {
        Company {
            id,
            name: Some(format!("Company {}", id)),
            top_up: Some(top_up),
            email_status: Some(email_status),
        }
    }

    fn user(id: i64, company_id: i64, last_name: &str, email_status: bool, tokens: i64) -> User {
        User {
            id,
            first_name: "First".into(),
            last_name: last_name.into(),
            email: format!("user{}@test.com", id),
            company_id,
            email_status,
            active_status: true,
            tokens,
        }
    }

    #[test]
    fn test_single_company_single_user() {
        let companies = vec![company(1, 5, true)];
        let users = vec![user(1, 1, "Doe", true, 10)];

        let result = aggregate(users, &companies).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].users_emailed.len(), 1);
        assert_eq!(result[0].users_emailed[0].tokens_updated, 15);
        assert_eq!(result[0].users_emailed[0].tokens(), 10);
        assert!(result[0].users_not_emailed.is_empty());
        assert_eq!(result[0].total_top_ups, 5);
    }

    #[test]
    fn test_total_is_per_joined_user() {
        let companies = vec![company(1, 7, true)];
        let users = vec![
            user(1, 1, "A", true, 0),
            user(2, 1, "B", false, 0),
            user(3, 1, "C", true, 0),
        ];

        let result = aggregate(users, &companies).unwrap();
        assert_eq!(result[0].total_top_ups, 21);
        assert_eq!(result[0].joined_count(), 3);
    }

    #[test]
    fn test_company_without_email_sends_nobody_to_emailed() {
        let companies = vec![company(1, 1, false)];
        let users = vec![user(1, 1, "A", true, 0), user(2, 1, "B", false, 0)];

        let result = aggregate(users, &companies).unwrap();
        assert!(result[0].users_emailed.is_empty());
        assert_eq!(result[0].users_not_emailed.len(), 2);
    }

    #[test]
    fn test_user_opt_out_is_not_emailed() {
        let companies = vec![company(1, 1, true)];
        let users = vec![user(1, 1, "A", false, 0)];

        let result = aggregate(users, &companies).unwrap();
        assert!(result[0].users_emailed.is_empty());
        assert_eq!(result[0].users_not_emailed[0].user.id, 1);
    }

    #[test]
    fn test_company_order_and_empty_companies_kept() {
        let companies = vec![company(3, 1, true), company(1, 1, true), company(2, 1, true)];
        let users = vec![user(1, 1, "A", true, 0)];

        let result = aggregate(users, &companies).unwrap();
        let ids: Vec<i64> = result.iter().map(|a| a.company_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(result[0].total_top_ups, 0);
        assert_eq!(result[0].joined_count(), 0);
    }

    #[test]
    fn test_user_order_preserved_within_partition() {
        let companies = vec![company(1, 1, true)];
        let users = vec![
            user(1, 1, "Zed", true, 0),
            user(2, 1, "Amy", true, 0),
            user(3, 1, "Moe", true, 0),
        ];

        let result = aggregate(users, &companies).unwrap();
        let names: Vec<&str> = result[0]
            .users_emailed
            .iter()
            .map(|u| u.user.last_name.as_str())
            .collect();
        assert_eq!(names, vec!["Zed", "Amy", "Moe"]);
    }

    #[test]
    fn test_unknown_company_is_checked() {
        let companies = vec![company(1, 1, true)];
        let users = vec![user(9, 42, "A", true, 0)];

        let err = aggregate(users, &companies).unwrap_err();
        assert_eq!(
            err,
            AggregateError::UnknownCompany {
                user_id: 9,
                company_id: 42
            }
        );
        assert_eq!(err.code(), "TOPUP_AGGREGATE_UNKNOWN_COMPANY");
    }

    #[test]
    fn test_duplicate_company_rejected() {
        let companies = vec![company(1, 1, true), company(1, 2, false)];
        let err = aggregate(Vec::new(), &companies).unwrap_err();
        assert_eq!(err, AggregateError::DuplicateCompany(1));
    }

    #[test]
    fn test_overflow_rejected() {
        let companies = vec![company(1, 1, true)];
        let users = vec![user(1, 1, "A", true, i64::MAX)];

        let err = aggregate(users, &companies).unwrap_err();
        assert_eq!(err, AggregateError::Overflow { company_id: 1 });
    }

    #[test]
    fn test_negative_top_up_applied() {
        let companies = vec![company(1, -4, true)];
        let users = vec![user(1, 1, "A", true, 10), user(2, 1, "B", true, 1)];

        let result = aggregate(users, &companies).unwrap();
        assert_eq!(result[0].users_emailed[0].tokens_updated, 6);
        assert_eq!(result[0].users_emailed[1].tokens_updated, -3);
        assert_eq!(result[0].total_top_ups, -8);
    }

    #[test]
    fn test_no_companies_no_users() {
        assert!(aggregate(Vec::new(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_company_without_terms_listed_when_unjoined() {
        let companies = vec![Company {
            id: 5,
            name: None,
            top_up: None,
            email_status: None,
        }];

        let result = aggregate(Vec::new(), &companies).unwrap();
        assert_eq!(result[0].company_name, "");
        assert_eq!(result[0].total_top_ups, 0);
    }

    #[test]
    fn test_joined_company_needs_terms() {
        let mut bare = company(1, 1, true);
        bare.top_up = None;
        let err = aggregate(vec![user(1, 1, "A", true, 0)], &[bare]).unwrap_err();
        assert_eq!(
            err,
            AggregateError::MissingTerms {
                company_id: 1,
                key: "top_up"
            }
        );
        assert_eq!(err.code(), "TOPUP_AGGREGATE_MISSING_TERMS");

        let mut bare = company(1, 1, true);
        bare.email_status = None;
        let err = aggregate(vec![user(1, 1, "A", true, 0)], &[bare]).unwrap_err();
        assert_eq!(
            err,
            AggregateError::MissingTerms {
                company_id: 1,
                key: "email_status"
            }
        );
    }
}
