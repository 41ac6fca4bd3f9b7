//! Aggregation Law Tests
//!
//! Properties that hold for any input:
//! - total_top_ups == joined users * top_up
//! - tokens_updated == tokens + top_up
//! - emailed + not emailed == joined users, split by the email conjunction
//! - company order ascending, user order (company_id, last_name)
//! - unmatched and (strict) inactive users never appear

use proptest::prelude::*;
use topup_report::aggregate::aggregate;
use topup_report::pipeline::{build_aggregation, sort_companies, UserFilter};
use topup_report::records::{Company, User};

// =============================================================================
// Strategies
// =============================================================================

fn company_strategy(id: i64) -> impl Strategy<Value = Company> {
    (-1_000i64..1_000, any::<bool>()).prop_map(move |(top_up, email_status)| Company {
        id,
        name: Some(format!("Company {}", id)),
        top_up: Some(top_up),
        email_status: Some(email_status),
    })
}

fn companies_strategy() -> impl Strategy<Value = Vec<Company>> {
    proptest::collection::btree_set(0i64..20, 0..6)
        .prop_flat_map(|ids| {
            ids.into_iter()
                .map(company_strategy)
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn users_strategy() -> impl Strategy<Value = Vec<User>> {
    proptest::collection::vec(
        (
            0i64..25,
            "[A-Za-z]{1,6}",
            any::<bool>(),
            any::<bool>(),
            -10_000i64..10_000,
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (company_id, last_name, email_status, active_status, tokens))| User {
                id: i as i64,
                first_name: "First".into(),
                last_name,
                email: format!("user{}@test.com", i),
                company_id,
                email_status,
                active_status,
                tokens,
            })
            .collect()
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_single_company_totals(
        top_up in -1_000i64..1_000,
        email_status in any::<bool>(),
        balances in proptest::collection::vec(-10_000i64..10_000, 0..30),
    ) {
        let companies = vec![Company {
            id: 1,
            name: Some("A".into()),
            top_up: Some(top_up),
            email_status: Some(email_status),
        }];
        let users: Vec<User> = balances
            .iter()
            .enumerate()
            .map(|(i, tokens)| User {
                id: i as i64,
                first_name: "F".into(),
                last_name: "L".into(),
                email: "f@l.com".into(),
                company_id: 1,
                email_status: i % 2 == 0,
                active_status: true,
                tokens: *tokens,
            })
            .collect();

        let result = aggregate(users, &companies).unwrap();
        let a = &result[0];

        prop_assert_eq!(a.total_top_ups, balances.len() as i64 * top_up);
        for credited in a.users_emailed.iter().chain(&a.users_not_emailed) {
            prop_assert_eq!(credited.tokens_updated, credited.user.tokens + top_up);
        }
    }

    #[test]
    fn prop_partition_and_filtering(
        mut companies in companies_strategy(),
        users in users_strategy(),
        strict_mode in any::<bool>(),
    ) {
        sort_companies(&mut companies);
        let selection = UserFilter::new(&companies, strict_mode).apply(users.clone());
        let aggregation = build_aggregation(&companies, selection).unwrap();

        prop_assert_eq!(aggregation.aggregates.len(), companies.len());

        let mut reported = 0;
        for (aggregate, company) in aggregation.aggregates.iter().zip(&companies) {
            prop_assert_eq!(aggregate.company_id, company.id);
            let top_up = company.top_up.unwrap();
            let company_emails = company.email_status.unwrap();

            let joined = users
                .iter()
                .filter(|u| u.company_id == company.id && (!strict_mode || u.active_status))
                .count();
            prop_assert_eq!(aggregate.joined_count(), joined);
            prop_assert_eq!(aggregate.total_top_ups, joined as i64 * top_up);

            for credited in &aggregate.users_emailed {
                prop_assert!(company_emails && credited.user.email_status);
            }
            for credited in &aggregate.users_not_emailed {
                prop_assert!(!(company_emails && credited.user.email_status));
                prop_assert!(!strict_mode || credited.user.active_status);
            }

            for list in [&aggregate.users_emailed, &aggregate.users_not_emailed] {
                for pair in list.windows(2) {
                    prop_assert!(pair[0].user.last_name <= pair[1].user.last_name);
                }
            }
            reported += joined;
        }

        prop_assert_eq!(aggregation.users_reported(), reported);
        prop_assert_eq!(aggregation.users_loaded, users.len());
    }

    #[test]
    fn prop_companies_ascending(mut companies in companies_strategy()) {
        sort_companies(&mut companies);
        let result = aggregate(Vec::new(), &companies).unwrap();
        for pair in result.windows(2) {
            prop_assert!(pair[0].company_id < pair[1].company_id);
        }
    }
}
