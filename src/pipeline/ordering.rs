//! Filtering and sorting applied before aggregation
//!
//! Sorts are stable, so records with equal keys keep document order.

use std::collections::HashSet;

use serde_json::Value;

use crate::records::{decode_users_where, Company, User, UserMembership};
use crate::schema::SchemaResult;

/// Users that passed a filter, with the number they were chosen from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSelection {
    /// Kept users, in document order
    pub users: Vec<User>,
    pub loaded: usize,
}

impl UserSelection {
    /// Users the filter removed
    pub fn dropped(&self) -> usize {
        self.loaded - self.users.len()
    }
}

/// Decides which users take part in aggregation
pub struct UserFilter {
    known_company_ids: HashSet<i64>,
    require_active: bool,
}

impl UserFilter {
    /// Builds a filter over the given companies.
    ///
    /// With `require_active`, inactive users are dropped as well.
    pub fn new(companies: &[Company], require_active: bool) -> Self {
        Self {
            known_company_ids: companies.iter().map(|c| c.id).collect(),
            require_active,
        }
    }

    /// Checks a raw record's membership fields.
    ///
    /// An absent `company_id` matches no company; an absent `active_status`
    /// counts as inactive.
    pub fn admits(&self, membership: &UserMembership) -> bool {
        membership
            .company_id
            .map_or(false, |id| self.known_company_ids.contains(&id))
            && (!self.require_active || membership.active_status == Some(true))
    }

    /// Checks if a user references a known company and passes the active check
    pub fn matches(&self, user: &User) -> bool {
        self.admits(&UserMembership {
            company_id: Some(user.company_id),
            active_status: Some(user.active_status),
        })
    }

    /// Keeps matching users, preserving order
    pub fn apply(&self, users: Vec<User>) -> UserSelection {
        let loaded = users.len();
        let users = users.into_iter().filter(|u| self.matches(u)).collect();
        UserSelection { users, loaded }
    }

    /// Filters a raw users document, decoding only the users it keeps
    pub fn select(&self, records: &Value, source: &str) -> SchemaResult<UserSelection> {
        let users = decode_users_where(records, source, |m| self.admits(m))?;
        let loaded = records.as_array().map_or(0, Vec::len);
        Ok(UserSelection { users, loaded })
    }
}

/// Sorts companies ascending by id
pub fn sort_companies(companies: &mut [Company]) {
    companies.sort_by_key(|c| c.id);
}

/// Sorts users ascending by `(company_id, last_name)`.
///
/// Last names compare as plain strings, byte-wise.
pub fn sort_users(users: &mut [User]) {
    users.sort_by(|a, b| {
        a.company_id
            .cmp(&b.company_id)
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
}
