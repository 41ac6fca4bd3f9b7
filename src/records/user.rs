//! User record and its credited form

use serde_json::Value;

use super::fields::{elements, RecordContext};
use crate::schema::{Entity, SchemaResult};

/// A user holding a token balance with one company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Foreign key into `Company::id`; may reference no company
    pub company_id: i64,
    /// User's own email opt-in
    pub email_status: bool,
    pub active_status: bool,
    /// Balance before this run's top-up
    pub tokens: i64,
}

impl User {
    /// Decodes one user from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails with NotAnObject, MissingKey or IllegalValue.
    pub fn from_value(value: &Value, source: &str, index: usize) -> SchemaResult<Self> {
        let ctx = RecordContext {
            entity: Entity::User,
            source,
            index,
        };
        let record = ctx.object(value)?;

        Ok(Self {
            id: ctx.int(record, "id")?,
            first_name: ctx.string(record, "first_name")?,
            last_name: ctx.string(record, "last_name")?,
            email: ctx.string(record, "email")?,
            company_id: ctx.int(record, "company_id")?,
            email_status: ctx.bool(record, "email_status")?,
            active_status: ctx.bool(record, "active_status")?,
            tokens: ctx.int(record, "tokens")?,
        })
    }
}

/// The fields a user filter looks at, read from a raw record.
///
/// Absent keys read as `None`; a present value of the wrong type is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMembership {
    pub company_id: Option<i64>,
    pub active_status: Option<bool>,
}

impl UserMembership {
    /// Reads `company_id` and `active_status` from one user record
    pub fn from_value(value: &Value, source: &str, index: usize) -> SchemaResult<Self> {
        let ctx = RecordContext {
            entity: Entity::User,
            source,
            index,
        };
        let record = ctx.object(value)?;

        Ok(Self {
            company_id: ctx.opt_int(record, "company_id")?,
            active_status: ctx.opt_bool(record, "active_status")?,
        })
    }
}

/// A user after the company top-up has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditedUser {
    pub user: User,
    /// `user.tokens` plus the company's top-up
    pub tokens_updated: i64,
}

impl CreditedUser {
    /// Previous balance
    pub fn tokens(&self) -> i64 {
        self.user.tokens
    }
}

/// Decodes the users whose membership passes `keep`, in document order.
///
/// Records that `keep` rejects are never decoded past their membership
/// fields, so they may lack any other field.
pub fn decode_users_where(
    records: &Value,
    source: &str,
    keep: impl Fn(&UserMembership) -> bool,
) -> SchemaResult<Vec<User>> {
    let mut users = Vec::new();
    for (index, value) in elements(Entity::User, records, source)?.iter().enumerate() {
        if keep(&UserMembership::from_value(value, source, index)?) {
            users.push(User::from_value(value, source, index)?);
        }
    }
    Ok(users)
}
