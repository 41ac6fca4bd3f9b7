//! Company record

use serde_json::Value;

use super::fields::{decode_all, RecordContext};
use crate::schema::{Entity, SchemaResult};

/// A company granting token top-ups to its users.
///
/// Only `id` is required. The other fields may be absent from a record; the
/// top-up terms are needed once a user joins the company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
    pub name: Option<String>,
    /// Amount credited to each joined user per run
    pub top_up: Option<i64>,
    /// Whether the company permits emailing its users
    pub email_status: Option<bool>,
}

impl Company {
    /// Decodes one company from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails with NotAnObject, MissingKey (for `id`) or IllegalValue.
    pub fn from_value(value: &Value, source: &str, index: usize) -> SchemaResult<Self> {
        let ctx = RecordContext {
            entity: Entity::Company,
            source,
            index,
        };
        let record = ctx.object(value)?;

        Ok(Self {
            id: ctx.int(record, "id")?,
            name: ctx.opt_string(record, "name")?,
            top_up: ctx.opt_int(record, "top_up")?,
            email_status: ctx.opt_bool(record, "email_status")?,
        })
    }

    /// Name as printed in the report; empty when the record has none
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Decodes a companies document into typed records, in document order
pub fn decode_companies(records: &Value, source: &str) -> SchemaResult<Vec<Company>> {
    decode_all(Entity::Company, records, source, Company::from_value)
}
