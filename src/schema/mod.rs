//! Schema Validator subsystem
//!
//! Checks raw JSON documents against the company and user record schemas
//! before anything else touches them.
//!
//! # Rules
//!
//! - Document root must be an array of objects
//! - Only permitted keys may appear
//! - Present keys must carry the exact type, no coercion
//! - Absent keys are not reported here
//! - First violation wins

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use types::{Entity, FieldType, RecordSchema, COMPANY_SCHEMA, USER_SCHEMA};
pub use validator::{validate_companies, validate_users, SchemaValidator};
