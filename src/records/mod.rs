//! Typed company and user records
//!
//! Records are decoded from raw JSON values. A decoded user carries every
//! field; a company needs only its id. Values of the wrong type are errors
//! and unknown keys are left to the schema validator.

mod company;
mod fields;
mod user;

pub use company::{decode_companies, Company};
pub use user::{decode_users_where, CreditedUser, User, UserMembership};
