//! Record schema definitions
//!
//! Supported field types:
//! - int: JSON number representable as a 64-bit integer
//! - string: UTF-8 string
//! - bool: Boolean

use serde_json::Value;
use std::fmt;

/// Field types a record schema can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 64-bit integer (floats such as `1.0` do not qualify)
    Int,
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::String => "string",
            FieldType::Bool => "bool",
        }
    }

    /// Checks whether a JSON value has this type. No coercion.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::Int => value.is_i64() || value.is_u64(),
            FieldType::String => value.is_string(),
            FieldType::Bool => value.is_boolean(),
        }
    }
}

/// The two record kinds the pipeline ingests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Company,
    User,
}

impl Entity {
    /// Returns the lowercase entity name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Company => "company",
            Entity::User => "user",
        }
    }

    /// Returns the schema for this entity
    pub fn schema(&self) -> &'static RecordSchema {
        match self {
            Entity::Company => &COMPANY_SCHEMA,
            Entity::User => &USER_SCHEMA,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Permitted keys of one record kind and the type each must carry
#[derive(Debug)]
pub struct RecordSchema {
    pub entity: Entity,
    pub fields: &'static [(&'static str, FieldType)],
}

impl RecordSchema {
    /// Returns the required type of a permitted key, or `None` if the key is not permitted
    pub fn field_type(&self, key: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, field_type)| *field_type)
    }
}

pub static COMPANY_SCHEMA: RecordSchema = RecordSchema {
    entity: Entity::Company,
    fields: &[
        ("id", FieldType::Int),
        ("name", FieldType::String),
        ("top_up", FieldType::Int),
        ("email_status", FieldType::Bool),
    ],
};

pub static USER_SCHEMA: RecordSchema = RecordSchema {
    entity: Entity::User,
    fields: &[
        ("id", FieldType::Int),
        ("first_name", FieldType::String),
        ("last_name", FieldType::String),
        ("email", FieldType::String),
        ("company_id", FieldType::Int),
        ("email_status", FieldType::Bool),
        ("active_status", FieldType::Bool),
        ("tokens", FieldType::Int),
    ],
};
