//! Schema error types
//!
//! Error codes:
//! - TOPUP_SCHEMA_NOT_AN_ARRAY
//! - TOPUP_SCHEMA_NOT_AN_OBJECT
//! - TOPUP_SCHEMA_ILLEGAL_KEY
//! - TOPUP_SCHEMA_ILLEGAL_VALUE
//! - TOPUP_SCHEMA_MISSING_KEY

use std::fmt;

use super::types::{Entity, FieldType};

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Document root is not a JSON array
    NotAnArray,
    /// Array element is not a JSON object
    NotAnObject,
    /// Record carries a key outside the permitted set
    IllegalKey,
    /// Permitted key carries a value of the wrong type
    IllegalValue,
    /// Record lacks a field needed to build a typed record
    MissingKey,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::NotAnArray => "TOPUP_SCHEMA_NOT_AN_ARRAY",
            SchemaErrorCode::NotAnObject => "TOPUP_SCHEMA_NOT_AN_OBJECT",
            SchemaErrorCode::IllegalKey => "TOPUP_SCHEMA_ILLEGAL_KEY",
            SchemaErrorCode::IllegalValue => "TOPUP_SCHEMA_ILLEGAL_VALUE",
            SchemaErrorCode::MissingKey => "TOPUP_SCHEMA_MISSING_KEY",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with the location of the offending record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    entity: Entity,
    /// Label of the document the records came from
    source_label: String,
    /// Position of the record within the document
    index: Option<usize>,
    key: Option<String>,
}

impl SchemaError {
    /// Document root is not an array
    pub fn not_an_array(entity: Entity, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            code: SchemaErrorCode::NotAnArray,
            message: format!("not an array: '{}' does not hold a JSON array of {} records", source, entity),
            entity,
            source_label: source,
            index: None,
            key: None,
        }
    }

    /// Element of the array is not an object
    pub fn not_an_object(entity: Entity, source: impl Into<String>, index: usize) -> Self {
        let source = source.into();
        Self {
            code: SchemaErrorCode::NotAnObject,
            message: format!("not an object: {} record {} in '{}'", entity, index, source),
            entity,
            source_label: source,
            index: Some(index),
            key: None,
        }
    }

    /// Key outside the permitted set
    pub fn illegal_key(
        entity: Entity,
        source: impl Into<String>,
        index: usize,
        key: impl Into<String>,
    ) -> Self {
        Self::keyed(SchemaErrorCode::IllegalKey, "illegal key", "", entity, source, index, key)
    }

    /// Permitted key with a value of the wrong type
    pub fn illegal_value(
        entity: Entity,
        source: impl Into<String>,
        index: usize,
        key: impl Into<String>,
        expected: FieldType,
    ) -> Self {
        Self::keyed(
            SchemaErrorCode::IllegalValue,
            "illegal value for key",
            &format!(", expected {}", expected.type_name()),
            entity,
            source,
            index,
            key,
        )
    }

    /// Field absent when building a typed record
    pub fn missing_key(
        entity: Entity,
        source: impl Into<String>,
        index: usize,
        key: impl Into<String>,
    ) -> Self {
        Self::keyed(SchemaErrorCode::MissingKey, "missing key", "", entity, source, index, key)
    }

    fn keyed(
        code: SchemaErrorCode,
        prefix: &str,
        detail: &str,
        entity: Entity,
        source: impl Into<String>,
        index: usize,
        key: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let key = key.into();
        Self {
            code,
            message: format!(
                "{}: {}{} ({} record {} in '{}')",
                prefix, key, detail, entity, index, source
            ),
            entity,
            source_label: source,
            index: Some(index),
            key: Some(key),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the entity whose record failed
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Returns the label of the source document
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Returns the record index, if the error concerns one record
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the offending key, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
