//! Schema validator for raw company and user documents
//!
//! Validation semantics:
//! - The document root is an array
//! - Every element is an object
//! - Every key present is permitted for the entity
//! - Every permitted key present carries a value of the required type
//!
//! Absent keys are accepted here. Typed decoding in `records` enforces presence.
//! The first violation aborts validation; violations are not accumulated.

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::types::{Entity, RecordSchema};

/// Validator bound to the schema of one entity.
///
/// Validator does not mutate documents.
/// Keys are checked in the record's insertion order, so the reported
/// violation is deterministic for a given document.
pub struct SchemaValidator {
    schema: &'static RecordSchema,
}

impl SchemaValidator {
    /// Creates a validator for the given entity
    pub fn for_entity(entity: Entity) -> Self {
        Self {
            schema: entity.schema(),
        }
    }

    /// Returns the entity this validator checks
    pub fn entity(&self) -> Entity {
        self.schema.entity
    }

    /// Validates a whole document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if:
    /// - The document is not an array (NotAnArray)
    /// - An element is not an object (NotAnObject)
    /// - A key is outside the permitted set (IllegalKey)
    /// - A permitted key has a value of the wrong type (IllegalValue)
    pub fn validate_records(&self, records: &Value, source: &str) -> SchemaResult<()> {
        let elements = records
            .as_array()
            .ok_or_else(|| SchemaError::not_an_array(self.entity(), source))?;

        for (index, element) in elements.iter().enumerate() {
            let record = element
                .as_object()
                .ok_or_else(|| SchemaError::not_an_object(self.entity(), source, index))?;
            self.validate_record(record, source, index)?;
        }

        Ok(())
    }

    /// Validates one record's keys and value types.
    fn validate_record(
        &self,
        record: &Map<String, Value>,
        source: &str,
        index: usize,
    ) -> SchemaResult<()> {
        for (key, value) in record {
            let field_type = self
                .schema
                .field_type(key)
                .ok_or_else(|| SchemaError::illegal_key(self.entity(), source, index, key))?;

            if !field_type.matches(value) {
                return Err(SchemaError::illegal_value(self.entity(), source, index, key, field_type));
            }
        }

        Ok(())
    }
}

/// Validates a companies document
pub fn validate_companies(records: &Value, source: &str) -> SchemaResult<()> {
    SchemaValidator::for_entity(Entity::Company).validate_records(records, source)
}

/// Validates a users document
pub fn validate_users(records: &Value, source: &str) -> SchemaResult<()> {
    SchemaValidator::for_entity(Entity::User).validate_records(records, source)
}
