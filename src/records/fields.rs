//! Field readers shared by the record decoders

use serde_json::{Map, Value};

use crate::schema::{Entity, FieldType, SchemaError, SchemaResult};

/// Location of the record being decoded, carried into errors
pub(crate) struct RecordContext<'a> {
    pub entity: Entity,
    pub source: &'a str,
    pub index: usize,
}

impl<'a> RecordContext<'a> {
    /// Returns the record as an object
    pub fn object<'v>(&self, value: &'v Value) -> SchemaResult<&'v Map<String, Value>> {
        value
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object(self.entity, self.source, self.index))
    }

    fn field<'v>(&self, record: &'v Map<String, Value>, key: &str) -> SchemaResult<&'v Value> {
        record
            .get(key)
            .ok_or_else(|| SchemaError::missing_key(self.entity, self.source, self.index, key))
    }

    fn illegal(&self, key: &str, expected: FieldType) -> SchemaError {
        SchemaError::illegal_value(self.entity, self.source, self.index, key, expected)
    }

    pub fn int(&self, record: &Map<String, Value>, key: &str) -> SchemaResult<i64> {
        self.field(record, key)?
            .as_i64()
            .ok_or_else(|| self.illegal(key, FieldType::Int))
    }

    pub fn string(&self, record: &Map<String, Value>, key: &str) -> SchemaResult<String> {
        self.field(record, key)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.illegal(key, FieldType::String))
    }

    pub fn bool(&self, record: &Map<String, Value>, key: &str) -> SchemaResult<bool> {
        self.field(record, key)?
            .as_bool()
            .ok_or_else(|| self.illegal(key, FieldType::Bool))
    }

    /// Like `int`, but an absent key reads as `None`
    pub fn opt_int(&self, record: &Map<String, Value>, key: &str) -> SchemaResult<Option<i64>> {
        record
            .get(key)
            .map(|value| value.as_i64().ok_or_else(|| self.illegal(key, FieldType::Int)))
            .transpose()
    }

    pub fn opt_string(&self, record: &Map<String, Value>, key: &str) -> SchemaResult<Option<String>> {
        record
            .get(key)
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| self.illegal(key, FieldType::String))
            })
            .transpose()
    }

    pub fn opt_bool(&self, record: &Map<String, Value>, key: &str) -> SchemaResult<Option<bool>> {
        record
            .get(key)
            .map(|value| value.as_bool().ok_or_else(|| self.illegal(key, FieldType::Bool)))
            .transpose()
    }
}

/// Returns the elements of a document, which must be an array
pub(crate) fn elements<'v>(
    entity: Entity,
    records: &'v Value,
    source: &str,
) -> SchemaResult<&'v [Value]> {
    records
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| SchemaError::not_an_array(entity, source))
}

/// Decodes every element of a document with the given record decoder
pub(crate) fn decode_all<T>(
    entity: Entity,
    records: &Value,
    source: &str,
    decode: impl Fn(&Value, &str, usize) -> SchemaResult<T>,
) -> SchemaResult<Vec<T>> {
    elements(entity, records, source)?
        .iter()
        .enumerate()
        .map(|(index, value)| decode(value, source, index))
        .collect()
}
