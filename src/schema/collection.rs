//! Raw column collection and document-level validation
//!
//! A document is either a list of column declarations or a mapping with
//! a `raw_columns` list. Validation is all-or-nothing: the first error in
//! any declaration, or a duplicate name across declarations, rejects the
//! whole document.

use std::collections::HashSet;

use serde_json::Value;

use super::column::{Column, RawColumn, ResourceKind};
use super::dispatcher::VariantDispatcher;
use super::errors::{SchemaError, SchemaResult};
use super::field::json_type_name;
use super::registry::{VariantRegistry, RAW_COLUMN_REGISTRY};

/// Key holding the column list when the document is a mapping
pub const RAW_COLUMNS_KEY: &str = "raw_columns";

/// Ordered, name-unique set of raw columns.
///
/// Only constructed through validation, so every instance satisfies the
/// uniqueness invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumns {
    columns: Vec<RawColumn>,
}

impl RawColumns {
    /// Wraps already-dispatched columns after checking names are unique.
    pub fn new(columns: Vec<RawColumn>) -> SchemaResult<Self> {
        validate_collection(&columns)?;
        Ok(Self { columns })
    }

    /// Dispatches each record, then checks the collection.
    pub fn from_records(records: &[Value], registry: &VariantRegistry) -> SchemaResult<Self> {
        let dispatcher = VariantDispatcher::new(registry);
        let columns = records
            .iter()
            .enumerate()
            .map(|(i, record)| dispatcher.dispatch(record).map_err(|e| e.at_index(i)))
            .collect::<SchemaResult<Vec<_>>>()?;
        Self::new(columns)
    }

    /// Names in input order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a RawColumns {
    type Item = &'a RawColumn;
    type IntoIter = std::slice::Iter<'a, RawColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Checks collection-wide invariants: names must be pairwise distinct.
///
/// Reports the first name whose repeat is reached scanning left to right.
pub fn validate_collection<C: Column>(columns: &[C]) -> SchemaResult<()> {
    match find_duplicate(columns.iter().map(|c| c.name())) {
        Some((index, name)) => {
            let kind = columns
                .get(index)
                .map_or(ResourceKind::RawColumn, |c| c.resource_kind());
            Err(SchemaError::duplicate_name(name, kind).at_index(index))
        }
        None => Ok(()),
    }
}

/// Position and value of the first repeated name.
fn find_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<(usize, &'a str)> {
    let mut seen = HashSet::new();
    names.enumerate().find(|(_, name)| !seen.insert(*name))
}

/// Validates a whole decoded document against the raw column registry.
pub fn validate_document(document: &Value) -> SchemaResult<RawColumns> {
    let records = column_records(document)?;
    RawColumns::from_records(records, &RAW_COLUMN_REGISTRY)
}

fn column_records(document: &Value) -> SchemaResult<&[Value]> {
    match document {
        Value::Array(records) => Ok(records.as_slice()),
        Value::Object(map) => match map.get(RAW_COLUMNS_KEY) {
            Some(Value::Array(records)) => Ok(records.as_slice()),
            Some(Value::Null) | None => Ok(&[]),
            Some(other) => Err(SchemaError::malformed_document(format!(
                "'{}' must be a list, got {}",
                RAW_COLUMNS_KEY,
                json_type_name(other)
            ))),
        },
        other => Err(SchemaError::malformed_document(format!(
            "document must be a list of columns or a mapping with '{}', got {}",
            RAW_COLUMNS_KEY,
            json_type_name(other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::SchemaErrorCode;
    use serde_json::json;

    #[test]
    fn test_names_preserve_order() {
        let columns = validate_document(&json!([
            {"name": "zeta", "type": "STRING_COLUMN"},
            {"name": "alpha", "type": "INT_COLUMN"},
            {"name": "mid", "type": "FLOAT_COLUMN"}
        ]))
        .unwrap();

        assert_eq!(columns.names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_duplicate_across_variants() {
        let err = validate_document(&json!([
            {"name": "x", "type": "STRING_COLUMN"},
            {"name": "x", "type": "INT_COLUMN"}
        ]))
        .unwrap_err();

        assert_eq!(err.code(), SchemaErrorCode::DuplicateName);
        assert_eq!(err.column_name(), Some("x"));
        assert_eq!(err.column_index(), Some(1));
    }

    #[test]
    fn test_first_duplicate_reported() {
        let err = validate_document(&json!([
            {"name": "a", "type": "INT_COLUMN"},
            {"name": "b", "type": "INT_COLUMN"},
            {"name": "b", "type": "INT_COLUMN"},
            {"name": "a", "type": "INT_COLUMN"}
        ]))
        .unwrap_err();

        assert_eq!(err.column_name(), Some("b"));
    }

    #[test]
    fn test_field_error_carries_index() {
        let err = validate_document(&json!([
            {"name": "ok", "type": "INT_COLUMN"},
            {"name": "bad", "type": "INT_COLUMN", "min": "zero"}
        ]))
        .unwrap_err();

        assert_eq!(err.column_index(), Some(1));
        assert_eq!(err.column_name(), Some("bad"));
        assert_eq!(err.field(), Some("min"));
    }

    #[test]
    fn test_mapping_document() {
        let columns = validate_document(&json!({
            "raw_columns": [{"name": "a", "type": "INT_COLUMN"}]
        }))
        .unwrap();
        assert!(columns.get("a").is_some());
        assert!(columns.get("b").is_none());

        let empty = validate_document(&json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = validate_document(&json!("columns")).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedDocument);

        let err = validate_document(&json!({"raw_columns": {"a": 1}})).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedDocument);
    }

    #[test]
    fn test_duplicate_detection_is_deterministic() {
        let doc = json!([
            {"name": "q", "type": "INT_COLUMN"},
            {"name": "p", "type": "INT_COLUMN"},
            {"name": "q", "type": "FLOAT_COLUMN"},
            {"name": "p", "type": "FLOAT_COLUMN"}
        ]);
        for _ in 0..50 {
            let err = validate_document(&doc).unwrap_err();
            assert_eq!(err.column_name(), Some("q"));
        }
    }
}
