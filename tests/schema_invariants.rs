//! Schema Invariant Tests
//!
//! Tests for raw column validation invariants:
//! - Valid documents keep input order
//! - Names are unique across the whole collection, regardless of variant
//! - Required fields fail when absent, booleans default to false
//! - min must not exceed max
//! - Null value lists are unrestricted, empty value lists permit nothing
//! - Validation is deterministic and all-or-nothing

use rawcol::schema::{
    validate_document, Column, ColumnType, RawColumn, RawColumns, ResourceKind, Rule,
    SchemaErrorCode, ValueSet, VariantDispatcher, RAW_COLUMN_REGISTRY,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn dispatch(record: Value) -> RawColumn {
    VariantDispatcher::new(&RAW_COLUMN_REGISTRY)
        .dispatch(&record)
        .unwrap()
}

fn sample_document() -> Value {
    json!([
        {"name": "user_id", "type": "STRING_COLUMN", "required": true},
        {"name": "age", "type": "INT_COLUMN", "min": 0, "max": 120},
        {"name": "score", "type": "FLOAT_COLUMN", "values": [0.5, 1.0]},
        {"name": "country", "type": "STRING_COLUMN", "values": ["NZ", "AU"]}
    ])
}

// =============================================================================
// Collection Tests
// =============================================================================

/// Names come back in input order.
#[test]
fn test_valid_document_preserves_order() {
    let columns = validate_document(&sample_document()).unwrap();
    assert_eq!(columns.names(), vec!["user_id", "age", "score", "country"]);
}

/// Every column reports the raw column resource kind.
#[test]
fn test_resource_kind_is_constant() {
    let columns = validate_document(&sample_document()).unwrap();
    for column in columns.iter() {
        assert_eq!(column.resource_kind(), ResourceKind::RawColumn);
        assert!(column.is_raw());
    }
}

/// Same name under different variants is still a duplicate.
#[test]
fn test_duplicate_name_across_variants() {
    let doc = json!([
        {"name": "x", "type": "STRING_COLUMN"},
        {"name": "x", "type": "INT_COLUMN"}
    ]);

    let err = validate_document(&doc).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::DuplicateName);
    assert_eq!(err.column_name(), Some("x"));
    assert!(err.to_string().contains("'x'"));
}

/// Building a collection from already-dispatched columns checks names too.
#[test]
fn test_collection_from_columns_rejects_duplicates() {
    let a = dispatch(json!({"name": "dup", "type": "FLOAT_COLUMN"}));
    let b = dispatch(json!({"name": "dup", "type": "STRING_COLUMN"}));

    let err = RawColumns::new(vec![a, b]).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::DuplicateName);
}

/// One bad column rejects the whole document.
#[test]
fn test_no_partial_collection() {
    let doc = json!([
        {"name": "good", "type": "INT_COLUMN"},
        {"name": "bad", "type": "INT_COLUMN", "values": "nope"},
        {"name": "later", "type": "INT_COLUMN"}
    ]);

    let err = validate_document(&doc).unwrap_err();
    assert_eq!(err.column_index(), Some(1));
    assert_eq!(err.field(), Some("values"));
}

/// The same invalid document fails the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let doc = json!([
        {"name": "a", "type": "INT_COLUMN", "min": 3, "max": 1},
        {"name": "a", "type": "INT_COLUMN"}
    ]);

    let first = validate_document(&doc).unwrap_err().to_string();
    for _ in 0..100 {
        assert_eq!(validate_document(&doc).unwrap_err().to_string(), first);
    }
}

// =============================================================================
// Field Tests
// =============================================================================

/// The documented INT_COLUMN example.
#[test]
fn test_int_column_example() {
    let column = dispatch(json!({"name": "age", "type": "INT_COLUMN", "min": 0, "max": 120}));

    assert_eq!(column.column_type(), ColumnType::IntColumn);
    match column {
        RawColumn::Int(c) => {
            assert_eq!(c.min(), Some(0));
            assert_eq!(c.max(), Some(120));
            assert!(!c.meta().required());
            assert_eq!(c.values(), &ValueSet::Unrestricted);
        }
        other => panic!("expected int column, got {:?}", other),
    }
}

/// A column without a name fails on the required name field.
#[test]
fn test_missing_required_name() {
    let doc = json!([{"type": "FLOAT_COLUMN"}]);

    let err = validate_document(&doc).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::FieldInvalid);
    assert_eq!(err.field(), Some("name"));
    assert_eq!(err.violation().unwrap().rule, Rule::Required);
}

/// Absent boolean is false.
#[test]
fn test_required_flag_defaults_false() {
    for column_type in ColumnType::NAMES {
        let column = dispatch(json!({"name": "c", "type": column_type}));
        assert!(!column.meta().required(), "{} should default to false", column_type);
    }
}

/// min > max fails even though each bound is individually well-formed.
#[test]
fn test_min_exceeds_max() {
    let err = validate_document(&json!([
        {"name": "n", "type": "INT_COLUMN", "min": 10, "max": 5}
    ]))
    .unwrap_err();

    assert_eq!(err.violation().unwrap().rule, Rule::InvertedBounds);
}

/// Empty value list rejects every value; absent or null list rejects none.
#[test]
fn test_value_list_null_versus_empty() {
    let closed = dispatch(json!({"name": "c", "type": "INT_COLUMN", "values": []}));
    let null = dispatch(json!({"name": "n", "type": "INT_COLUMN", "values": null}));
    let absent = dispatch(json!({"name": "a", "type": "INT_COLUMN"}));

    match (closed, null, absent) {
        (RawColumn::Int(closed), RawColumn::Int(null), RawColumn::Int(absent)) => {
            for v in [-1, 0, 1, i64::MAX] {
                assert!(!closed.accepts(v));
                assert!(null.accepts(v));
                assert!(absent.accepts(v));
            }
        }
        other => panic!("unexpected variants {:?}", other),
    }
}

/// String values list keeps the same null/empty distinction.
#[test]
fn test_string_value_list_empty() {
    match dispatch(json!({"name": "s", "type": "STRING_COLUMN", "values": []})) {
        RawColumn::String(c) => {
            assert!(!c.accepts(""));
            assert!(!c.accepts("anything"));
        }
        other => panic!("expected string column, got {:?}", other),
    }
}

/// Lookup of the discriminator is exact and case-sensitive.
#[test]
fn test_discriminator_case_sensitive() {
    let err = validate_document(&json!([{"name": "a", "type": "Int_Column"}])).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnknownType);
}

/// Names outside [A-Za-z0-9_-] are rejected.
#[test]
fn test_name_character_class() {
    for name in ["first name", "a.b", "", "naïve"] {
        let err = validate_document(&json!([{"name": name, "type": "STRING_COLUMN"}]))
            .unwrap_err();
        assert_eq!(err.field(), Some("name"), "{:?} should be rejected", name);
    }
}
