//! Raw column schema validation
//!
//! Turns decoded column declarations into a typed, name-unique collection.
//!
//! # Pipeline
//!
//! raw records -> [`VariantDispatcher`] (looks up [`VariantRegistry`], runs
//! the field validator per field) -> [`RawColumn`] values exposing
//! [`Column`] -> [`validate_collection`] -> [`RawColumns`]
//!
//! # Principles
//!
//! - First violation wins, across fields and across columns
//! - No partial results: a document validates entirely or not at all
//! - Absent keys and explicit nulls mean different things
//! - Registry tables are static and read-only
//! - Deterministic validation

mod collection;
mod column;
mod dispatcher;
mod errors;
mod field;
mod loader;
mod opaque;
mod registry;

pub use collection::{validate_collection, validate_document, RawColumns, RAW_COLUMNS_KEY};
pub use column::{
    Column, ColumnMeta, ColumnType, FloatColumn, IntColumn, RawColumn, ResourceKind, StringColumn,
};
pub use dispatcher::VariantDispatcher;
pub use errors::{Category, FieldViolation, Rule, SchemaError, SchemaErrorCode, SchemaResult};
pub use field::{
    validate_field, BoolValidation, Bounds, FieldRule, FieldValue, Float32PtrValidation,
    Int64PtrValidation, ListValidation, StringValidation, ValueSet,
};
pub use loader::{DocumentFormat, DocumentLoader};
pub use opaque::{ComputeSpec, Tags};
pub use registry::{FieldSpec, VariantRegistry, VariantType, RAW_COLUMN_REGISTRY};
