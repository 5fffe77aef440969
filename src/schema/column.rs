//! Column capability interface and the concrete raw column variants
//!
//! Downstream stages read shared metadata through [`Column`] only. The
//! variant structs expose their variant-specific constraints through
//! getters; fields are crate-private so only the dispatcher can populate
//! them.

use std::fmt;

use serde::Serialize;

use super::errors::FieldViolation;
use super::field::{Bounds, FieldValue, ValueSet};
use super::opaque::{ComputeSpec, Tags};

/// Closed enumeration of column type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnType {
    #[serde(rename = "STRING_COLUMN")]
    StringColumn,
    #[serde(rename = "INT_COLUMN")]
    IntColumn,
    #[serde(rename = "FLOAT_COLUMN")]
    FloatColumn,
}

impl ColumnType {
    pub const ALL: [ColumnType; 3] = [
        ColumnType::StringColumn,
        ColumnType::IntColumn,
        ColumnType::FloatColumn,
    ];

    /// String forms of [`ColumnType::ALL`], in the same order
    pub const NAMES: &'static [&'static str] = &["STRING_COLUMN", "INT_COLUMN", "FLOAT_COLUMN"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::StringColumn => "STRING_COLUMN",
            ColumnType::IntColumn => "INT_COLUMN",
            ColumnType::FloatColumn => "FLOAT_COLUMN",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Place of a declaration in the wider resource taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    RawColumn,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::RawColumn => "raw_column",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::RawColumn => write!(f, "raw column"),
        }
    }
}

/// Read-only view every column variant exposes
pub trait Column {
    fn name(&self) -> &str;

    fn column_type(&self) -> ColumnType;

    /// Discriminator string, e.g. `INT_COLUMN`
    fn discriminator(&self) -> &'static str {
        self.column_type().as_str()
    }

    fn compute(&self) -> Option<&ComputeSpec>;

    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::RawColumn
    }

    fn is_raw(&self) -> bool {
        true
    }
}

/// Metadata shared by every variant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMeta {
    pub(crate) name: String,
    pub(crate) required: bool,
    pub(crate) compute: Option<ComputeSpec>,
    pub(crate) tags: Tags,
}

impl ColumnMeta {
    pub fn required(&self) -> bool {
        self.required
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntColumn {
    pub(crate) meta: ColumnMeta,
    pub(crate) bounds: Bounds<i64>,
    pub(crate) values: ValueSet<i64>,
}

impl IntColumn {
    pub fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    pub fn min(&self) -> Option<i64> {
        self.bounds.min
    }

    pub fn max(&self) -> Option<i64> {
        self.bounds.max
    }

    pub fn values(&self) -> &ValueSet<i64> {
        &self.values
    }

    /// Whether a data value satisfies this column's bounds and value set
    pub fn accepts(&self, value: i64) -> bool {
        self.bounds.contains(value) && self.values.permits(&value)
    }
}

impl Column for IntColumn {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::IntColumn
    }

    fn compute(&self) -> Option<&ComputeSpec> {
        self.meta.compute.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatColumn {
    pub(crate) meta: ColumnMeta,
    pub(crate) bounds: Bounds<f32>,
    pub(crate) values: ValueSet<f32>,
}

impl FloatColumn {
    pub fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    pub fn min(&self) -> Option<f32> {
        self.bounds.min
    }

    pub fn max(&self) -> Option<f32> {
        self.bounds.max
    }

    pub fn values(&self) -> &ValueSet<f32> {
        &self.values
    }

    pub fn accepts(&self, value: f32) -> bool {
        self.bounds.contains(value) && self.values.permits(&value)
    }
}

impl Column for FloatColumn {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::FloatColumn
    }

    fn compute(&self) -> Option<&ComputeSpec> {
        self.meta.compute.as_ref()
    }
}

/// Strings carry no ordering constraint, only an optional value set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringColumn {
    pub(crate) meta: ColumnMeta,
    pub(crate) values: ValueSet<String>,
}

impl StringColumn {
    pub fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    pub fn values(&self) -> &ValueSet<String> {
        &self.values
    }

    pub fn accepts(&self, value: &str) -> bool {
        match &self.values {
            ValueSet::Unrestricted => true,
            ValueSet::Only(values) => values.iter().any(|v| v == value),
        }
    }
}

impl Column for StringColumn {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::StringColumn
    }

    fn compute(&self) -> Option<&ComputeSpec> {
        self.meta.compute.as_ref()
    }
}

/// One validated raw column declaration
#[derive(Debug, Clone, PartialEq)]
pub enum RawColumn {
    Int(IntColumn),
    Float(FloatColumn),
    String(StringColumn),
}

impl RawColumn {
    fn as_column(&self) -> &dyn Column {
        match self {
            RawColumn::Int(c) => c,
            RawColumn::Float(c) => c,
            RawColumn::String(c) => c,
        }
    }

    pub fn meta(&self) -> &ColumnMeta {
        match self {
            RawColumn::Int(c) => &c.meta,
            RawColumn::Float(c) => &c.meta,
            RawColumn::String(c) => &c.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut ColumnMeta {
        match self {
            RawColumn::Int(c) => &mut c.meta,
            RawColumn::Float(c) => &mut c.meta,
            RawColumn::String(c) => &mut c.meta,
        }
    }

    /// Stores a validated field value. Returns false when the key or value
    /// shape does not belong to this variant, or when the validated type
    /// tag disagrees with the variant.
    pub(crate) fn assign(&mut self, key: &str, value: FieldValue) -> bool {
        match (key, value) {
            ("type", FieldValue::Str(tag)) => return tag == self.discriminator(),
            ("name", FieldValue::Str(name)) => self.meta_mut().name = name,
            ("required", FieldValue::Bool(required)) => self.meta_mut().required = required,
            ("compute", FieldValue::Compute(compute)) => self.meta_mut().compute = compute,
            ("tags", FieldValue::Tags(tags)) => self.meta_mut().tags = tags,
            (key, value) => return self.assign_constraint(key, value),
        }
        true
    }

    fn assign_constraint(&mut self, key: &str, value: FieldValue) -> bool {
        match (self, key, value) {
            (RawColumn::Int(c), "min", FieldValue::Int(v)) => c.bounds.min = v,
            (RawColumn::Int(c), "max", FieldValue::Int(v)) => c.bounds.max = v,
            (RawColumn::Int(c), "values", FieldValue::IntList(v)) => c.values = v,
            (RawColumn::Float(c), "min", FieldValue::Float(v)) => c.bounds.min = v,
            (RawColumn::Float(c), "max", FieldValue::Float(v)) => c.bounds.max = v,
            (RawColumn::Float(c), "values", FieldValue::FloatList(v)) => c.values = v,
            (RawColumn::String(c), "values", FieldValue::StrList(v)) => c.values = v,
            _ => return false,
        }
        true
    }

    /// Cross-field check run once every field is populated.
    pub(crate) fn check_bounds(&self) -> Result<(), FieldViolation> {
        match self {
            RawColumn::Int(c) => c.bounds.check("min"),
            RawColumn::Float(c) => c.bounds.check("min"),
            RawColumn::String(_) => Ok(()),
        }
    }
}

impl Column for RawColumn {
    fn name(&self) -> &str {
        self.as_column().name()
    }

    fn column_type(&self) -> ColumnType {
        self.as_column().column_type()
    }

    fn compute(&self) -> Option<&ComputeSpec> {
        self.as_column().compute()
    }
}
