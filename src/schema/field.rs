//! Field validator: one raw value against one rule
//!
//! Each rule coerces a loosely-parsed JSON value into a typed value or
//! reports the first violated constraint. Absent keys and explicit nulls
//! are distinguished:
//! - absent: required fails, otherwise the default is substituted
//! - null on a nullable list: "not set" (unrestricted)
//! - null elsewhere: required fails, otherwise the default is substituted
//!
//! Validators are pure: no state, no side effects.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::errors::FieldViolation;
use super::opaque::{ComputeSpec, Tags};

/// Optional numeric bounds. Absence of either side means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Bounds<T> {
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: PartialOrd + Copy + fmt::Display> Bounds<T> {
    /// Fails when both sides are set and min exceeds max.
    pub fn check(&self, key: &str) -> Result<(), FieldViolation> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => {
                Err(FieldViolation::inverted_bounds(key, min, max))
            }
            _ => Ok(()),
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.min {
            Some(min) => write!(f, "[{}, ", min)?,
            None => write!(f, "(-inf, ")?,
        }
        match &self.max {
            Some(max) => write!(f, "{}]", max),
            None => write!(f, "+inf)"),
        }
    }
}

/// An explicit set of allowed values.
///
/// `Unrestricted` comes from an absent or null list. `Only(vec![])` is an
/// explicit empty list and permits nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueSet<T> {
    #[default]
    Unrestricted,
    Only(Vec<T>),
}

impl<T: PartialEq> ValueSet<T> {
    pub fn permits(&self, value: &T) -> bool {
        match self {
            ValueSet::Unrestricted => true,
            ValueSet::Only(values) => values.contains(value),
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, ValueSet::Only(_))
    }

    pub fn values(&self) -> Option<&[T]> {
        match self {
            ValueSet::Unrestricted => None,
            ValueSet::Only(values) => Some(values),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringValidation {
    pub required: bool,
    pub default: Option<&'static str>,
    pub alpha_numeric_dash_underscore: bool,
    pub allowed_values: Option<&'static [&'static str]>,
}

impl StringValidation {
    pub const DEFAULT: Self = Self {
        required: false,
        default: None,
        alpha_numeric_dash_underscore: false,
        allowed_values: None,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct BoolValidation {
    pub required: bool,
    pub default: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Int64PtrValidation {
    pub required: bool,
    pub default: Option<i64>,
    pub bounds: Bounds<i64>,
    pub allowed_values: Option<&'static [i64]>,
}

impl Int64PtrValidation {
    pub const DEFAULT: Self = Self {
        required: false,
        default: None,
        bounds: Bounds::unbounded(),
        allowed_values: None,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct Float32PtrValidation {
    pub required: bool,
    pub default: Option<f32>,
    pub bounds: Bounds<f32>,
}

impl Float32PtrValidation {
    pub const DEFAULT: Self = Self {
        required: false,
        default: None,
        bounds: Bounds::unbounded(),
    };
}

#[derive(Debug, Clone, Copy)]
pub struct ListValidation {
    pub required: bool,
    pub allow_null: bool,
}

/// Constraint spec for one field
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    String(StringValidation),
    Bool(BoolValidation),
    Int64Ptr(Int64PtrValidation),
    Float32Ptr(Float32PtrValidation),
    Int64List(ListValidation),
    Float32List(ListValidation),
    StringList(ListValidation),
    /// Delegates to [`ComputeSpec::from_value`]
    Compute,
    /// Delegates to [`Tags::from_value`]
    Tags,
}

/// A coerced, constraint-satisfying field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Bool(bool),
    Int(Option<i64>),
    Float(Option<f32>),
    IntList(ValueSet<i64>),
    FloatList(ValueSet<f32>),
    StrList(ValueSet<String>),
    Compute(Option<ComputeSpec>),
    Tags(Tags),
}

/// Validates one field's raw value (`None` when the key is absent).
pub fn validate_field(
    key: &str,
    raw: Option<&Value>,
    rule: &FieldRule,
) -> Result<FieldValue, FieldViolation> {
    match rule {
        FieldRule::String(v) => validate_string(key, raw, v).map(FieldValue::Str),
        FieldRule::Bool(v) => validate_bool(key, raw, v).map(FieldValue::Bool),
        FieldRule::Int64Ptr(v) => validate_int64(key, raw, v).map(FieldValue::Int),
        FieldRule::Float32Ptr(v) => validate_float32(key, raw, v).map(FieldValue::Float),
        FieldRule::Int64List(v) => validate_list(key, raw, v, coerce_i64).map(FieldValue::IntList),
        FieldRule::Float32List(v) => {
            validate_list(key, raw, v, coerce_f32).map(FieldValue::FloatList)
        }
        FieldRule::StringList(v) => {
            validate_list(key, raw, v, coerce_string).map(FieldValue::StrList)
        }
        FieldRule::Compute => match raw {
            None | Some(Value::Null) => Ok(FieldValue::Compute(None)),
            Some(value) => ComputeSpec::from_value(key, value).map(|c| FieldValue::Compute(Some(c))),
        },
        FieldRule::Tags => match raw {
            None | Some(Value::Null) => Ok(FieldValue::Tags(Tags::default())),
            Some(value) => Tags::from_value(key, value).map(FieldValue::Tags),
        },
    }
}

/// Required check for an absent or null value. `Ok` means substitute the default.
fn absent(key: &str, raw: Option<&Value>, required: bool) -> Result<(), FieldViolation> {
    if !required {
        return Ok(());
    }
    match raw {
        None => Err(FieldViolation::missing_field(key)),
        _ => Err(FieldViolation::null_value(key)),
    }
}

fn validate_string(
    key: &str,
    raw: Option<&Value>,
    rule: &StringValidation,
) -> Result<String, FieldViolation> {
    let value = match raw {
        None | Some(Value::Null) => {
            if let Some(default) = rule.default {
                return Ok(default.to_string());
            }
            absent(key, raw, rule.required)?;
            return Ok(String::new());
        }
        Some(value) => coerce_string(key, value)?,
    };

    if rule.alpha_numeric_dash_underscore && !is_alpha_numeric_dash_underscore(&value) {
        return Err(FieldViolation::pattern(key, value));
    }

    if let Some(allowed) = rule.allowed_values {
        if !allowed.contains(&value.as_str()) {
            return Err(FieldViolation::not_allowed(
                key,
                format!("{:?}", allowed),
                format!("'{}'", value),
            ));
        }
    }

    Ok(value)
}

fn validate_bool(
    key: &str,
    raw: Option<&Value>,
    rule: &BoolValidation,
) -> Result<bool, FieldViolation> {
    match raw {
        None | Some(Value::Null) => {
            absent(key, raw, rule.required)?;
            Ok(rule.default)
        }
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(FieldViolation::type_mismatch(key, "bool", json_type_name(other))),
    }
}

fn validate_int64(
    key: &str,
    raw: Option<&Value>,
    rule: &Int64PtrValidation,
) -> Result<Option<i64>, FieldViolation> {
    rule.bounds.check(key)?;

    let value = match raw {
        None | Some(Value::Null) => {
            if rule.default.is_none() {
                absent(key, raw, rule.required)?;
            }
            return Ok(rule.default);
        }
        Some(value) => coerce_i64(key, value)?,
    };

    if !rule.bounds.contains(value) {
        return Err(FieldViolation::out_of_bounds(
            key,
            rule.bounds.to_string(),
            value.to_string(),
        ));
    }

    if let Some(allowed) = rule.allowed_values {
        if !allowed.contains(&value) {
            return Err(FieldViolation::not_allowed(
                key,
                format!("{:?}", allowed),
                value.to_string(),
            ));
        }
    }

    Ok(Some(value))
}

fn validate_float32(
    key: &str,
    raw: Option<&Value>,
    rule: &Float32PtrValidation,
) -> Result<Option<f32>, FieldViolation> {
    rule.bounds.check(key)?;

    let value = match raw {
        None | Some(Value::Null) => {
            if rule.default.is_none() {
                absent(key, raw, rule.required)?;
            }
            return Ok(rule.default);
        }
        Some(value) => coerce_f32(key, value)?,
    };

    if !rule.bounds.contains(value) {
        return Err(FieldViolation::out_of_bounds(
            key,
            rule.bounds.to_string(),
            value.to_string(),
        ));
    }

    Ok(Some(value))
}

fn validate_list<T>(
    key: &str,
    raw: Option<&Value>,
    rule: &ListValidation,
    coerce: fn(&str, &Value) -> Result<T, FieldViolation>,
) -> Result<ValueSet<T>, FieldViolation> {
    let items = match raw {
        None => {
            absent(key, raw, rule.required)?;
            return Ok(ValueSet::Unrestricted);
        }
        Some(Value::Null) if rule.allow_null => return Ok(ValueSet::Unrestricted),
        Some(Value::Null) => return Err(FieldViolation::null_value(key)),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FieldViolation::type_mismatch(key, "list", json_type_name(other)))
        }
    };

    let mut values = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let elem_path = format!("{}[{}]", key, i);
        values.push(coerce(&elem_path, item)?);
    }
    Ok(ValueSet::Only(values))
}

fn coerce_string(key: &str, value: &Value) -> Result<String, FieldViolation> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(FieldViolation::type_mismatch(key, "string", json_type_name(other))),
    }
}

fn coerce_i64(key: &str, value: &Value) -> Result<i64, FieldViolation> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64))
            .ok_or_else(|| {
                let actual = if n.is_u64() { "int (out of int64 range)" } else { "float" };
                FieldViolation::type_mismatch(key, "int", actual)
            }),
        other => Err(FieldViolation::type_mismatch(key, "int", json_type_name(other))),
    }
}

/// Whole-valued floats such as `10.0` count as integers.
fn integral_f64(wide: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if wide.is_finite() && wide.fract() == 0.0 && wide >= i64::MIN as f64 && wide < i64::MAX as f64
    {
        Some(wide as i64)
    } else {
        None
    }
}

fn coerce_f32(key: &str, value: &Value) -> Result<f32, FieldViolation> {
    match value.as_f64() {
        Some(wide) => {
            let narrow = wide as f32;
            if narrow.is_finite() {
                Ok(narrow)
            } else {
                Err(FieldViolation::type_mismatch(key, "float32", wide.to_string()))
            }
        }
        None => Err(FieldViolation::type_mismatch(key, "float", json_type_name(value))),
    }
}

fn is_alpha_numeric_dash_underscore(s: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("constant pattern compiles"))
        .is_match(s)
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
