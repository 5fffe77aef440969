//! Opaque sub-objects carried by every column: compute spec and tags
//!
//! These are validated only for shape. Their contents belong to other
//! subsystems and are passed through untouched.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::FieldViolation;
use super::field::json_type_name;

/// How a column's data is produced. Contents are not interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComputeSpec(Map<String, Value>);

impl ComputeSpec {
    /// Accepts any mapping.
    pub fn from_value(key: &str, value: &Value) -> Result<Self, FieldViolation> {
        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            other => Err(FieldViolation::type_mismatch(key, "mapping", json_type_name(other))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Free-form labels attached to a column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags(BTreeMap<String, Value>);

impl Tags {
    /// Accepts a mapping of non-empty keys to scalar values.
    pub fn from_value(key: &str, value: &Value) -> Result<Self, FieldViolation> {
        let map = value
            .as_object()
            .ok_or_else(|| FieldViolation::type_mismatch(key, "mapping", json_type_name(value)))?;

        let mut tags = BTreeMap::new();
        for (tag, tag_value) in map {
            let path = format!("{}.{}", key, tag);
            if tag.is_empty() {
                return Err(FieldViolation::pattern(path, tag.as_str()));
            }
            match tag_value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => {}
                other => {
                    return Err(FieldViolation::type_mismatch(
                        path,
                        "string, number or bool",
                        json_type_name(other),
                    ))
                }
            }
            tags.insert(tag.clone(), tag_value.clone());
        }
        Ok(Self(tags))
    }

    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.0.get(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
