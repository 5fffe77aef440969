//! Variant dispatcher: one raw record -> one typed column
//!
//! Dispatch order:
//! 1. Read the type key; missing or unregistered fails
//! 2. Reject keys the variant does not define
//! 3. Start from the variant's zero value
//! 4. Run each field rule in declaration order, first failure wins
//! 5. Check min <= max once all fields are populated
//!
//! Key strictness comes before field order: a record with a stray key is
//! reported for that key even when an earlier declared field (such as
//! `name`) is also invalid.

use serde_json::Value;

use super::column::RawColumn;
use super::errors::{FieldViolation, SchemaError, SchemaResult};
use super::field::{json_type_name, validate_field};
use super::registry::VariantRegistry;

/// Builds typed columns from raw records using a registry.
///
/// Holds no state of its own; the same dispatcher can serve any number
/// of documents.
pub struct VariantDispatcher<'a> {
    registry: &'a VariantRegistry,
}

impl<'a> VariantDispatcher<'a> {
    pub fn new(registry: &'a VariantRegistry) -> Self {
        Self { registry }
    }

    /// Dispatches one record.
    ///
    /// # Errors
    ///
    /// - RAWCOL_MALFORMED_DOCUMENT if the record is not a mapping
    /// - RAWCOL_MISSING_TYPE / RAWCOL_UNKNOWN_TYPE for a bad discriminator
    /// - RAWCOL_UNSUPPORTED_KEY for keys the variant does not define
    /// - RAWCOL_FIELD_INVALID for the first field that breaks its rule
    /// - RAWCOL_REGISTRY_MISMATCH if the registry tables disagree
    pub fn dispatch(&self, record: &Value) -> SchemaResult<RawColumn> {
        let fields = record.as_object().ok_or_else(|| {
            SchemaError::malformed_document(format!(
                "column declaration must be a mapping, got {}",
                json_type_name(record)
            ))
        })?;

        let type_key = self.registry.type_key();
        let known = self.registry.discriminators();
        let variant = match fields.get(type_key) {
            None | Some(Value::Null) => return Err(SchemaError::missing_type(type_key)),
            Some(Value::String(tag)) => self
                .registry
                .get(tag)
                .ok_or_else(|| SchemaError::unknown_type(format!("'{}'", tag), &known))?,
            Some(other) => return Err(SchemaError::unknown_type(other, &known)),
        };

        let name = fields.get("name").and_then(Value::as_str);

        for key in fields.keys() {
            if variant.field(key).is_none() {
                return Err(SchemaError::field_invalid(FieldViolation::unsupported_key(key))
                    .with_column_name(name));
            }
        }

        let mut column = variant.zero();
        for spec in variant.fields {
            let value = validate_field(spec.key, fields.get(spec.key), &spec.rule)
                .map_err(|v| SchemaError::field_invalid(v).with_column_name(name))?;

            if !column.assign(spec.key, value) {
                return Err(SchemaError::registry_mismatch(variant.discriminator(), spec.key));
            }
        }

        column
            .check_bounds()
            .map_err(|v| SchemaError::field_invalid(v).with_column_name(name))?;

        Ok(column)
    }
}
