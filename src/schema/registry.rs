//! Variant registry: discriminator -> zero value + ordered field rules
//!
//! The tables are plain static data, built at compile time and never
//! mutated, so concurrent validations share them freely.

use super::column::{ColumnType, FloatColumn, IntColumn, RawColumn, StringColumn};
use super::field::{
    BoolValidation, FieldRule, Float32PtrValidation, Int64PtrValidation, ListValidation,
    StringValidation,
};

/// One field of a variant: the input key and the rule applied to it
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub rule: FieldRule,
}

/// A registered variant
#[derive(Debug)]
pub struct VariantType {
    pub column_type: ColumnType,
    zero: fn() -> RawColumn,
    /// Validated in this order
    pub fields: &'static [FieldSpec],
}

impl VariantType {
    pub fn discriminator(&self) -> &'static str {
        self.column_type.as_str()
    }

    /// Empty instance, populated field by field during dispatch
    pub fn zero(&self) -> RawColumn {
        (self.zero)()
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Lookup table of variants keyed by discriminator
#[derive(Debug)]
pub struct VariantRegistry {
    type_key: &'static str,
    variants: &'static [VariantType],
}

impl VariantRegistry {
    /// Input key that carries the discriminator
    pub fn type_key(&self) -> &'static str {
        self.type_key
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, discriminator: &str) -> Option<&VariantType> {
        self.variants
            .iter()
            .find(|v| v.discriminator() == discriminator)
    }

    pub fn variants(&self) -> &'static [VariantType] {
        self.variants
    }

    pub fn discriminators(&self) -> Vec<&'static str> {
        self.variants.iter().map(|v| v.discriminator()).collect()
    }
}

const NAME_FIELD: FieldSpec = FieldSpec {
    key: "name",
    rule: FieldRule::String(StringValidation {
        required: true,
        alpha_numeric_dash_underscore: true,
        ..StringValidation::DEFAULT
    }),
};

const REQUIRED_FIELD: FieldSpec = FieldSpec {
    key: "required",
    rule: FieldRule::Bool(BoolValidation {
        required: false,
        default: false,
    }),
};

const COMPUTE_FIELD: FieldSpec = FieldSpec {
    key: "compute",
    rule: FieldRule::Compute,
};

const TAGS_FIELD: FieldSpec = FieldSpec {
    key: "tags",
    rule: FieldRule::Tags,
};

/// The type tag is re-checked against the closed enumeration so a registry
/// entry naming a type that does not exist is caught at dispatch.
const TYPE_FIELD: FieldSpec = FieldSpec {
    key: "type",
    rule: FieldRule::String(StringValidation {
        required: true,
        allowed_values: Some(ColumnType::NAMES),
        ..StringValidation::DEFAULT
    }),
};

const NULLABLE_LIST: ListValidation = ListValidation {
    required: false,
    allow_null: true,
};

static INT_FIELDS: [FieldSpec; 8] = [
    NAME_FIELD,
    REQUIRED_FIELD,
    FieldSpec {
        key: "min",
        rule: FieldRule::Int64Ptr(Int64PtrValidation::DEFAULT),
    },
    FieldSpec {
        key: "max",
        rule: FieldRule::Int64Ptr(Int64PtrValidation::DEFAULT),
    },
    FieldSpec {
        key: "values",
        rule: FieldRule::Int64List(NULLABLE_LIST),
    },
    COMPUTE_FIELD,
    TAGS_FIELD,
    TYPE_FIELD,
];

static FLOAT_FIELDS: [FieldSpec; 8] = [
    NAME_FIELD,
    REQUIRED_FIELD,
    FieldSpec {
        key: "min",
        rule: FieldRule::Float32Ptr(Float32PtrValidation::DEFAULT),
    },
    FieldSpec {
        key: "max",
        rule: FieldRule::Float32Ptr(Float32PtrValidation::DEFAULT),
    },
    FieldSpec {
        key: "values",
        rule: FieldRule::Float32List(NULLABLE_LIST),
    },
    COMPUTE_FIELD,
    TAGS_FIELD,
    TYPE_FIELD,
];

static STRING_FIELDS: [FieldSpec; 6] = [
    NAME_FIELD,
    REQUIRED_FIELD,
    FieldSpec {
        key: "values",
        rule: FieldRule::StringList(NULLABLE_LIST),
    },
    COMPUTE_FIELD,
    TAGS_FIELD,
    TYPE_FIELD,
];

fn zero_string() -> RawColumn {
    RawColumn::String(StringColumn::default())
}

fn zero_int() -> RawColumn {
    RawColumn::Int(IntColumn::default())
}

fn zero_float() -> RawColumn {
    RawColumn::Float(FloatColumn::default())
}

static RAW_COLUMN_VARIANTS: [VariantType; 3] = [
    VariantType {
        column_type: ColumnType::StringColumn,
        zero: zero_string,
        fields: &STRING_FIELDS,
    },
    VariantType {
        column_type: ColumnType::IntColumn,
        zero: zero_int,
        fields: &INT_FIELDS,
    },
    VariantType {
        column_type: ColumnType::FloatColumn,
        zero: zero_float,
        fields: &FLOAT_FIELDS,
    },
];

/// Registry of raw column variants, discriminated by the `type` key
pub static RAW_COLUMN_REGISTRY: VariantRegistry = VariantRegistry {
    type_key: "type",
    variants: &RAW_COLUMN_VARIANTS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column::Column;
    use crate::schema::dispatcher::VariantDispatcher;
    use crate::schema::errors::SchemaErrorCode;
    use serde_json::json;

    // A string variant that wrongly declares an integer bound
    static DRIFTED_STRING_FIELDS: [FieldSpec; 3] = [
        NAME_FIELD,
        FieldSpec {
            key: "min",
            rule: FieldRule::Int64Ptr(Int64PtrValidation::DEFAULT),
        },
        TYPE_FIELD,
    ];

    static DRIFTED_VARIANTS: [VariantType; 2] = [
        VariantType {
            column_type: ColumnType::StringColumn,
            zero: zero_string,
            fields: &DRIFTED_STRING_FIELDS,
        },
        // Entry and zero value disagree on the type
        VariantType {
            column_type: ColumnType::FloatColumn,
            zero: zero_int,
            fields: &FLOAT_FIELDS,
        },
    ];

    static DRIFTED_REGISTRY: VariantRegistry = VariantRegistry {
        type_key: "type",
        variants: &DRIFTED_VARIANTS,
    };

    #[test]
    fn test_lookup_is_exact() {
        assert!(RAW_COLUMN_REGISTRY.get("INT_COLUMN").is_some());
        assert!(RAW_COLUMN_REGISTRY.get("int_column").is_none());
        assert!(RAW_COLUMN_REGISTRY.get("INT_COLUMN ").is_none());
        assert!(RAW_COLUMN_REGISTRY.get("BOOL_COLUMN").is_none());
    }

    #[test]
    fn test_every_type_registered_once() {
        for column_type in ColumnType::ALL {
            let count = RAW_COLUMN_REGISTRY
                .variants()
                .iter()
                .filter(|v| v.column_type == column_type)
                .count();
            assert_eq!(count, 1, "{} registered {} times", column_type, count);
        }
    }

    #[test]
    fn test_zero_value_matches_entry() {
        for variant in RAW_COLUMN_REGISTRY.variants() {
            let zero = variant.zero();
            assert_eq!(zero.column_type(), variant.column_type);
            assert_eq!(zero.name(), "");
        }
    }

    #[test]
    fn test_every_variant_validates_type_field() {
        for variant in RAW_COLUMN_REGISTRY.variants() {
            assert!(variant.field("type").is_some());
            assert!(variant.field("name").is_some());
        }
    }

    #[test]
    fn test_string_variant_has_no_bounds() {
        let variant = RAW_COLUMN_REGISTRY.get("STRING_COLUMN").unwrap();
        assert!(variant.field("min").is_none());
        assert!(variant.field("max").is_none());
    }

    #[test]
    fn test_field_order() {
        let variant = RAW_COLUMN_REGISTRY.get("INT_COLUMN").unwrap();
        let keys: Vec<_> = variant.fields.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            ["name", "required", "min", "max", "values", "compute", "tags", "type"]
        );
    }

    #[test]
    fn test_drifted_field_table_is_reported() {
        let dispatcher = VariantDispatcher::new(&DRIFTED_REGISTRY);
        let err = dispatcher
            .dispatch(&json!({"name": "label", "type": "STRING_COLUMN", "min": 3}))
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::RegistryMismatch);
        assert!(err.message().contains("min"));
    }

    #[test]
    fn test_drifted_zero_value_is_reported() {
        let dispatcher = VariantDispatcher::new(&DRIFTED_REGISTRY);
        let err = dispatcher
            .dispatch(&json!({"name": "ratio", "type": "FLOAT_COLUMN"}))
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::RegistryMismatch);
    }
}
