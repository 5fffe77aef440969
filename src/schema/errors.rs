//! Schema error types for raw column validation
//!
//! Error codes:
//! - RAWCOL_MISSING_TYPE (discriminator)
//! - RAWCOL_UNKNOWN_TYPE (discriminator)
//! - RAWCOL_FIELD_INVALID (field)
//! - RAWCOL_UNSUPPORTED_KEY (field)
//! - RAWCOL_DUPLICATE_NAME (collection)
//! - RAWCOL_MALFORMED_DOCUMENT (document)
//! - RAWCOL_REGISTRY_MISMATCH (registry)

use std::fmt;

use thiserror::Error;

use super::column::ResourceKind;

/// Which stage of validation produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Missing or unrecognized type tag
    Discriminator,
    /// A single field failed its constraint
    Field,
    /// Cross-entry invariant violated
    Collection,
    /// Input is not shaped like a column document
    Document,
    /// Registry tables disagree with the type enumeration
    Registry,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Discriminator => "discriminator",
            Category::Field => "field",
            Category::Collection => "collection",
            Category::Document => "document",
            Category::Registry => "registry",
        };
        write!(f, "{}", name)
    }
}

/// Schema error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Declaration has no type field
    MissingType,
    /// Type field names no registered variant
    UnknownType,
    /// A field violates its rule
    FieldInvalid,
    /// Declaration carries a key the variant does not define
    UnsupportedKey,
    /// Two declarations share a name
    DuplicateName,
    /// Document is not a list of mappings
    MalformedDocument,
    /// Registry entry and field tables are out of sync
    RegistryMismatch,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MissingType => "RAWCOL_MISSING_TYPE",
            SchemaErrorCode::UnknownType => "RAWCOL_UNKNOWN_TYPE",
            SchemaErrorCode::FieldInvalid => "RAWCOL_FIELD_INVALID",
            SchemaErrorCode::UnsupportedKey => "RAWCOL_UNSUPPORTED_KEY",
            SchemaErrorCode::DuplicateName => "RAWCOL_DUPLICATE_NAME",
            SchemaErrorCode::MalformedDocument => "RAWCOL_MALFORMED_DOCUMENT",
            SchemaErrorCode::RegistryMismatch => "RAWCOL_REGISTRY_MISMATCH",
        }
    }

    /// Returns the validation stage this code belongs to
    pub fn category(&self) -> Category {
        match self {
            SchemaErrorCode::MissingType | SchemaErrorCode::UnknownType => {
                Category::Discriminator
            }
            SchemaErrorCode::FieldInvalid | SchemaErrorCode::UnsupportedKey => Category::Field,
            SchemaErrorCode::DuplicateName => Category::Collection,
            SchemaErrorCode::MalformedDocument => Category::Document,
            SchemaErrorCode::RegistryMismatch => Category::Registry,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The rule a field value broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Required field is absent and has no default
    Required,
    /// Explicit null where null is not permitted
    NotNull,
    /// Value has the wrong shape
    Type,
    /// String is empty or contains characters outside [A-Za-z0-9_-]
    Pattern,
    /// Value lies outside min/max
    Bounds,
    /// min exceeds max
    InvertedBounds,
    /// Value is not in the allowed set
    AllowedValues,
    /// Key is not defined for the variant
    Unsupported,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Required => "required",
            Rule::NotNull => "not_null",
            Rule::Type => "type",
            Rule::Pattern => "pattern",
            Rule::Bounds => "bounds",
            Rule::InvertedBounds => "inverted_bounds",
            Rule::AllowedValues => "allowed_values",
            Rule::Unsupported => "unsupported",
        };
        write!(f, "{}", name)
    }
}

/// Field-level failure: which key, which rule, what was expected and found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field key, with `[i]` suffix for list elements
    pub field: String,
    /// Violated rule
    pub rule: Rule,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        rule: Rule,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, Rule::Required, "field to be present", "missing")
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, Rule::NotNull, "non-null value", "null")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, Rule::Type, expected, actual)
    }

    pub fn pattern(field: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(
            field,
            Rule::Pattern,
            "non-empty alphanumeric, dash or underscore string",
            format!("'{}'", actual.into()),
        )
    }

    pub fn not_allowed(
        field: impl Into<String>,
        allowed: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            Rule::AllowedValues,
            format!("one of {}", allowed.into()),
            actual,
        )
    }

    pub fn out_of_bounds(
        field: impl Into<String>,
        bounds: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, Rule::Bounds, format!("value within {}", bounds.into()), actual)
    }

    pub fn inverted_bounds(
        field: impl Into<String>,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        Self::new(
            field,
            Rule::InvertedBounds,
            format!("min <= max ({})", max),
            format!("min {}", min),
        )
    }

    pub fn unsupported_key(field: impl Into<String>) -> Self {
        Self::new(field, Rule::Unsupported, "a key defined for this column type", "unsupported key")
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' ({}): expected {}, got {}",
            self.field, self.rule, self.expected, self.actual
        )
    }
}

/// Schema error with enough context to point at the offending input
#[derive(Debug, Clone, Error)]
#[error("{}: {}{}", .code, context_prefix(.column_index, .column_name), .message)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    column_index: Option<usize>,
    column_name: Option<String>,
    violation: Option<FieldViolation>,
}

fn context_prefix(index: &Option<usize>, name: &Option<String>) -> String {
    match (index, name) {
        (Some(i), Some(n)) => format!("column {} ('{}'): ", i, n),
        (Some(i), None) => format!("column {}: ", i),
        (None, Some(n)) => format!("column '{}': ", n),
        (None, None) => String::new(),
    }
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            column_index: None,
            column_name: None,
            violation: None,
        }
    }

    /// Declaration has no type key, or it is null
    pub fn missing_type(type_key: &str) -> Self {
        Self::new(
            SchemaErrorCode::MissingType,
            format!("missing required type field '{}'", type_key),
        )
    }

    /// Type key names nothing in the registry
    pub fn unknown_type(actual: impl fmt::Display, known: &[&str]) -> Self {
        Self::new(
            SchemaErrorCode::UnknownType,
            format!("unknown column type {} (expected one of {})", actual, known.join(", ")),
        )
    }

    pub fn field_invalid(violation: FieldViolation) -> Self {
        let code = if violation.rule == Rule::Unsupported {
            SchemaErrorCode::UnsupportedKey
        } else {
            SchemaErrorCode::FieldInvalid
        };
        Self {
            message: violation.to_string(),
            violation: Some(violation),
            ..Self::new(code, "")
        }
    }

    pub fn duplicate_name(name: impl Into<String>, kind: ResourceKind) -> Self {
        let name = name.into();
        Self {
            column_name: Some(name.clone()),
            ..Self::new(
                SchemaErrorCode::DuplicateName,
                format!("{} name '{}' is defined more than once", kind, name),
            )
        }
    }

    pub fn malformed_document(reason: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::MalformedDocument, reason)
    }

    pub fn registry_mismatch(discriminator: &str, key: &str) -> Self {
        Self::new(
            SchemaErrorCode::RegistryMismatch,
            format!("variant '{}' cannot accept field '{}'", discriminator, key),
        )
    }

    /// Attaches the declaration's position in the document
    pub fn at_index(mut self, index: usize) -> Self {
        self.column_index = Some(index);
        self
    }

    /// Attaches the declaration's name, if one has been validated
    pub fn with_column_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.column_name = Some(name.to_string());
        }
        self
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn category(&self) -> Category {
        self.code.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn column_index(&self) -> Option<usize> {
        self.column_index
    }

    pub fn column_name(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    /// Field key that failed, if this is a field error
    pub fn field(&self) -> Option<&str> {
        self.violation.as_ref().map(|v| v.field.as_str())
    }

    pub fn violation(&self) -> Option<&FieldViolation> {
        self.violation.as_ref()
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::MissingType.code(), "RAWCOL_MISSING_TYPE");
        assert_eq!(SchemaErrorCode::UnknownType.code(), "RAWCOL_UNKNOWN_TYPE");
        assert_eq!(SchemaErrorCode::FieldInvalid.code(), "RAWCOL_FIELD_INVALID");
        assert_eq!(SchemaErrorCode::DuplicateName.code(), "RAWCOL_DUPLICATE_NAME");
    }

    #[test]
    fn test_categories() {
        assert_eq!(SchemaErrorCode::MissingType.category(), Category::Discriminator);
        assert_eq!(SchemaErrorCode::UnsupportedKey.category(), Category::Field);
        assert_eq!(SchemaErrorCode::DuplicateName.category(), Category::Collection);
    }

    #[test]
    fn test_field_error_display_has_context() {
        let err = SchemaError::field_invalid(FieldViolation::missing_field("name"))
            .with_column_name(Some("age"))
            .at_index(3);
        let display = err.to_string();
        assert!(display.starts_with("RAWCOL_FIELD_INVALID"));
        assert!(display.contains("column 3 ('age')"));
        assert!(display.contains("field 'name'"));
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_unsupported_key_code() {
        let err = SchemaError::field_invalid(FieldViolation::unsupported_key("color"));
        assert_eq!(err.code(), SchemaErrorCode::UnsupportedKey);
    }

    #[test]
    fn test_duplicate_name_mentions_kind() {
        let err = SchemaError::duplicate_name("x", ResourceKind::RawColumn);
        assert_eq!(err.column_name(), Some("x"));
        assert!(err.message().contains("raw column"));
    }
}
