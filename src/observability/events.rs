//! Observable events during column document validation

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// CLI configuration loaded
    ConfigLoaded,
    /// Column document read and decoded
    DocumentLoaded,
    /// Validation of a document begins
    ValidationStart,
    /// One column passed validation
    ColumnValidated,
    /// Whole document passed validation
    ValidationComplete,
    /// Document rejected
    ValidationFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DocumentLoaded => "DOCUMENT_LOADED",
            Event::ValidationStart => "VALIDATION_START",
            Event::ColumnValidated => "COLUMN_VALIDATED",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::ValidationFailed => "VALIDATION_FAILED",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Event::ValidationFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ValidationStart.as_str(), "VALIDATION_START");
        assert_eq!(Event::ValidationFailed.to_string(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_only_rejection_is_failure() {
        assert!(Event::ValidationFailed.is_failure());
        assert!(!Event::ValidationComplete.is_failure());
    }
}
