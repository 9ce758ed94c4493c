//! Error types for form building and value coercion

use thiserror::Error;
use vef_type_converter::{ConversionError, ValueType};

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while building a form or reading its values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// A form item with this key is already registered
    #[error("form item '{key}' has already been registered")]
    DuplicateKey { key: String },

    /// The submitted raw value does not fit the item's declared type
    #[error("invalid value for '{key}': {source}")]
    Coercion {
        key: String,
        #[source]
        source: ConversionError,
    },

    /// Switch active/inactive values of different types
    #[error("switch values must share one type, got {active} and {inactive}")]
    MismatchedSwitchValues {
        active: ValueType,
        inactive: ValueType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormError::DuplicateKey { key: "name".into() };
        assert_eq!(err.to_string(), "form item 'name' has already been registered");
    }

    #[test]
    fn test_coercion_error_keeps_source() {
        use std::error::Error as _;

        let err = FormError::Coercion {
            key: "age".into(),
            source: ConversionError::PartCount {
                value: "1".into(),
                expected: 2,
                found: 1,
            },
        };
        assert!(err.to_string().starts_with("invalid value for 'age'"));
        assert!(err.source().is_some());
    }
}
