use thiserror::Error;

use crate::value_type::ValueType;

/// Errors produced when a submitted string cannot be converted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value is not a valid representation of the target type.
    #[error("cannot convert '{value}' to {target}: {reason}")]
    Invalid {
        value: String,
        target: ValueType,
        reason: String,
    },

    /// A delimited value did not split into the expected number of parts.
    #[error("expected {expected} comma-separated values in '{value}', found {found}")]
    PartCount {
        value: String,
        expected: usize,
        found: usize,
    },
}

impl ConversionError {
    pub(crate) fn invalid(value: &str, target: ValueType, reason: impl ToString) -> Self {
        ConversionError::Invalid {
            value: value.to_string(),
            target,
            reason: reason.to_string(),
        }
    }
}
