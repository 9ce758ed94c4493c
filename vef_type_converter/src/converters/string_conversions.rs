//! String conversion functions
//!
//! This module contains all conversion functions that start from a submitted
//! string. Surrounding whitespace is ignored for numeric parsing.

use crate::error::ConversionError;
use crate::value_type::ValueType;

/// Convert string to integer
pub fn string_to_integer(value: &str) -> Result<i64, ConversionError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| ConversionError::invalid(value, ValueType::Integer, e))
}

/// Convert string to float
pub fn string_to_float(value: &str) -> Result<f64, ConversionError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| ConversionError::invalid(value, ValueType::Float, e))
}

/// Convert string to boolean.
///
/// Accepts the usual HTML form spellings: `true`/`false` in any case,
/// `1`/`0`, `yes`/`no`, `on`/`off`. An empty string is `false`.
pub fn string_to_boolean(value: &str) -> Result<bool, ConversionError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConversionError::invalid(
            value,
            ValueType::Boolean,
            "not a recognized boolean",
        )),
    }
}

/// Convert string to string (identity conversion)
pub fn string_to_string(value: &str) -> Result<String, ConversionError> {
    Ok(value.to_string())
}

/// Split a `low,high` string into its two halves.
pub fn string_to_pair(value: &str) -> Result<(&str, &str), ConversionError> {
    let parts: Vec<&str> = value.split(',').collect();
    match parts.as_slice() {
        [low, high] => Ok((low, high)),
        _ => Err(ConversionError::PartCount {
            value: value.to_string(),
            expected: 2,
            found: parts.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_integer() {
        assert_eq!(string_to_integer("123").unwrap(), 123);
        assert_eq!(string_to_integer(" -7 ").unwrap(), -7);
        assert!(string_to_integer("abc").is_err());
        assert!(string_to_integer("1.5").is_err());
    }

    #[test]
    fn test_string_to_float() {
        assert_eq!(string_to_float("123.45").unwrap(), 123.45);
        assert_eq!(string_to_float("3").unwrap(), 3.0);
        assert!(string_to_float("ten").is_err());
    }

    #[test]
    fn test_string_to_boolean() {
        assert!(string_to_boolean("True").unwrap());
        assert!(string_to_boolean("on").unwrap());
        assert!(!string_to_boolean("0").unwrap());
        assert!(!string_to_boolean("").unwrap());
        assert!(string_to_boolean("maybe").is_err());
    }

    #[test]
    fn test_string_to_string() {
        assert_eq!(string_to_string("hello").unwrap(), "hello");
    }

    #[test]
    fn test_string_to_pair() {
        assert_eq!(string_to_pair("10,20").unwrap(), ("10", "20"));
        assert_eq!(string_to_pair("30,5").unwrap(), ("30", "5"));

        let err = string_to_pair("1,2,3").unwrap_err();
        assert_eq!(
            err,
            ConversionError::PartCount {
                value: "1,2,3".into(),
                expected: 2,
                found: 3
            }
        );
        assert!(string_to_pair("10").is_err());
    }
}
