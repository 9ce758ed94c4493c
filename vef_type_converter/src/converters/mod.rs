//! Type conversion modules
//!
//! Each module groups the conversion functions for one source type.
//! `TypeConverter` routes a submitted string to the right one.

pub mod numeric_conversions;
pub mod string_conversions;

pub use numeric_conversions::*;
pub use string_conversions::*;

use crate::error::ConversionError;
use crate::value_type::{Scalar, ValueType};

/// Main type converter that provides access to all conversion functions
pub struct TypeConverter;

impl TypeConverter {
    /// Convert a submitted string into a scalar of the target type.
    pub fn convert(value: &str, target: ValueType) -> Result<Scalar, ConversionError> {
        match target {
            ValueType::Boolean => string_to_boolean(value).map(Scalar::Boolean),
            ValueType::Integer => string_to_integer(value).map(Scalar::Integer),
            ValueType::Float => string_to_float(value).map(Scalar::Float),
            ValueType::String => string_to_string(value).map(Scalar::String),
        }
    }

    /// Convert both halves of a `low,high` string into the target type.
    pub fn convert_pair(
        value: &str,
        target: ValueType,
    ) -> Result<(Scalar, Scalar), ConversionError> {
        let (low, high) = string_to_pair(value)?;
        Ok((Self::convert(low, target)?, Self::convert(high, target)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        assert_eq!(
            TypeConverter::convert("42", ValueType::Integer).unwrap(),
            Scalar::Integer(42)
        );
        assert_eq!(
            TypeConverter::convert("0.25", ValueType::Float).unwrap(),
            Scalar::Float(0.25)
        );
        assert_eq!(
            TypeConverter::convert("off", ValueType::Boolean).unwrap(),
            Scalar::Boolean(false)
        );
        assert_eq!(
            TypeConverter::convert("1", ValueType::String).unwrap(),
            Scalar::String("1".into())
        );
    }

    #[test]
    fn test_convert_pair() {
        let (low, high) = TypeConverter::convert_pair("10,20", ValueType::Integer).unwrap();
        assert_eq!(low, Scalar::Integer(10));
        assert_eq!(high, Scalar::Integer(20));

        assert!(TypeConverter::convert_pair("a,2", ValueType::Integer).is_err());
        assert!(TypeConverter::convert_pair("1", ValueType::Float).is_err());
    }
}
