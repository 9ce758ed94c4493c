use std::fmt;

use serde::{Deserialize, Serialize};

use crate::converters::numeric_conversions::{float_to_string, integer_to_float};

/// The scalar types a submitted string can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    String,
}

impl ValueType {
    /// Get the type name as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A converted value.
///
/// Serializes untagged, so `Scalar::Integer(1)` becomes the JSON number `1`
/// and `Scalar::String("on")` the JSON string `"on"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn value_type(&self) -> ValueType {
        match self {
            Scalar::Boolean(_) => ValueType::Boolean,
            Scalar::Integer(_) => ValueType::Integer,
            Scalar::Float(_) => ValueType::Float,
            Scalar::String(_) => ValueType::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a float; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(integer_to_float(*i)),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => f.write_str(&float_to_string(*v)),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_display() {
        assert_eq!(ValueType::Boolean.to_string(), "boolean");
        assert_eq!(ValueType::Float.as_str(), "float");
    }

    #[test]
    fn test_scalar_value_type() {
        assert_eq!(Scalar::from(1).value_type(), ValueType::Integer);
        assert_eq!(Scalar::from(0.5).value_type(), ValueType::Float);
        assert_eq!(Scalar::from(true).value_type(), ValueType::Boolean);
        assert_eq!(Scalar::from("on").value_type(), ValueType::String);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Boolean(false).to_string(), "false");
        assert_eq!(Scalar::Integer(-3).to_string(), "-3");
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from("off").to_string(), "off");
    }

    #[test]
    fn test_scalar_json_is_untagged() {
        assert_eq!(serde_json::to_string(&Scalar::Integer(1)).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Scalar::from("a")).unwrap(), "\"a\"");
        let parsed: Scalar = serde_json::from_str("1.5").unwrap();
        assert_eq!(parsed, Scalar::Float(1.5));
        let parsed: Scalar = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Scalar::Integer(7));
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Scalar::Integer(4).as_f64(), Some(4.0));
        assert_eq!(Scalar::Integer(4).as_i64(), Some(4));
        assert_eq!(Scalar::Float(4.0).as_i64(), None);
        assert_eq!(Scalar::from("x").as_str(), Some("x"));
        assert_eq!(Scalar::Boolean(true).as_bool(), Some(true));
    }
}
