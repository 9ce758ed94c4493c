//! Numeric conversion functions
//!
//! This module contains all conversion functions that involve numeric types.

/// Convert integer to float
pub fn integer_to_float(value: i64) -> f64 {
    value as f64
}

/// Convert float to string, keeping a trailing `.0` on whole numbers so a
/// float never reads like an integer.
pub fn float_to_string(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_to_float() {
        assert_eq!(integer_to_float(123), 123.0);
        assert_eq!(integer_to_float(-1), -1.0);
    }

    #[test]
    fn test_float_to_string() {
        assert_eq!(float_to_string(123.45), "123.45");
        assert_eq!(float_to_string(1.0), "1.0");
        assert_eq!(float_to_string(-0.5), "-0.5");
        assert_eq!(float_to_string(f64::INFINITY), "inf");
    }
}
