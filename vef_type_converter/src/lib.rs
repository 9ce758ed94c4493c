//! vef_type_converter - string to typed scalar conversion
//!
//! Browser form submissions only ever deliver strings. This crate turns those
//! strings into the scalar types a form field declares (integer, float,
//! boolean or string), with individual conversion functions organized into
//! separate modules.

pub mod converters;
pub mod error;
pub mod value_type;

pub use converters::TypeConverter;
pub use error::ConversionError;
pub use value_type::{Scalar, ValueType};
