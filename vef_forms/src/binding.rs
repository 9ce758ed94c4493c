//! Binding submitted values to form items.
//!
//! The transport hands every field over as a [`RawValue`]: the submitted text,
//! or the path an uploaded file was saved to. Reading a field converts that
//! raw value into a [`FieldValue`] according to the item's component.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use vef_type_converter::converters::float_to_string;
use vef_type_converter::{ConversionError, Scalar, TypeConverter, ValueType};

use crate::error::{FormError, Result};
use crate::schema::{ItemKind, SliderConfig, SwitchConfig};

/// A value as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// Local path of a saved upload.
    File(PathBuf),
}

impl RawValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Text(text) => Cow::Borrowed(text),
            RawValue::File(path) => path.to_string_lossy(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<PathBuf> for RawValue {
    fn from(value: PathBuf) -> Self {
        RawValue::File(value)
    }
}

impl From<&Path> for RawValue {
    fn from(value: &Path) -> Self {
        RawValue::File(value.to_path_buf())
    }
}

/// A submitted value converted to its item's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    File(PathBuf),
    /// `(low, high)` of a range slider, in submitted order.
    Pair(Scalar, Scalar),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            FieldValue::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            FieldValue::Pair(low, high) => Some((low, high)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => f.write_str(&float_to_string(*v)),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::File(path) => write!(f, "{}", path.display()),
            FieldValue::Pair(low, high) => write!(f, "{},{}", low, high),
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Boolean(b) => FieldValue::Boolean(b),
            Scalar::Integer(i) => FieldValue::Integer(i),
            Scalar::Float(f) => FieldValue::Float(f),
            Scalar::String(s) => FieldValue::Text(s),
        }
    }
}

impl From<&RawValue> for FieldValue {
    fn from(raw: &RawValue) -> Self {
        match raw {
            RawValue::Text(text) => FieldValue::Text(text.clone()),
            RawValue::File(path) => FieldValue::File(path.clone()),
        }
    }
}

/// Convert an item's raw value. Only sliders produce a value when nothing
/// has been submitted.
pub(crate) fn coerce(
    kind: &ItemKind,
    key: &str,
    raw: Option<&RawValue>,
) -> Result<Option<FieldValue>> {
    let converted = match (kind, raw) {
        (ItemKind::Slider(slider), raw) => coerce_slider(slider, raw).map(Some),
        (_, None) => Ok(None),
        (ItemKind::Input(input), Some(raw)) if input.is_number => coerce_integer(raw).map(Some),
        (ItemKind::Textarea(textarea), Some(raw)) if textarea.input.is_number => {
            coerce_integer(raw).map(Some)
        }
        (ItemKind::Switch(switch), Some(raw)) => coerce_switch(switch, raw).map(Some),
        (_, Some(raw)) => Ok(Some(FieldValue::from(raw))),
    };
    converted.map_err(|source| {
        log::debug!("Failed to coerce value for '{}': {}", key, source);
        FormError::Coercion {
            key: key.to_string(),
            source,
        }
    })
}

fn coerce_integer(raw: &RawValue) -> std::result::Result<FieldValue, ConversionError> {
    TypeConverter::convert(&raw.as_text(), ValueType::Integer).map(FieldValue::from)
}

fn coerce_slider(
    slider: &SliderConfig,
    raw: Option<&RawValue>,
) -> std::result::Result<FieldValue, ConversionError> {
    let value_type = slider.value_type();
    let Some(raw) = raw else {
        return Ok(match value_type {
            ValueType::Float => FieldValue::Float(0.0),
            _ => FieldValue::Integer(0),
        });
    };
    let text = raw.as_text();
    if slider.range {
        // low > high is passed through untouched
        let (low, high) = TypeConverter::convert_pair(&text, value_type)?;
        Ok(FieldValue::Pair(low, high))
    } else {
        TypeConverter::convert(&text, value_type).map(FieldValue::from)
    }
}

/// Literal `true`/`false` spellings win over the configured value type. A
/// boolean switch reads any other non-empty text as on.
fn coerce_switch(
    switch: &SwitchConfig,
    raw: &RawValue,
) -> std::result::Result<FieldValue, ConversionError> {
    let text = raw.as_text();
    match (&*text, switch.values.value_type()) {
        ("true" | "True", _) => Ok(FieldValue::Boolean(true)),
        ("false" | "False", _) => Ok(FieldValue::Boolean(false)),
        (other, ValueType::Boolean) => Ok(FieldValue::Boolean(!other.is_empty())),
        (other, value_type) => TypeConverter::convert(other, value_type).map(FieldValue::from),
    }
}
