//! Layout options shared by every item of a form.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Top,
    Left,
    Right,
}

/// How the client lays out labels and the submit button.
///
/// Serialized with the client's key names; deserialization also accepts the
/// snake_case names used in configuration files, and a label width given
/// either as a number or as `"<n>px"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    #[serde(rename = "labelPosition", alias = "label_position")]
    pub label_position: LabelPosition,
    /// Label column width in pixels.
    #[serde(
        rename = "labelWidth",
        alias = "label_width",
        serialize_with = "serialize_px",
        deserialize_with = "deserialize_px"
    )]
    pub label_width: u32,
    #[serde(rename = "suffix", alias = "label_suffix")]
    pub label_suffix: String,
    #[serde(rename = "submitText", alias = "submit_text")]
    pub submit_text: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            label_position: LabelPosition::Top,
            label_width: 120,
            label_suffix: " : ".to_string(),
            submit_text: "Submit".to_string(),
        }
    }
}

impl FormOptions {
    pub fn label_position(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }

    pub fn label_width(mut self, width: u32) -> Self {
        self.label_width = width;
        self
    }

    pub fn label_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.label_suffix = suffix.into();
        self
    }

    pub fn submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = text.into();
        self
    }
}

fn serialize_px<S: Serializer>(width: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{}px", width))
}

fn deserialize_px<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    struct PixelVisitor;

    impl<'de> Visitor<'de> for PixelVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a pixel count such as 120 or \"120px\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("label width {} is too large", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("label width {} is out of range", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            let digits = v.trim().trim_end_matches("px").trim_end();
            digits
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(PixelVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_serialization() {
        assert_eq!(
            serde_json::to_value(FormOptions::default()).unwrap(),
            json!({
                "labelPosition": "top",
                "labelWidth": "120px",
                "suffix": " : ",
                "submitText": "Submit"
            })
        );
    }

    #[test]
    fn test_builder_setters() {
        let options = FormOptions::default()
            .label_position(LabelPosition::Left)
            .label_width(80)
            .label_suffix(":")
            .submit_text("Go");
        let data = serde_json::to_value(&options).unwrap();
        assert_eq!(data["labelPosition"], json!("left"));
        assert_eq!(data["labelWidth"], json!("80px"));
        assert_eq!(data["suffix"], json!(":"));
        assert_eq!(data["submitText"], json!("Go"));
    }

    #[test]
    fn test_deserialize_config_spelling() {
        let yaml = "label_position: right\nlabel_width: 200\nsubmit_text: Run\n";
        let options: FormOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.label_position, LabelPosition::Right);
        assert_eq!(options.label_width, 200);
        assert_eq!(options.submit_text, "Run");
        assert_eq!(options.label_suffix, " : ");
    }

    #[test]
    fn test_deserialize_round_trips_client_spelling() {
        let options: FormOptions =
            serde_json::from_value(json!({"labelWidth": "96px", "suffix": ""})).unwrap();
        assert_eq!(options.label_width, 96);
        assert_eq!(options.label_suffix, "");
        assert_eq!(options.label_position, LabelPosition::Top);
    }

    #[test]
    fn test_rejects_bad_width() {
        let result: Result<FormOptions, _> = serde_json::from_value(json!({"labelWidth": "wide"}));
        assert!(result.is_err());
    }
}
