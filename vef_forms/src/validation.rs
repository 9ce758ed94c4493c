//! Client-side validation directives.
//!
//! Rules are never evaluated on the server; they are serialized next to their
//! form item and the browser applies them in the order they were attached.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Event on which the client re-checks a rule unless told otherwise.
pub const DEFAULT_TRIGGER: &str = "blur";

/// JavaScript type a value must have for a type rule to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsType {
    Number,
    String,
}

impl JsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsType::Number => "number",
            JsType::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    Type(JsType),
    /// Character count bounds; `max: None` means unbounded.
    Length { min: usize, max: Option<usize> },
}

/// A validation rule attached to a single form item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    kind: RuleKind,
    message: Option<String>,
    trigger: String,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
            trigger: DEFAULT_TRIGGER.to_string(),
        }
    }

    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    pub fn type_check(js_type: JsType) -> Self {
        Self::new(RuleKind::Type(js_type))
    }

    pub fn length(min: usize, max: Option<usize>) -> Self {
        Self::new(RuleKind::Length { min, max })
    }

    /// Replace the client's default error message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = trigger.into();
        self
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Directive consumed by the client validator.
    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        data.insert("trigger".into(), Value::from(self.trigger.as_str()));
        if let Some(message) = &self.message {
            data.insert("message".into(), Value::from(message.as_str()));
        }
        match &self.kind {
            RuleKind::Required => {
                data.insert("required".into(), Value::Bool(true));
            }
            RuleKind::Type(js_type) => {
                data.insert("type".into(), Value::from(js_type.as_str()));
            }
            RuleKind::Length { min, max } => {
                data.insert("min".into(), Value::from(*min));
                data.insert("max".into(), max.map(Value::from).unwrap_or(Value::Null));
            }
        }
        Value::Object(data)
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rule_json() {
        assert_eq!(
            Rule::required().to_json(),
            json!({"trigger": "blur", "required": true})
        );
    }

    #[test]
    fn test_type_rule_with_message() {
        let rule = Rule::type_check(JsType::Number).with_message("numbers only");
        assert_eq!(
            rule.to_json(),
            json!({"trigger": "blur", "message": "numbers only", "type": "number"})
        );
    }

    #[test]
    fn test_length_rule_unbounded_max_is_null() {
        let rule = Rule::length(2, None).with_trigger("change");
        assert_eq!(
            rule.to_json(),
            json!({"trigger": "change", "min": 2, "max": null})
        );
        assert_eq!(
            Rule::length(0, Some(8)).to_json(),
            json!({"trigger": "blur", "min": 0, "max": 8})
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let rule = Rule::required().with_message("fill me");
        assert_eq!(serde_json::to_value(&rule).unwrap(), rule.to_json());
    }
}
