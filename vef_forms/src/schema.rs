use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use vef_type_converter::converters::float_to_string;
use vef_type_converter::{Scalar, ValueType};

use crate::binding::{self, FieldValue, RawValue};
use crate::error::{FormError, Result};
use crate::validation::{JsType, Rule};

/// Attributes every form item carries, whatever its component.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCommon {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) disabled: bool,
    pub(crate) default: Value,
    pub(crate) rules: Vec<Rule>,
    pub(crate) auto_rules: bool,
}

impl ItemCommon {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: title_case(&key),
            description: key.clone(),
            key,
            required: true,
            disabled: false,
            default: Value::Null,
            rules: Vec::new(),
            auto_rules: true,
        }
    }
}

/// A numeric slider bound, step or mark position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(v) => f.write_str(&float_to_string(*v)),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(i64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(i64::from(value))
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Integer(i) => Value::from(i),
            Number::Float(f) => Value::from(f),
        }
    }
}

/// One choice of a select item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub key: String,
    pub label: String,
}

impl SelectOption {
    /// An option whose label is its key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl From<&str> for SelectOption {
    fn from(key: &str) -> Self {
        SelectOption::new(key)
    }
}

impl From<String> for SelectOption {
    fn from(key: String) -> Self {
        SelectOption::new(key)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((key, label): (&str, &str)) -> Self {
        SelectOption::new(key).with_label(label)
    }
}

/// The values a switch submits when on and off. Both share one type.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchValues {
    active: Scalar,
    inactive: Scalar,
}

impl SwitchValues {
    pub fn new(active: impl Into<Scalar>, inactive: impl Into<Scalar>) -> Result<Self> {
        let active = active.into();
        let inactive = inactive.into();
        if active.value_type() != inactive.value_type() {
            return Err(FormError::MismatchedSwitchValues {
                active: active.value_type(),
                inactive: inactive.value_type(),
            });
        }
        Ok(Self { active, inactive })
    }

    pub fn active(&self) -> &Scalar {
        &self.active
    }

    pub fn inactive(&self) -> &Scalar {
        &self.inactive
    }

    /// Type non-boolean submissions are converted into.
    pub fn value_type(&self) -> ValueType {
        self.active.value_type()
    }
}

impl Default for SwitchValues {
    fn default() -> Self {
        Self {
            active: Scalar::Boolean(true),
            inactive: Scalar::Boolean(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputConfig {
    pub is_number: bool,
    pub min_length: usize,
    pub max_length: Option<usize>,
    pub trim: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextareaConfig {
    pub input: InputConfig,
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadConfig {
    /// File filter in `<input accept>` syntax.
    pub accept: String,
    pub drag: bool,
    pub select_text: String,
    pub drag_text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectConfig {
    pub options: Vec<SelectOption>,
    pub multi: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateConfig {
    pub format: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub min: Number,
    pub max: Number,
    pub step: Number,
    pub range: bool,
    pub tooltip: bool,
    pub gap: bool,
    pub marks: Option<Vec<(Number, String)>>,
    /// Integer when both bounds are integers, float otherwise. Fixed at build.
    pub(crate) value_type: ValueType,
}

impl SliderConfig {
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchConfig {
    pub values: SwitchValues,
    pub active_color: String,
    pub inactive_color: String,
    pub active_text: String,
    pub inactive_text: String,
    pub show_text: bool,
}

/// Component-specific configuration of a form item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Input(InputConfig),
    Textarea(TextareaConfig),
    Upload(UploadConfig),
    Select(SelectConfig),
    Date(DateConfig),
    DateTime(DateConfig),
    Slider(SliderConfig),
    Switch(SwitchConfig),
}

impl ItemKind {
    /// Component tag the client uses to pick a widget.
    pub fn component(&self) -> &'static str {
        match self {
            ItemKind::Input(_) => "input",
            ItemKind::Textarea(_) => "textarea",
            ItemKind::Upload(_) => "upload",
            ItemKind::Select(_) => "select",
            ItemKind::Date(_) => "date",
            ItemKind::DateTime(_) => "datetime",
            ItemKind::Slider(_) => "slider",
            ItemKind::Switch(_) => "switch",
        }
    }

    fn text_input(&self) -> Option<&InputConfig> {
        match self {
            ItemKind::Input(input) => Some(input),
            ItemKind::Textarea(textarea) => Some(&textarea.input),
            _ => None,
        }
    }

    fn extend_document(&self, data: &mut Map<String, Value>) {
        if let Some(input) = self.text_input() {
            if input.is_number {
                data.insert("isNumber".into(), Value::Bool(true));
            }
            if input.trim {
                data.insert("trim".into(), Value::Bool(true));
            }
            if input.min_length > 0 {
                data.insert("minLength".into(), Value::from(input.min_length));
            }
            if let Some(max_length) = input.max_length.filter(|max| *max > 0) {
                data.insert("maxLength".into(), Value::from(max_length));
            }
        }

        match self {
            ItemKind::Input(_) => {}
            ItemKind::Textarea(textarea) => {
                data.insert("rows".into(), Value::from(textarea.rows));
            }
            ItemKind::Upload(upload) => {
                data.insert("accept".into(), Value::from(upload.accept.as_str()));
                data.insert("drag".into(), Value::Bool(upload.drag));
                data.insert("selectText".into(), Value::from(upload.select_text.as_str()));
                data.insert("dragText".into(), Value::from(upload.drag_text.as_str()));
            }
            ItemKind::Select(select) => {
                data.insert("multi".into(), Value::Bool(select.multi));
                let options = select
                    .options
                    .iter()
                    .map(|option| {
                        let mut entry = Map::new();
                        entry.insert("key".into(), Value::from(option.key.as_str()));
                        entry.insert("label".into(), Value::from(option.label.as_str()));
                        Value::Object(entry)
                    })
                    .collect();
                data.insert("options".into(), Value::Array(options));
            }
            ItemKind::Date(date) | ItemKind::DateTime(date) => {
                data.insert("format".into(), Value::from(date.format.as_str()));
            }
            ItemKind::Slider(slider) => {
                data.insert("min".into(), slider.min.into());
                data.insert("max".into(), slider.max.into());
                data.insert("step".into(), slider.step.into());
                if !slider.tooltip {
                    data.insert("tooltip".into(), Value::Bool(false));
                }
                if slider.gap {
                    data.insert("gap".into(), Value::Bool(true));
                }
                if let Some(marks) = &slider.marks {
                    let marks = marks
                        .iter()
                        .map(|(position, label)| {
                            (position.to_string(), Value::from(label.as_str()))
                        })
                        .collect();
                    data.insert("marks".into(), Value::Object(marks));
                }
                if slider.range {
                    data.insert("range".into(), Value::Bool(true));
                }
            }
            ItemKind::Switch(switch) => {
                data.insert("activeColor".into(), Value::from(switch.active_color.as_str()));
                data.insert("inactiveColor".into(), Value::from(switch.inactive_color.as_str()));
                data.insert("activeValue".into(), scalar_json(switch.values.active()));
                data.insert("inactiveValue".into(), scalar_json(switch.values.inactive()));
                if switch.show_text {
                    data.insert("showText".into(), Value::Bool(true));
                    data.insert("activeText".into(), Value::from(switch.active_text.as_str()));
                    data.insert("inactiveText".into(), Value::from(switch.inactive_text.as_str()));
                }
            }
        }
    }
}

/// A single field of a form: its description plus the value last submitted
/// for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    common: ItemCommon,
    kind: ItemKind,
    raw_value: Option<RawValue>,
}

impl FormItem {
    /// Assemble an item, attaching the rules implied by its configuration.
    pub(crate) fn build(mut common: ItemCommon, kind: ItemKind) -> Self {
        attach_auto_rules(&mut common, &kind);
        Self {
            common,
            kind,
            raw_value: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.common.key
    }

    pub fn component(&self) -> &'static str {
        self.kind.component()
    }

    pub fn label(&self) -> &str {
        &self.common.label
    }

    pub fn description(&self) -> &str {
        &self.common.description
    }

    pub fn is_required(&self) -> bool {
        self.common.required
    }

    pub fn is_disabled(&self) -> bool {
        self.common.disabled
    }

    pub fn default_value(&self) -> &Value {
        &self.common.default
    }

    pub fn rules(&self) -> &[Rule] {
        &self.common.rules
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn raw_value(&self) -> Option<&RawValue> {
        self.raw_value.as_ref()
    }

    /// Store the value submitted for this item, replacing any earlier one.
    pub fn set_raw_value(&mut self, raw: impl Into<RawValue>) {
        self.raw_value = Some(raw.into());
    }

    pub fn clear_raw_value(&mut self) {
        self.raw_value = None;
    }

    /// The raw value converted to this item's type. Computed on every call.
    pub fn value(&self) -> Result<Option<FieldValue>> {
        binding::coerce(&self.kind, self.key(), self.raw_value.as_ref())
    }

    /// Document the client renders this item from.
    pub fn to_json(&self) -> Value {
        let mut data = base_document(&self.common, self.component());
        self.kind.extend_document(&mut data);
        Value::Object(data)
    }
}

impl Serialize for FormItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Keys shared by every component. Variant keys are layered on top.
fn base_document(common: &ItemCommon, component: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("component".into(), Value::from(component));
    data.insert("key".into(), Value::from(common.key.as_str()));
    data.insert("disabled".into(), Value::Bool(common.disabled));
    data.insert("required".into(), Value::Bool(common.required));
    data.insert("label".into(), Value::from(common.label.as_str()));
    data.insert("description".into(), Value::from(common.description.as_str()));
    data.insert("default".into(), common.default.clone());
    data.insert(
        "rules".into(),
        Value::Array(common.rules.iter().map(Rule::to_json).collect()),
    );
    data
}

/// Append the rules implied by the item's configuration after any rules the
/// caller supplied. Runs once, at build time.
fn attach_auto_rules(common: &mut ItemCommon, kind: &ItemKind) {
    if !common.auto_rules {
        return;
    }
    if common.required {
        common.rules.push(Rule::required());
    }
    if let Some(input) = kind.text_input() {
        if input.is_number {
            common.rules.push(Rule::type_check(JsType::Number));
        }
        if input.min_length > 0 || input.max_length.is_some() {
            common.rules.push(Rule::length(input.min_length, input.max_length));
        }
    }
}

pub(crate) fn scalar_json(value: &Scalar) -> Value {
    match value {
        Scalar::Boolean(b) => Value::Bool(*b),
        Scalar::Integer(i) => Value::from(*i),
        Scalar::Float(f) => Value::from(*f),
        Scalar::String(s) => Value::from(s.as_str()),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest:
/// `first_name` becomes `First_Name`.
pub(crate) fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut previous_alphabetic = false;
    for c in key.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }
    out
}
