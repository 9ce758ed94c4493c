//! Builders for each form component.
//!
//! Every builder converts into a [`FormItem`]; the conversion is where the
//! rules implied by the configuration get attached.
//!
//! ```
//! use vef_forms::{FieldRegistry, Input, Slider};
//!
//! let mut registry = FieldRegistry::new();
//! registry.register(Input::new("name").label("Name")).unwrap();
//! registry.register(Slider::new("volume").max(11)).unwrap();
//! assert_eq!(registry.len(), 2);
//! ```

use serde_json::Value;
use vef_type_converter::{Scalar, ValueType};

use crate::schema::{
    scalar_json, DateConfig, FormItem, InputConfig, ItemCommon, ItemKind, Number, SelectConfig,
    SelectOption, SliderConfig, SwitchConfig, SwitchValues, TextareaConfig, UploadConfig,
};
use crate::validation::Rule;

macro_rules! common_setters {
    ($builder:ty) => {
        impl $builder {
            /// Display label; defaults to the title-cased key.
            pub fn label(mut self, label: impl Into<String>) -> Self {
                self.common.label = label.into();
                self
            }

            /// Help text; defaults to the key.
            pub fn description(mut self, description: impl Into<String>) -> Self {
                self.common.description = description.into();
                self
            }

            /// Items are required unless told otherwise.
            pub fn required(mut self, required: bool) -> Self {
                self.common.required = required;
                self
            }

            pub fn disabled(mut self, disabled: bool) -> Self {
                self.common.disabled = disabled;
                self
            }

            /// Initial value shown by the client.
            pub fn default_value(mut self, value: impl Into<Value>) -> Self {
                self.common.default = value.into();
                self
            }

            /// Attach a rule ahead of any generated ones.
            pub fn rule(mut self, rule: Rule) -> Self {
                self.common.rules.push(rule);
                self
            }

            /// Turn off rule generation from `required`, `is_number` and lengths.
            pub fn auto_rules(mut self, enabled: bool) -> Self {
                self.common.auto_rules = enabled;
                self
            }
        }
    };
}

/// Single line text, optionally restricted to integers.
#[derive(Debug, Clone)]
pub struct Input {
    common: ItemCommon,
    config: InputConfig,
}

impl Input {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            config: InputConfig::default(),
        }
    }

    /// Accept integers only; the value reads back as an integer.
    pub fn is_number(mut self, is_number: bool) -> Self {
        self.config.is_number = is_number;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = Some(max_length);
        self
    }

    /// Ask the client to strip surrounding whitespace.
    pub fn trim(mut self, trim: bool) -> Self {
        self.config.trim = trim;
        self
    }
}

common_setters!(Input);

impl From<Input> for FormItem {
    fn from(builder: Input) -> Self {
        FormItem::build(builder.common, ItemKind::Input(builder.config))
    }
}

/// Multi-line text. Accepts every [`Input`] option.
#[derive(Debug, Clone)]
pub struct Textarea {
    common: ItemCommon,
    config: TextareaConfig,
}

impl Textarea {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            config: TextareaConfig {
                input: InputConfig::default(),
                rows: 3,
            },
        }
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.config.rows = rows;
        self
    }

    pub fn is_number(mut self, is_number: bool) -> Self {
        self.config.input.is_number = is_number;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.input.min_length = min_length;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.input.max_length = Some(max_length);
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.config.input.trim = trim;
        self
    }
}

common_setters!(Textarea);

impl From<Textarea> for FormItem {
    fn from(builder: Textarea) -> Self {
        FormItem::build(builder.common, ItemKind::Textarea(builder.config))
    }
}

/// File picker. The value read back is the path the upload was saved to.
#[derive(Debug, Clone)]
pub struct Upload {
    common: ItemCommon,
    config: UploadConfig,
}

impl Upload {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            config: UploadConfig {
                accept: "*".to_string(),
                drag: true,
                select_text: "select file".to_string(),
                drag_text: "drag here".to_string(),
            },
        }
    }

    /// MIME types or extensions, e.g. `image/*` or `.csv,.xlsx`.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.config.accept = accept.into();
        self
    }

    pub fn drag(mut self, drag: bool) -> Self {
        self.config.drag = drag;
        self
    }

    pub fn select_text(mut self, text: impl Into<String>) -> Self {
        self.config.select_text = text.into();
        self
    }

    pub fn drag_text(mut self, text: impl Into<String>) -> Self {
        self.config.drag_text = text.into();
        self
    }
}

common_setters!(Upload);

impl From<Upload> for FormItem {
    fn from(builder: Upload) -> Self {
        FormItem::build(builder.common, ItemKind::Upload(builder.config))
    }
}

#[derive(Debug, Clone)]
pub struct Select {
    common: ItemCommon,
    config: SelectConfig,
}

impl Select {
    pub fn new<I, O>(key: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        Self {
            common: ItemCommon::new(key),
            config: SelectConfig {
                options: options.into_iter().map(Into::into).collect(),
                multi: false,
            },
        }
    }

    pub fn multi(mut self, multi: bool) -> Self {
        self.config.multi = multi;
        self
    }
}

common_setters!(Select);

impl From<Select> for FormItem {
    fn from(builder: Select) -> Self {
        FormItem::build(builder.common, ItemKind::Select(builder.config))
    }
}

#[derive(Debug, Clone)]
pub struct Date {
    common: ItemCommon,
    config: DateConfig,
}

impl Date {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            config: DateConfig {
                format: "YYYY-MM-DD".to_string(),
            },
        }
    }

    /// Client-side display and value format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }
}

common_setters!(Date);

impl From<Date> for FormItem {
    fn from(builder: Date) -> Self {
        FormItem::build(builder.common, ItemKind::Date(builder.config))
    }
}

#[derive(Debug, Clone)]
pub struct DateTime {
    common: ItemCommon,
    config: DateConfig,
}

impl DateTime {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            config: DateConfig {
                format: "YYYY-MM-DD HH:mm:ss".to_string(),
            },
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }
}

common_setters!(DateTime);

impl From<DateTime> for FormItem {
    fn from(builder: DateTime) -> Self {
        FormItem::build(builder.common, ItemKind::DateTime(builder.config))
    }
}

/// Numeric slider over `min..=max`. Integer bounds give integer values,
/// anything else gives floats.
#[derive(Debug, Clone)]
pub struct Slider {
    common: ItemCommon,
    min: Number,
    max: Number,
    step: Number,
    range: bool,
    tooltip: bool,
    gap: bool,
    marks: Option<Vec<(Number, String)>>,
}

impl Slider {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            min: Number::Integer(0),
            max: Number::Integer(100),
            step: Number::Integer(1),
            range: false,
            tooltip: true,
            gap: false,
            marks: None,
        }
    }

    pub fn min(mut self, min: impl Into<Number>) -> Self {
        self.min = min.into();
        self
    }

    pub fn max(mut self, max: impl Into<Number>) -> Self {
        self.max = max.into();
        self
    }

    pub fn step(mut self, step: impl Into<Number>) -> Self {
        self.step = step.into();
        self
    }

    /// Select a `low,high` pair instead of a single value.
    pub fn range(mut self, range: bool) -> Self {
        self.range = range;
        self
    }

    pub fn tooltip(mut self, tooltip: bool) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Show step stops.
    pub fn gap(mut self, gap: bool) -> Self {
        self.gap = gap;
        self
    }

    /// Label a position on the track. Marks keep insertion order.
    pub fn mark(mut self, position: impl Into<Number>, label: impl Into<String>) -> Self {
        self.marks
            .get_or_insert_with(Vec::new)
            .push((position.into(), label.into()));
        self
    }
}

common_setters!(Slider);

impl From<Slider> for FormItem {
    fn from(builder: Slider) -> Self {
        let value_type = if builder.min.is_integer() && builder.max.is_integer() {
            ValueType::Integer
        } else {
            ValueType::Float
        };
        let config = SliderConfig {
            min: builder.min,
            max: builder.max,
            step: builder.step,
            range: builder.range,
            tooltip: builder.tooltip,
            gap: builder.gap,
            marks: builder.marks,
            value_type,
        };
        FormItem::build(builder.common, ItemKind::Slider(config))
    }
}

/// Two-state toggle submitting one of a pair of values.
#[derive(Debug, Clone)]
pub struct Switch {
    common: ItemCommon,
    values: SwitchValues,
    active_color: String,
    inactive_color: String,
    text: Option<(String, String)>,
    show_text: bool,
}

impl Switch {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            common: ItemCommon::new(key),
            values: SwitchValues::default(),
            active_color: "#13ce66".to_string(),
            inactive_color: "#ff4949".to_string(),
            text: None,
            show_text: false,
        }
    }

    /// Values submitted when on and off; `(true, false)` by default.
    pub fn values(mut self, values: SwitchValues) -> Self {
        self.values = values;
        self
    }

    pub fn colors(mut self, active: impl Into<String>, inactive: impl Into<String>) -> Self {
        self.active_color = active.into();
        self.inactive_color = inactive.into();
        self
    }

    /// Captions for both states; defaults to the values themselves.
    pub fn text(mut self, active: impl Into<String>, inactive: impl Into<String>) -> Self {
        self.text = Some((active.into(), inactive.into()));
        self
    }

    pub fn show_text(mut self, show_text: bool) -> Self {
        self.show_text = show_text;
        self
    }
}

common_setters!(Switch);

fn caption(value: &Scalar) -> String {
    match value {
        Scalar::Boolean(true) => "True".to_string(),
        Scalar::Boolean(false) => "False".to_string(),
        other => other.to_string(),
    }
}

impl From<Switch> for FormItem {
    fn from(builder: Switch) -> Self {
        let mut common = builder.common;
        if common.default.is_null() {
            common.default = scalar_json(builder.values.active());
        }
        let (active_text, inactive_text) = builder.text.unwrap_or_else(|| {
            (
                caption(builder.values.active()),
                caption(builder.values.inactive()),
            )
        });
        let config = SwitchConfig {
            values: builder.values,
            active_color: builder.active_color,
            inactive_color: builder.inactive_color,
            active_text,
            inactive_text,
            show_text: builder.show_text,
        };
        FormItem::build(common, ItemKind::Switch(config))
    }
}
