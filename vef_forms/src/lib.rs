//! vef_forms - declarative form schema for single-window applications
//!
//! A [`FieldRegistry`] holds an ordered set of [`FormItem`]s. Each item knows
//! how to describe itself to the browser (component, layout keys and client
//! validation [`Rule`]s) and how to turn the raw string submitted for it back
//! into a typed [`FieldValue`].

pub mod binding;
pub mod components;
pub mod error;
pub mod options;
pub mod registry;
pub mod schema;
pub mod validation;


pub use binding::{FieldValue, RawValue};
pub use components::{Date, DateTime, Input, Select, Slider, Switch, Textarea, Upload};
pub use error::{FormError, Result};
pub use options::{FormOptions, LabelPosition};
pub use registry::{FieldRegistry, FormSchema};
pub use schema::{FormItem, ItemKind, Number, SelectOption, SwitchValues};
pub use validation::{JsType, Rule, RuleKind};
pub use vef_type_converter::{Scalar, ValueType};
