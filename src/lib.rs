pub use vef_forms::{
    Date, DateTime, FieldRegistry, FieldValue, FormError, FormItem, FormOptions, FormSchema, Input,
    ItemKind, JsType, LabelPosition, Number, RawValue, Rule, RuleKind, Select, SelectOption, Slider,
    Switch, SwitchValues, Textarea, Upload,
};
pub use vef_type_converter::{ConversionError, Scalar, TypeConverter, ValueType};
pub use vef_webservice::{
    load_config_from_path, AppConfig, ConfigError, ConsoleEvent, ConsoleSession, SubmitContext,
    VefApp,
};
