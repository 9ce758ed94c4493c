use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::binding::{FieldValue, RawValue};
use crate::error::{FormError, Result};
use crate::options::FormOptions;
use crate::schema::FormItem;

/// Document the client builds the form from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    pub items: Vec<Value>,
    pub defaults: Map<String, Value>,
    pub option: FormOptions,
}

/// The ordered, uniquely keyed items of one form.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    items: Vec<FormItem>,
    index: HashMap<String, usize>,
    defaults: Map<String, Value>,
    options: FormOptions,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Add an item after those already registered. A key may only be used
    /// once; a rejected item leaves the registry untouched.
    pub fn register(&mut self, item: impl Into<FormItem>) -> Result<()> {
        let item = item.into();
        if self.index.contains_key(item.key()) {
            log::warn!("Rejected duplicate form item '{}'", item.key());
            return Err(FormError::DuplicateKey {
                key: item.key().to_string(),
            });
        }
        log::debug!("Registered {} item '{}'", item.component(), item.key());
        self.defaults
            .insert(item.key().to_string(), item.default_value().clone());
        self.index.insert(item.key().to_string(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&FormItem> {
        self.index.get(key).map(|&position| &self.items[position])
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut FormItem> {
        let position = *self.index.get(key)?;
        self.items.get_mut(position)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(FormItem::key)
    }

    pub fn items(&self) -> &[FormItem] {
        &self.items
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Default values as they were at registration.
    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    /// The typed value of `key`, or `None` for an unknown key or an unset
    /// field. Conversion failures are reported for this field only.
    pub fn get_value(&self, key: &str) -> Result<Option<FieldValue>> {
        match self.get(key) {
            Some(item) => item.value(),
            None => Ok(None),
        }
    }

    /// Like [`get_value`](Self::get_value), with `fallback` standing in for a
    /// key that was never registered.
    pub fn get_value_or(&self, key: &str, fallback: FieldValue) -> Result<Option<FieldValue>> {
        match self.get(key) {
            Some(item) => item.value(),
            None => Ok(Some(fallback)),
        }
    }

    /// Store a submitted value. Unknown keys are ignored.
    pub fn set_raw_value(&mut self, key: &str, raw: impl Into<RawValue>) {
        match self.get_mut(key) {
            Some(item) => item.set_raw_value(raw),
            None => log::warn!("Ignoring value for unknown form item '{}'", key),
        }
    }

    /// Forget every submitted value.
    pub fn clear_values(&mut self) {
        for item in &mut self.items {
            item.clear_raw_value();
        }
    }

    pub fn schema(&self) -> FormSchema {
        FormSchema {
            items: self.items.iter().map(FormItem::to_json).collect(),
            defaults: self.defaults.clone(),
            option: self.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Input, Select, Slider};
    use serde_json::json;

    #[test]
    fn test_register_keeps_order() {
        let mut registry = FieldRegistry::new();
        registry.register(Slider::new("b")).unwrap();
        registry.register(Input::new("a")).unwrap();
        registry.register(Select::new("c", ["x"])).unwrap();
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("a"));
        assert!(!registry.contains("d"));
    }

    #[test]
    fn test_duplicate_key_leaves_first_item() {
        let mut registry = FieldRegistry::new();
        registry.register(Input::new("name").label("First")).unwrap();
        let err = registry
            .register(Input::new("name").label("Second"))
            .unwrap_err();
        assert_eq!(err, FormError::DuplicateKey { key: "name".into() });
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("name").unwrap().label(), "First");
    }

    #[test]
    fn test_defaults_captured_at_registration() {
        let mut registry = FieldRegistry::new();
        registry
            .register(Input::new("city").default_value("Oslo"))
            .unwrap();
        registry.register(Input::new("zip")).unwrap();
        registry.set_raw_value("city", "Bergen");
        assert_eq!(registry.defaults()["city"], json!("Oslo"));
        assert_eq!(registry.defaults()["zip"], Value::Null);
    }

    #[test]
    fn test_get_value_or_fallback() {
        let registry = FieldRegistry::new();
        assert_eq!(
            registry
                .get_value_or("missing", FieldValue::Integer(5))
                .unwrap(),
            Some(FieldValue::Integer(5))
        );
        assert_eq!(registry.get_value("missing").unwrap(), None);
    }

    #[test]
    fn test_clear_values() {
        let mut registry = FieldRegistry::new();
        registry.register(Input::new("name")).unwrap();
        registry.set_raw_value("name", "Ada");
        registry.clear_values();
        assert_eq!(registry.get_value("name").unwrap(), None);
    }

    #[test]
    fn test_schema_option_uses_registry_options() {
        let options = FormOptions::default().submit_text("Send");
        let registry = FieldRegistry::with_options(options.clone());
        let schema = registry.schema();
        assert!(schema.items.is_empty());
        assert_eq!(schema.option, options);
        assert_eq!(
            serde_json::to_value(&schema).unwrap()["option"]["submitText"],
            json!("Send")
        );
    }
}
