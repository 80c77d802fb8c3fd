//! # Resource Decorator
//!
//! Presentation metadata for a model: which fields each action shows, how a
//! record labels itself, and the primary-key name. Field lists are registered
//! explicitly per action and read back with [`Decorator::fields_for`]; there
//! is no reflective accessor generation.

use dashmap::DashMap;
use serde_json::Value;

/// Presentation metadata strategy.
pub trait Decorator: Send + Sync {
    /// Fully-qualified class name of this decorator.
    fn decorator_name(&self) -> &str;

    /// Register the field list an action renders.
    fn register_fields(&self, action: &str, fields: Vec<String>);

    /// Field list for an action. Empty when nothing was registered; callers
    /// fall back to the record's own keys.
    fn fields_for(&self, action: &str) -> Vec<String>;

    /// Name of the primary-key field.
    fn primary_key(&self) -> String {
        "id".to_string()
    }

    /// Human label for a record: its `name` field when present, otherwise
    /// the primary key value.
    fn display_name(&self, resource: &Value) -> String {
        resource
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                resource
                    .get(self.primary_key().as_str())
                    .map(|id| id.to_string())
                    .unwrap_or_default()
            })
    }
}

/// Generic decorator used when no dedicated decorator is registered for a
/// model. Field lists live in an explicit action-to-fields map.
pub struct ResourceDecorator {
    name: String,
    fields: DashMap<String, Vec<String>>,
}

impl ResourceDecorator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: DashMap::new(),
        }
    }
}

impl Decorator for ResourceDecorator {
    fn decorator_name(&self) -> &str {
        &self.name
    }

    fn register_fields(&self, action: &str, fields: Vec<String>) {
        self.fields.insert(action.to_string(), fields);
    }

    fn fields_for(&self, action: &str) -> Vec<String> {
        if let Some(fields) = self.fields.get(action) {
            return fields.clone();
        }
        // Fall back to the default list when an action has no dedicated one
        self.fields
            .get("default")
            .map(|fields| fields.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registered_fields_win() {
        let decorator = ResourceDecorator::new("ProductDecorator");
        decorator.register_fields("index", vec!["id".to_string(), "name".to_string()]);
        decorator.register_fields("default", vec!["id".to_string()]);

        assert_eq!(decorator.fields_for("index"), vec!["id", "name"]);
        assert_eq!(decorator.fields_for("show"), vec!["id"]);
    }

    #[test]
    fn test_unregistered_action_is_empty() {
        let decorator = ResourceDecorator::new("ProductDecorator");
        assert!(decorator.fields_for("index").is_empty());
    }

    #[test]
    fn test_display_name_prefers_name_field() {
        let decorator = ResourceDecorator::new("ProductDecorator");
        assert_eq!(
            decorator.display_name(&json!({"id": 1, "name": "Widget"})),
            "Widget"
        );
        assert_eq!(decorator.display_name(&json!({"id": 7})), "7");
    }
}
