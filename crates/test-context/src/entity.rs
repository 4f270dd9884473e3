use std::collections::HashMap;

use reroute_core::redirect::context::EntityState;
use serde_json::Value;

/// In-memory entity double exposing a flat field map.
#[derive(Debug, Clone, Default)]
pub struct StubEntity {
    fields: HashMap<String, Value>,
}

impl StubEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn from_fields(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl EntityState for StubEntity {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}
