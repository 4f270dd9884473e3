use std::collections::HashMap;

use reroute_core::redirect::context::RequestState;
use serde_json::Value;

/// In-memory request double with routing params, body data, and query
/// args held in plain maps.
#[derive(Debug, Clone, Default)]
pub struct StubRequest {
    params: HashMap<String, Value>,
    data: HashMap<String, Value>,
    query: HashMap<String, Value>,
}

impl StubRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    pub fn with_data(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: Value) -> Self {
        self.query.insert(name.into(), value);
        self
    }

    /// Replace all three maps at once.
    pub fn from_maps(
        params: HashMap<String, Value>,
        data: HashMap<String, Value>,
        query: HashMap<String, Value>,
    ) -> Self {
        Self {
            params,
            data,
            query,
        }
    }
}

impl RequestState for StubRequest {
    fn param(&self, name: &str) -> Option<Value> {
        self.params.get(name).cloned()
    }

    fn data(&self, name: &str) -> Option<Value> {
        self.data.get(name).cloned()
    }

    fn query(&self, name: &str) -> Option<Value> {
        self.query.get(name).cloned()
    }
}
