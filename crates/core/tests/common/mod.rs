use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use reroute_core::{EntityState, RequestState};
use serde_json::{json, Value};

#[allow(dead_code)]
pub fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(file_name)
}

#[allow(dead_code)]
pub fn read_fixture(file_name: &str) -> String {
    let path = fixture_path(file_name);
    fs::read_to_string(path).expect("fixture should be readable")
}

/// Map-backed request stub.
#[derive(Default)]
pub struct TestRequest {
    params: HashMap<String, Value>,
    data: HashMap<String, Value>,
    query: HashMap<String, Value>,
}

#[allow(dead_code)]
impl TestRequest {
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
}

impl RequestState for TestRequest {
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

/// Map-backed entity stub.
#[derive(Default)]
pub struct TestEntity {
    fields: HashMap<String, Value>,
}

#[allow(dead_code)]
impl TestEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

impl EntityState for TestEntity {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

#[allow(dead_code)]
pub fn published_article() -> TestEntity {
    TestEntity::new()
        .with_field("id", json!(42))
        .with_field("slug", json!("hello-world"))
        .with_field("published", json!(true))
}

#[allow(dead_code)]
pub fn draft_article() -> TestEntity {
    TestEntity::new()
        .with_field("id", json!(42))
        .with_field("slug", json!("hello-world"))
        .with_field("published", json!(false))
}
