//! Evaluation context: the request, entity, and subject views handed to
//! readers.

use serde_json::{Map, Value};

/// Read-only view of the current request, as the host framework adapter
/// exposes it.
pub trait RequestState {
    /// Request attribute or routing parameter.
    fn param(&self, name: &str) -> Option<Value>;

    /// Parsed request-body field.
    fn data(&self, name: &str) -> Option<Value>;

    /// Query-string parameter.
    fn query(&self, name: &str) -> Option<Value>;
}

/// Read-only view of the entity the action operated on.
pub trait EntityState {
    fn field(&self, name: &str) -> Option<Value>;
}

/// Mutable per-event state bag.
///
/// Carries arbitrary keys set by the action plus the redirect-target
/// slot the lifecycle hook writes into. Redirect evaluation itself only
/// reads entries; the target slot is the one piece of state it mutates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subject {
    entries: Map<String, Value>,
    url: Option<Value>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// The redirect target chosen for this event, if any rule matched.
    pub fn url(&self) -> Option<&Value> {
        self.url.as_ref()
    }

    pub fn set_url(&mut self, url: Value) {
        self.url = Some(url);
    }
}

/// Borrowed view of the three data sources a reader can consult.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub request: &'a dyn RequestState,
    pub entity: &'a dyn EntityState,
    pub subject: &'a Subject,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        request: &'a dyn RequestState,
        entity: &'a dyn EntityState,
        subject: &'a Subject,
    ) -> Self {
        Self {
            request,
            entity,
            subject,
        }
    }
}
