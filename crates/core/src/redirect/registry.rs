//! Reader registry: named strategies for pulling values out of the
//! evaluation context.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::redirect::context::EvalContext;
use crate::redirect::error::RedirectError;

/// Names of the readers every fresh registry starts with.
pub const BUILTIN_READERS: [&str; 5] = [
    "request.key",
    "request.data",
    "request.query",
    "entity.field",
    "subject.key",
];

/// A named value-extraction strategy.
///
/// Readers are consulted for rule guards and for `[reader, key]`
/// references inside URL templates. A reader answers `None` when the
/// requested key is absent from its source; it never mutates the
/// context.
pub trait Reader: Send + Sync {
    fn resolve(&self, context: &EvalContext<'_>, key: &str) -> Option<Value>;
}

impl<F> Reader for F
where
    F: Fn(&EvalContext<'_>, &str) -> Option<Value> + Send + Sync,
{
    fn resolve(&self, context: &EvalContext<'_>, key: &str) -> Option<Value> {
        self(context, key)
    }
}

fn read_request_key(context: &EvalContext<'_>, key: &str) -> Option<Value> {
    context.request.param(key)
}

fn read_request_data(context: &EvalContext<'_>, key: &str) -> Option<Value> {
    context.request.data(key)
}

fn read_request_query(context: &EvalContext<'_>, key: &str) -> Option<Value> {
    context.request.query(key)
}

fn read_entity_field(context: &EvalContext<'_>, key: &str) -> Option<Value> {
    context.entity.field(key)
}

fn read_subject_key(context: &EvalContext<'_>, key: &str) -> Option<Value> {
    context.subject.get(key).cloned()
}

/// String-keyed registry of [`Reader`]s.
///
/// Each registry is an owned instance; there is no process-global
/// reader state. Registration is last-write-wins.
#[derive(Clone)]
pub struct ReaderRegistry {
    readers: HashMap<String, Arc<dyn Reader>>,
}

impl ReaderRegistry {
    /// Registry pre-populated with the built-in readers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("request.key", Arc::new(read_request_key));
        registry.register("request.data", Arc::new(read_request_data));
        registry.register("request.query", Arc::new(read_request_query));
        registry.register("entity.field", Arc::new(read_entity_field));
        registry.register("subject.key", Arc::new(read_subject_key));
        registry
    }

    /// Registry with no readers at all.
    pub fn empty() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Add or replace a reader. Returns the reader previously registered
    /// under `name`, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        reader: Arc<dyn Reader>,
    ) -> Option<Arc<dyn Reader>> {
        self.readers.insert(name.into(), reader)
    }

    /// The reader registered under `name`, identity-preserved.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Reader>> {
        self.readers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.readers.contains_key(name)
    }

    /// Registered reader names, sorted for deterministic output.
    pub fn reader_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.readers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve the named reader and ask it for `key`.
    pub fn lookup(
        &self,
        name: &str,
        context: &EvalContext<'_>,
        key: &str,
    ) -> Result<Option<Value>, RedirectError> {
        match self.readers.get(name) {
            Some(reader) => Ok(reader.resolve(context, key)),
            None => Err(RedirectError::InvalidReader {
                name: name.to_string(),
            }),
        }
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
