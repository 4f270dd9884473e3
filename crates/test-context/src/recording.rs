use std::sync::{Arc, Mutex};

use reroute_core::redirect::context::EvalContext;
use reroute_core::redirect::registry::Reader;
use serde_json::Value;

/// Reader decorator that records every key it is asked for before
/// delegating to the wrapped reader. Register it under a reader name to
/// observe which guards and template references actually consult it.
pub struct RecordingReader {
    inner: Arc<dyn Reader>,
    calls: Mutex<Vec<String>>,
}

impl RecordingReader {
    pub fn wrapping(inner: Arc<dyn Reader>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reader that answers every key with the same fixed value.
    pub fn returning(value: Option<Value>) -> Self {
        Self::wrapping(Arc::new(
            move |_context: &EvalContext<'_>, _key: &str| value.clone(),
        ))
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn recorded_keys(&self) -> Vec<String> {
        self.calls().clone()
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reader for RecordingReader {
    fn resolve(&self, context: &EvalContext<'_>, key: &str) -> Option<Value> {
        self.calls().push(key.to_string());
        self.inner.resolve(context, key)
    }
}
