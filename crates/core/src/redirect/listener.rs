//! Lifecycle surface: applies rule evaluation to an action's subject at
//! the before-redirect moment.

use std::sync::Arc;

use crate::model::RedirectRule;
use crate::redirect::context::{EntityState, EvalContext, RequestState, Subject};
use crate::redirect::error::RedirectError;
use crate::redirect::evaluator::evaluate;
use crate::redirect::registry::{Reader, ReaderRegistry};

/// Owns a reader registry and hooks redirect resolution into the host
/// framework's before-redirect event.
pub struct RedirectListener {
    readers: ReaderRegistry,
}

impl RedirectListener {
    /// Ordering slot for the before-redirect event, late enough that
    /// application listeners run first.
    pub const PRIORITY: u32 = 90;

    /// Listener with the built-in readers registered.
    pub fn new() -> Self {
        Self {
            readers: ReaderRegistry::new(),
        }
    }

    pub fn with_registry(readers: ReaderRegistry) -> Self {
        Self { readers }
    }

    pub fn readers(&self) -> &ReaderRegistry {
        &self.readers
    }

    /// The reader registered under `name`, if any.
    pub fn reader(&self, name: &str) -> Option<Arc<dyn Reader>> {
        self.readers.get(name)
    }

    /// Add or replace a reader, returning the displaced one.
    pub fn register_reader(
        &mut self,
        name: impl Into<String>,
        reader: Arc<dyn Reader>,
    ) -> Option<Arc<dyn Reader>> {
        self.readers.register(name, reader)
    }

    /// Before-redirect hook.
    ///
    /// An empty rule list leaves the subject untouched, as does an
    /// evaluation where no rule matches; the host framework then falls
    /// back to its default redirect. When a rule matches, its expanded
    /// URL is written into the subject's redirect-target slot.
    pub fn before_redirect(
        &self,
        rules: &[RedirectRule],
        request: &dyn RequestState,
        entity: &dyn EntityState,
        subject: &mut Subject,
    ) -> Result<(), RedirectError> {
        if rules.is_empty() {
            return Ok(());
        }

        let url = {
            let context = EvalContext::new(request, entity, subject);
            evaluate(&self.readers, &context, rules)?
        };

        if let Some(url) = url {
            subject.set_url(url);
        }

        Ok(())
    }
}

impl Default for RedirectListener {
    fn default() -> Self {
        Self::new()
    }
}
