//! Redirect-rule evaluation engine.
//!
//! This module provides the reader registry, first-match rule
//! evaluation, and URL-template expansion that decide where an action
//! redirects after it completes.
//!
//! # Example
//!
//! ```ignore
//! use reroute_core::redirect::evaluator::evaluate;
//! use reroute_core::redirect::registry::ReaderRegistry;
//!
//! let registry = ReaderRegistry::new();
//! let url = evaluate(&registry, &context, &rules)?;
//! ```
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod expander;
pub mod guard;
pub mod listener;
pub mod registry;

/// Redirect submodule identifier.
pub fn module_name() -> &'static str {
    "redirect"
}
