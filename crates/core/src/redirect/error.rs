//! Error types for redirect-rule evaluation.

use thiserror::Error;

/// Errors raised while evaluating redirect rules or expanding URL
/// templates.
///
/// Registered readers are trait objects and therefore always invocable,
/// so the only failure mode is a rule or template naming a reader that
/// was never registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    #[error("Invalid reader: {name}")]
    InvalidReader { name: String },
}
