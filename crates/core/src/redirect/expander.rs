// URL template expansion - replaces reader references inside a redirect
// URL template with live context values, returning a new structure

use serde_json::{Map, Value};

use crate::redirect::context::EvalContext;
use crate::redirect::error::RedirectError;
use crate::redirect::registry::ReaderRegistry;

/// Mapping key whose value is expanded as a nested template (the
/// query-parameter block of a URL descriptor).
pub const QUERY_KEY: &str = "?";

/// Expand `template` against the current context.
///
/// Exactly two shapes are rewritten: an array of two strings is a
/// `[reader, key]` reference and becomes the looked-up value (`Null`
/// when the reader yields nothing), and a mapping entry under [`QUERY_KEY`]
/// is expanded recursively as a nested template. Every other node,
/// composite or scalar, passes through unchanged, so expanding a
/// purely-literal template is the identity.
pub fn expand_url(
    registry: &ReaderRegistry,
    context: &EvalContext<'_>,
    template: &Value,
) -> Result<Value, RedirectError> {
    if let Some((reader, key)) = reader_reference(template) {
        return resolve_reference(registry, context, reader, key);
    }

    match template {
        Value::Object(entries) => {
            let mut expanded = Map::new();
            for (name, value) in entries {
                let resolved = if name == QUERY_KEY {
                    expand_url(registry, context, value)?
                } else if let Some((reader, key)) = reader_reference(value) {
                    resolve_reference(registry, context, reader, key)?
                } else {
                    value.clone()
                };
                expanded.insert(name.clone(), resolved);
            }
            Ok(Value::Object(expanded))
        }
        other => Ok(other.clone()),
    }
}

/// A reader reference is an array of exactly two strings. Any other
/// array shape is template data, not a reference.
pub(crate) fn reader_reference(value: &Value) -> Option<(&str, &str)> {
    match value.as_array()?.as_slice() {
        [Value::String(reader), Value::String(key)] => Some((reader, key)),
        _ => None,
    }
}

fn resolve_reference(
    registry: &ReaderRegistry,
    context: &EvalContext<'_>,
    reader: &str,
    key: &str,
) -> Result<Value, RedirectError> {
    Ok(registry.lookup(reader, context, key)?.unwrap_or(Value::Null))
}
