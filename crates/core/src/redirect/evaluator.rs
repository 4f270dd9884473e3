// First-match rule evaluation - walks the rule list in caller order and
// returns the expanded URL of the first rule whose guard value is truthy

use serde_json::Value;
use tracing::debug;

use crate::model::RedirectRule;
use crate::redirect::context::EvalContext;
use crate::redirect::diagnostics::{
    EvaluationDiagnostic, EvaluationOutcome, RedirectDecision, RuleDiagnostic,
};
use crate::redirect::error::RedirectError;
use crate::redirect::expander::expand_url;
use crate::redirect::guard::is_truthy;
use crate::redirect::registry::ReaderRegistry;

/// Evaluate `rules` in order against `context`.
///
/// `Ok(None)` means no rule matched and the caller keeps its default
/// redirect. An empty rule list short-circuits without consulting any
/// reader. An unknown reader name, in a guard or inside a winning URL
/// template, aborts evaluation with [`RedirectError::InvalidReader`].
pub fn evaluate(
    registry: &ReaderRegistry,
    context: &EvalContext<'_>,
    rules: &[RedirectRule],
) -> Result<Option<Value>, RedirectError> {
    Ok(evaluate_with_trace(registry, context, rules)?.url)
}

/// Same semantics as [`evaluate`], keeping a per-rule diagnostic trail.
pub fn evaluate_with_trace(
    registry: &ReaderRegistry,
    context: &EvalContext<'_>,
    rules: &[RedirectRule],
) -> Result<RedirectDecision, RedirectError> {
    let mut diagnostic = EvaluationDiagnostic::new();
    let mut url = None;

    for (position, rule) in rules.iter().enumerate() {
        if url.is_some() {
            diagnostic.add_rule_diagnostic(RuleDiagnostic::skipped(position, rule));
            continue;
        }

        let guard = registry.lookup(&rule.reader, context, &rule.key)?;
        if guard.as_ref().is_some_and(is_truthy) {
            url = Some(expand_url(registry, context, &rule.url)?);
            debug!(
                position,
                reader = %rule.reader,
                key = %rule.key,
                "redirect rule matched"
            );
            diagnostic.add_rule_diagnostic(RuleDiagnostic::matched(position, rule));
            diagnostic.set_outcome(EvaluationOutcome::Matched);
        } else {
            diagnostic.add_rule_diagnostic(RuleDiagnostic::not_matched(position, rule));
        }
    }

    Ok(RedirectDecision { url, diagnostic })
}
