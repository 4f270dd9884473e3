//! Evaluation diagnostics: a per-rule trail of why a redirect decision
//! came out the way it did.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::RedirectRule;

/// Overall outcome of evaluating a rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOutcome {
    /// A rule matched and produced a redirect target.
    Matched,
    /// No rule matched; the caller keeps its default redirect.
    NoMatch,
}

/// How a single rule position fared during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// Guard value was truthy; this rule produced the URL.
    Matched,
    /// Guard value was falsy or absent.
    NotMatched,
    /// An earlier rule had already matched; the guard was never read.
    Skipped,
}

/// Diagnostic entry for one rule position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    pub position: usize,
    pub reader: String,
    pub key: String,
    pub status: RuleStatus,
    pub reason: String,
}

impl RuleDiagnostic {
    pub fn matched(position: usize, rule: &RedirectRule) -> Self {
        Self {
            position,
            reader: rule.reader.clone(),
            key: rule.key.clone(),
            status: RuleStatus::Matched,
            reason: "guard value was truthy (rule matched)".to_string(),
        }
    }

    pub fn not_matched(position: usize, rule: &RedirectRule) -> Self {
        Self {
            position,
            reader: rule.reader.clone(),
            key: rule.key.clone(),
            status: RuleStatus::NotMatched,
            reason: "guard value was falsy (rule did not match)".to_string(),
        }
    }

    pub fn skipped(position: usize, rule: &RedirectRule) -> Self {
        Self {
            position,
            reader: rule.reader.clone(),
            key: rule.key.clone(),
            status: RuleStatus::Skipped,
            reason: "earlier rule already matched (rule not evaluated)".to_string(),
        }
    }
}

/// Ordered trail covering every rule position that evaluation visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDiagnostic {
    pub outcome: EvaluationOutcome,
    pub rule_diagnostics: Vec<RuleDiagnostic>,
}

impl EvaluationDiagnostic {
    pub fn new() -> Self {
        Self {
            outcome: EvaluationOutcome::NoMatch,
            rule_diagnostics: Vec::new(),
        }
    }

    pub fn add_rule_diagnostic(&mut self, diagnostic: RuleDiagnostic) {
        self.rule_diagnostics.push(diagnostic);
    }

    pub fn set_outcome(&mut self, outcome: EvaluationOutcome) {
        self.outcome = outcome;
    }

    /// Position of the matching rule, if evaluation matched.
    pub fn matched_position(&self) -> Option<usize> {
        self.rule_diagnostics
            .iter()
            .find(|diagnostic| diagnostic.status == RuleStatus::Matched)
            .map(|diagnostic| diagnostic.position)
    }
}

impl Default for EvaluationDiagnostic {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a traced evaluation: the decision plus its diagnostic trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectDecision {
    /// Expanded redirect target; `None` keeps the default redirect.
    pub url: Option<Value>,
    pub diagnostic: EvaluationDiagnostic,
}
