use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rule::RedirectRule;
use crate::redirect::diagnostics::EvaluationDiagnostic;

// ============================================================================
// Scenario definition
// ============================================================================

/// Declarative redirect scenario: a context fixture, a rule list, and
/// the expected decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckScenario {
    /// Human-readable scenario name
    pub name: String,

    /// Narrative description of what is being checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Context data materialized into stub request/entity/subject
    #[serde(default)]
    pub context: ScenarioContext,

    /// Rules under test, in evaluation order (may be empty to exercise
    /// the no-rules path)
    #[serde(default)]
    pub rules: Vec<RedirectRule>,

    /// Expected decision
    pub expect: Expectation,
}

impl CheckScenario {
    /// Validate the scenario structure
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("CheckScenario name cannot be empty");
        }

        for (position, rule) in self.rules.iter().enumerate() {
            if rule.reader.trim().is_empty() {
                bail!("rule {position}: reader name cannot be empty");
            }
            if rule.key.trim().is_empty() {
                bail!("rule {position}: key cannot be empty");
            }
        }

        self.expect.validate()
    }
}

/// Context fixture for one scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioContext {
    #[serde(default)]
    pub request: RequestFixture,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub entity: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub subject: Map<String, Value>,
}

/// Request data for one scenario, keyed the way the built-in readers
/// consult it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestFixture {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub query: Map<String, Value>,
}

/// Expected decision; exactly one field must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expectation {
    /// Expected redirect URL descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,

    /// Expect evaluation to keep the default redirect
    #[serde(default)]
    pub no_match: bool,

    /// Expected error message substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Expectation {
    pub fn validate(&self) -> Result<()> {
        let set = [self.url.is_some(), self.no_match, self.error.is_some()]
            .into_iter()
            .filter(|flag| *flag)
            .count();

        if set != 1 {
            bail!("expect must set exactly one of: url, no_match, error");
        }

        Ok(())
    }
}

// ============================================================================
// Scenario results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ParseError,
    InvalidReader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error_type: ErrorType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// One difference between the expected and actual decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlMismatch {
    /// Dotted path into the URL descriptor; empty for the whole value.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub status: ScenarioStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mismatches: Vec<UrlMismatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,

    /// Per-rule evaluation trail, when evaluation ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<EvaluationDiagnostic>,

    /// Actual decision captured on failure for snapshot output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_snapshot: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub results: Vec<ScenarioResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_scenario() -> CheckScenario {
        CheckScenario {
            name: "publish redirect".to_string(),
            description: None,
            context: ScenarioContext::default(),
            rules: vec![RedirectRule::new(
                "entity.field",
                "published",
                json!({"action": "view"}),
            )],
            expect: Expectation {
                url: Some(json!({"action": "view"})),
                no_match: false,
                error: None,
            },
        }
    }

    #[test]
    fn valid_scenario_passes_validation() {
        sample_scenario().validate().unwrap();
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut scenario = sample_scenario();
        scenario.name = " ".to_string();

        let err = scenario.validate().unwrap_err().to_string();
        assert!(err.contains("name cannot be empty"));
    }

    #[test]
    fn expectation_requires_exactly_one_outcome() {
        let none = Expectation::default();
        assert!(none.validate().is_err());

        let both = Expectation {
            url: Some(json!({})),
            no_match: true,
            error: None,
        };
        assert!(both.validate().is_err());

        let just_no_match = Expectation {
            url: None,
            no_match: true,
            error: None,
        };
        just_no_match.validate().unwrap();
    }

    #[test]
    fn empty_rule_list_is_allowed_in_scenarios() {
        let mut scenario = sample_scenario();
        scenario.rules.clear();
        scenario.expect = Expectation {
            url: None,
            no_match: true,
            error: None,
        };

        scenario.validate().unwrap();
    }
}
