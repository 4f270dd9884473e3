use anyhow::Result;
use reroute_core::model::{
    CheckScenario, ErrorDetail, ErrorType, ScenarioResult, ScenarioStatus, SuiteResult,
    UrlMismatch,
};
use reroute_core::redirect::context::EvalContext;
use reroute_core::{evaluate_with_trace, ReaderRegistry, RedirectError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use test_context::scenario_doubles;
use walkdir::WalkDir;

use super::comparator::compare_url;

/// Execute a single redirect scenario against the built-in readers.
pub fn execute_scenario(scenario: &CheckScenario) -> ScenarioResult {
    execute_scenario_with_registry(scenario, &ReaderRegistry::new())
}

/// Execute a single redirect scenario with a caller-supplied registry.
pub fn execute_scenario_with_registry(
    scenario: &CheckScenario,
    registry: &ReaderRegistry,
) -> ScenarioResult {
    // Build result
    let mut result = ScenarioResult {
        scenario_name: scenario.name.clone(),
        status: ScenarioStatus::Pass,
        mismatches: Vec::new(),
        error: None,
        diagnostic: None,
        actual_snapshot: None,
    };

    // Materialize the context fixture and evaluate
    let (request, entity, subject) = scenario_doubles(&scenario.context);
    let context = EvalContext::new(&request, &entity, &subject);

    let decision = match evaluate_with_trace(registry, &context, &scenario.rules) {
        Ok(decision) => decision,
        Err(error) => {
            apply_error_expectation(scenario, error, &mut result);
            return result;
        }
    };

    result.diagnostic = Some(decision.diagnostic);

    // Compare the decision against the expectation
    if let Some(expected_message) = &scenario.expect.error {
        result.status = ScenarioStatus::Fail;
        result.mismatches.push(UrlMismatch {
            path: "error".to_string(),
            expected: Some(Value::String(expected_message.clone())),
            actual: decision.url.clone(),
        });
        result.actual_snapshot = decision.url;
        return result;
    }

    if scenario.expect.no_match {
        if let Some(url) = decision.url {
            result.status = ScenarioStatus::Fail;
            result.mismatches.push(UrlMismatch {
                path: "url".to_string(),
                expected: None,
                actual: Some(url.clone()),
            });
            result.actual_snapshot = Some(url);
        }
        return result;
    }

    if let Some(expected_url) = &scenario.expect.url {
        match decision.url {
            Some(actual_url) => {
                let mismatches = compare_url(expected_url, &actual_url);
                if !mismatches.is_empty() {
                    result.status = ScenarioStatus::Fail;
                    result.mismatches = mismatches;
                    result.actual_snapshot = Some(actual_url);
                }
            }
            None => {
                result.status = ScenarioStatus::Fail;
                result.mismatches.push(UrlMismatch {
                    path: "url".to_string(),
                    expected: Some(expected_url.clone()),
                    actual: None,
                });
            }
        }
    }

    result
}

fn apply_error_expectation(
    scenario: &CheckScenario,
    error: RedirectError,
    result: &mut ScenarioResult,
) {
    let message = error.to_string();

    match &scenario.expect.error {
        Some(expected) if message.contains(expected.as_str()) => {}
        Some(expected) => {
            result.status = ScenarioStatus::Fail;
            result.mismatches.push(UrlMismatch {
                path: "error".to_string(),
                expected: Some(Value::String(expected.clone())),
                actual: Some(Value::String(message)),
            });
        }
        None => {
            result.status = ScenarioStatus::Error;
            result.error = Some(ErrorDetail {
                error_type: error_type_for(&error),
                message,
                details: Some(format!("{:?}", error)),
            });
        }
    }
}

fn error_type_for(error: &RedirectError) -> ErrorType {
    match error {
        RedirectError::InvalidReader { .. } => ErrorType::InvalidReader,
    }
}

/// Discover scenario files in a directory
pub fn discover_scenarios(suite_path: &Path) -> Result<Vec<PathBuf>> {
    let mut scenarios = Vec::new();

    for entry in WalkDir::new(suite_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if let Some(ext) = path.extension() {
            if ext == "yaml" || ext == "yml" {
                // Skip hidden files and underscore-prefixed files
                if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                    if !file_name.starts_with('.') && !file_name.starts_with('_') {
                        scenarios.push(path.to_path_buf());
                    }
                }
            }
        }
    }

    scenarios.sort();
    Ok(scenarios)
}

/// Execute a scenario suite
pub fn execute_suite(scenarios: &[PathBuf]) -> SuiteResult {
    use super::parser::parse_scenario;

    let mut results = Vec::new();
    let mut passed = 0;
    let mut failed = 0;
    let mut errors = 0;

    for scenario_path in scenarios {
        match parse_scenario(scenario_path) {
            Ok(scenario) => {
                let result = execute_scenario(&scenario);
                match result.status {
                    ScenarioStatus::Pass => passed += 1,
                    ScenarioStatus::Fail => failed += 1,
                    ScenarioStatus::Error => errors += 1,
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                results.push(ScenarioResult {
                    scenario_name: scenario_path.display().to_string(),
                    status: ScenarioStatus::Error,
                    mismatches: Vec::new(),
                    error: Some(ErrorDetail {
                        error_type: ErrorType::ParseError,
                        message: e.to_string(),
                        details: Some(format!("{:?}", e)),
                    }),
                    diagnostic: None,
                    actual_snapshot: None,
                });
            }
        }
    }

    SuiteResult {
        total: scenarios.len(),
        passed,
        failed,
        errors,
        results,
    }
}
