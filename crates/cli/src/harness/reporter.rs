use anyhow::Result;
use reroute_core::model::{ScenarioResult, ScenarioStatus, SuiteResult};
use reroute_core::redirect::diagnostics::{EvaluationDiagnostic, RuleStatus};
use std::io::Write;
use std::path::Path;

const MISMATCH_PREVIEW_LIMIT: usize = 5;

/// Report a scenario result in human-readable format
pub fn report_result(result: &ScenarioResult, verbose: bool) {
    println!("Scenario: {}", result.scenario_name);

    match result.status {
        ScenarioStatus::Pass => {
            println!("Status: PASS");
            println!();
            println!("✓ Expectation satisfied");
        }
        ScenarioStatus::Fail => {
            println!("Status: FAIL");
            println!();

            if !result.mismatches.is_empty() {
                println!("Mismatches ({}):", result.mismatches.len());
                let limit = if verbose {
                    result.mismatches.len()
                } else {
                    MISMATCH_PREVIEW_LIMIT
                };

                for mismatch in result.mismatches.iter().take(limit) {
                    println!("  ✗ {}", mismatch.path);
                    match &mismatch.expected {
                        Some(expected) => println!("      Expected: {}", expected),
                        None => println!("      Expected: (absent)"),
                    }
                    match &mismatch.actual {
                        Some(actual) => println!("      Actual:   {}", actual),
                        None => println!("      Actual:   (absent)"),
                    }
                }

                if result.mismatches.len() > limit {
                    println!(
                        "  ... and {} more mismatches (use --verbose to see all)",
                        result.mismatches.len() - limit
                    );
                }
            }
        }
        ScenarioStatus::Error => {
            println!("Status: ERROR");
            println!();

            if let Some(error) = &result.error {
                println!("Error: {}", error.message);
                if verbose {
                    if let Some(details) = &error.details {
                        println!();
                        println!("Details:");
                        println!("{}", details);
                    }
                }
            }
        }
    }

    // Per-rule trail helps explain why a decision came out this way
    if verbose {
        if let Some(diagnostic) = &result.diagnostic {
            print_diagnostic(diagnostic);
        }
    }
}

fn print_diagnostic(diagnostic: &EvaluationDiagnostic) {
    println!();
    println!("Rule trail:");
    for entry in &diagnostic.rule_diagnostics {
        let symbol = match entry.status {
            RuleStatus::Matched => "✓",
            RuleStatus::NotMatched => "✗",
            RuleStatus::Skipped => "-",
        };
        println!(
            "  {} rule {}: {} / {} ({})",
            symbol, entry.position, entry.reader, entry.key, entry.reason
        );
    }
}

/// Report suite results in human-readable format
pub fn report_suite_result(suite_result: &SuiteResult, verbose: bool) {
    println!("Scenario Suite Results");
    println!("======================");
    println!();
    println!("Total:  {}", suite_result.total);
    println!(
        "Passed: {} ({:.1}%)",
        suite_result.passed,
        percentage(suite_result.passed, suite_result.total)
    );
    println!(
        "Failed: {} ({:.1}%)",
        suite_result.failed,
        percentage(suite_result.failed, suite_result.total)
    );
    println!(
        "Errors: {} ({:.1}%)",
        suite_result.errors,
        percentage(suite_result.errors, suite_result.total)
    );
    println!();

    // List individual results
    for result in &suite_result.results {
        let status_symbol = match result.status {
            ScenarioStatus::Pass => "✓",
            ScenarioStatus::Fail => "✗",
            ScenarioStatus::Error => "⚠",
        };
        println!("{} {}", status_symbol, result.scenario_name);

        if verbose {
            for mismatch in &result.mismatches {
                println!("    ✗ {}", mismatch.path);
            }
            if let Some(error) = &result.error {
                println!("    ⚠ {}", error.message);
            }
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Save the actual decision next to the scenario file
pub fn save_snapshot(result: &ScenarioResult, scenario_path: &Path) -> Result<()> {
    if let Some(snapshot) = &result.actual_snapshot {
        let snapshots_dir = scenario_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".snapshots");

        std::fs::create_dir_all(&snapshots_dir)?;

        // Create snapshot filename from scenario name
        let snapshot_name = sanitize_snapshot_name(&result.scenario_name);
        let snapshot_file = snapshots_dir.join(format!("{}-actual.yaml", snapshot_name));

        let yaml = serde_yaml::to_string(snapshot)?;
        std::fs::write(&snapshot_file, yaml)?;

        println!();
        println!("Snapshot saved to: {}", snapshot_file.display());
    }

    Ok(())
}

/// Output format for scenario results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Junit,
}

pub fn report_result_json(result: &ScenarioResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{}", json);
    Ok(())
}

pub fn report_suite_result_json(suite_result: &SuiteResult) -> Result<()> {
    let json = serde_json::to_string_pretty(suite_result)?;
    println!("{}", json);
    Ok(())
}

pub fn report_suite_result_junit<W: Write>(
    suite_result: &SuiteResult,
    writer: &mut W,
) -> Result<()> {
    // Durations are not tracked; report a nominal per-scenario time
    let total_time = suite_result.results.len() as f64 * 0.05;

    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        writer,
        "<testsuites tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\">",
        suite_result.total, suite_result.failed, suite_result.errors, total_time
    )?;

    writeln!(
        writer,
        "  <testsuite name=\"redirect-scenarios\" tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\">",
        suite_result.total, suite_result.failed, suite_result.errors, total_time
    )?;

    for result in &suite_result.results {
        let test_time = 0.05;
        match result.status {
            ScenarioStatus::Pass => {
                writeln!(
                    writer,
                    "    <testcase name=\"{}\" time=\"{:.3}\"/>",
                    xml_escape(&result.scenario_name),
                    test_time
                )?;
            }
            ScenarioStatus::Fail => {
                writeln!(
                    writer,
                    "    <testcase name=\"{}\" time=\"{:.3}\">",
                    xml_escape(&result.scenario_name),
                    test_time
                )?;

                let failure_message = format!("{} url mismatches\n", result.mismatches.len());

                writeln!(
                    writer,
                    "      <failure message=\"{}\" type=\"ScenarioFailure\">",
                    xml_escape(&failure_message)
                )?;
                writeln!(writer, "{}", xml_escape(&failure_message))?;
                writeln!(writer, "      </failure>")?;
                writeln!(writer, "    </testcase>")?;
            }
            ScenarioStatus::Error => {
                writeln!(
                    writer,
                    "    <testcase name=\"{}\" time=\"{:.3}\">",
                    xml_escape(&result.scenario_name),
                    test_time
                )?;

                let error_message = result
                    .error
                    .as_ref()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "Unknown error".to_string());

                writeln!(
                    writer,
                    "      <error message=\"{}\" type=\"{}\">",
                    xml_escape(&error_message),
                    result
                        .error
                        .as_ref()
                        .map(|e| format!("{:?}", e.error_type))
                        .unwrap_or_else(|| "UnknownError".to_string())
                )?;
                writeln!(writer, "{}", xml_escape(&error_message))?;
                writeln!(writer, "      </error>")?;
                writeln!(writer, "    </testcase>")?;
            }
        }
    }

    writeln!(writer, "  </testsuite>")?;
    writeln!(writer, "</testsuites>")?;

    Ok(())
}

/// Escape XML special characters
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn sanitize_snapshot_name(name: &str) -> String {
    let mut output = String::new();
    let mut previous_was_dash = false;

    for ch in name.chars() {
        let mapped = if ch.is_ascii_alphanumeric() {
            previous_was_dash = false;
            ch.to_ascii_lowercase()
        } else {
            if !previous_was_dash {
                output.push('-');
                previous_was_dash = true;
            }
            continue;
        };
        output.push(mapped);
    }

    let trimmed = output.trim_matches('-');
    if trimmed.is_empty() {
        "snapshot".to_string()
    } else {
        trimmed.to_string()
    }
}
