use anyhow::{Context, Result};
use reroute_core::model::{CheckScenario, RedirectConfig};
use std::path::Path;

/// Parse a redirect scenario from a YAML file.
pub fn parse_scenario(path: &Path) -> Result<CheckScenario> {
    let content = read_yaml_source(path, "scenario")?;

    // serde_path_to_error reports the failing field path
    let deserializer = serde_yaml::Deserializer::from_str(&content);
    let scenario: CheckScenario =
        serde_path_to_error::deserialize(deserializer).with_context(|| {
            format!(
                "Failed to parse YAML from: {}\n\
                 This usually means there's a syntax error or missing required field.",
                path.display()
            )
        })?;

    scenario.validate().with_context(|| {
        format!(
            "Validation failed for scenario: {}\n\
             The YAML was parsed successfully but contains invalid data.",
            path.display()
        )
    })?;

    Ok(scenario)
}

/// Parse a redirect rules config from a YAML file.
pub fn parse_config(path: &Path) -> Result<RedirectConfig> {
    let content = read_yaml_source(path, "config")?;

    let deserializer = serde_yaml::Deserializer::from_str(&content);
    let config: RedirectConfig =
        serde_path_to_error::deserialize(deserializer).with_context(|| {
            format!(
                "Failed to parse YAML from: {}\n\
                 This usually means there's a syntax error or missing required field.",
                path.display()
            )
        })?;

    config.validate().with_context(|| {
        format!(
            "Validation failed for config: {}\n\
             The YAML was parsed successfully but contains invalid data.",
            path.display()
        )
    })?;

    Ok(config)
}

fn read_yaml_source(path: &Path, kind: &str) -> Result<String> {
    // Check existence first for a clearer message
    if !path.exists() {
        anyhow::bail!(
            "{} file not found: {}\nPlease check the file path and try again.",
            capitalize(kind),
            path.display()
        );
    }

    std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read {} file: {}\nPlease check file permissions.",
            kind,
            path.display()
        )
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
