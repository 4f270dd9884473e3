use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::redirect::expander::{reader_reference, QUERY_KEY};
use crate::redirect::registry::ReaderRegistry;

/// One declarative redirect rule: a guard `(reader, key)` plus the URL
/// template expanded when the guard value is truthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectRule {
    /// Name of the registered reader consulted for the guard value.
    pub reader: String,

    /// Key the reader is asked for.
    pub key: String,

    /// URL template expanded when this rule fires.
    pub url: Value,
}

impl RedirectRule {
    pub fn new(reader: impl Into<String>, key: impl Into<String>, url: Value) -> Self {
        Self {
            reader: reader.into(),
            key: key.into(),
            url,
        }
    }

    /// Every reader name this rule can consult: the guard reader plus
    /// all `[reader, key]` references inside the URL template.
    pub fn referenced_readers(&self) -> Vec<&str> {
        let mut readers = vec![self.reader.as_str()];
        collect_template_readers(&self.url, &mut readers);
        readers
    }
}

fn collect_template_readers<'a>(template: &'a Value, readers: &mut Vec<&'a str>) {
    if let Some((reader, _key)) = reader_reference(template) {
        readers.push(reader);
        return;
    }

    if let Some(entries) = template.as_object() {
        for (name, value) in entries {
            if name == QUERY_KEY {
                collect_template_readers(value, readers);
            } else if let Some((reader, _key)) = reader_reference(value) {
                readers.push(reader);
            }
        }
    }
}

/// An ordered rule list as stored in configuration. Position in `rules`
/// is the evaluation priority: earlier rules win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub rules: Vec<RedirectRule>,
}

impl RedirectConfig {
    /// Validate the config structure. A config file with no rules is an
    /// authoring mistake, even though the evaluator itself accepts an
    /// empty list.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            bail!("RedirectConfig must contain at least one rule");
        }

        for (position, rule) in self.rules.iter().enumerate() {
            if rule.reader.trim().is_empty() {
                bail!("rule {position}: reader name cannot be empty");
            }
            if rule.key.trim().is_empty() {
                bail!("rule {position}: key cannot be empty");
            }
        }

        Ok(())
    }

    /// Check that every reader this config references is registered.
    pub fn validate_readers(&self, registry: &ReaderRegistry) -> Result<()> {
        for (position, rule) in self.rules.iter().enumerate() {
            for reader in rule.referenced_readers() {
                if !registry.contains(reader) {
                    bail!(
                        "rule {position}: unknown reader '{reader}' (registered: {})",
                        registry.reader_names().join(", ")
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> RedirectConfig {
        RedirectConfig {
            name: Some("post-save".to_string()),
            description: None,
            rules: vec![
                RedirectRule::new(
                    "request.data",
                    "save_and_edit",
                    json!({"action": "edit", "0": ["entity.field", "id"]}),
                ),
                RedirectRule::new(
                    "entity.field",
                    "published",
                    json!({
                        "action": "view",
                        "0": ["entity.field", "slug"],
                        "?": {"ref": ["request.query", "ref"]},
                    }),
                ),
            ],
        }
    }

    #[test]
    fn referenced_readers_cover_guard_and_template() {
        let config = sample_config();
        let readers = config.rules[1].referenced_readers();

        assert_eq!(readers, vec!["entity.field", "entity.field", "request.query"]);
    }

    #[test]
    fn validate_rejects_empty_rule_list() {
        let config = RedirectConfig {
            name: None,
            description: None,
            rules: vec![],
        };

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("at least one rule"));
    }

    #[test]
    fn validate_rejects_blank_reader_name() {
        let mut config = sample_config();
        config.rules[0].reader = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("rule 0"));
        assert!(err.contains("reader name"));
    }

    #[test]
    fn validate_readers_accepts_builtin_references() {
        let config = sample_config();
        config.validate_readers(&ReaderRegistry::new()).unwrap();
    }

    #[test]
    fn validate_readers_names_the_unknown_reader() {
        let mut config = sample_config();
        config.rules[0].reader = "session.read".to_string();

        let err = config
            .validate_readers(&ReaderRegistry::new())
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown reader 'session.read'"));
        assert!(err.contains("entity.field"));
    }

    #[test]
    fn rule_round_trips_through_json() {
        let rule = sample_config().rules[1].clone();
        let text = serde_json::to_string(&rule).unwrap();
        let back: RedirectRule = serde_json::from_str(&text).unwrap();

        assert_eq!(back, rule);
    }
}
