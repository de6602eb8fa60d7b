//! Adapter for the external grammar-checking provider.
//!
//! Speaks the LanguageTool v2 check protocol: a form-encoded POST returning
//! a JSON `matches` array. Raw matches are normalized into [`Finding`]s;
//! any transport or status failure surfaces as a single
//! [`CorrectError::ProviderUnavailable`] with no retries here.

use crate::{Category, Config, CorrectError, Finding, RuleInfo};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    endpoint: String,
    language: String,
    level: String,
    enabled_only: bool,
    disabled_rules: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    offset: usize,
    length: usize,
    message: String,
    #[serde(default)]
    replacements: Vec<RawReplacement>,
    rule: Option<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawReplacement {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    id: Option<String>,
    description: Option<String>,
    category: Option<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: Option<String>,
}

impl ProviderClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.provider_url.clone(),
            language: config.language.clone(),
            level: config.level.clone(),
            enabled_only: config.enabled_only,
            disabled_rules: config.disabled_rules.join(","),
        }
    }

    /// Check `text` with the remote provider and normalize its matches.
    pub async fn check(&self, text: &str) -> Result<Vec<Finding>, CorrectError> {
        let enabled_only = if self.enabled_only { "true" } else { "false" };
        let mut params: Vec<(&str, &str)> = vec![
            ("text", text),
            ("language", &self.language),
            ("enabledOnly", enabled_only),
            ("level", &self.level),
        ];
        if !self.disabled_rules.is_empty() {
            params.push(("disabledRules", &self.disabled_rules));
        }

        let response = self
            .http
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| CorrectError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CorrectError::ProviderUnavailable(format!("HTTP {status}")));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| CorrectError::ProviderUnavailable(e.to_string()))?;

        Ok(body.matches.into_iter().map(normalize).collect())
    }
}

/// Map one raw provider match into the common finding shape. Provider
/// offsets are taken as character offsets; rule metadata defaults to the
/// generic grammar-rule identity when absent.
fn normalize(raw: RawMatch) -> Finding {
    let rule_category = raw
        .rule
        .as_ref()
        .and_then(|r| r.category.as_ref())
        .and_then(|c| c.id.clone());

    let rule = match raw.rule {
        Some(r) => RuleInfo {
            id: r.id.unwrap_or_else(|| "grammar".to_string()),
            description: r
                .description
                .unwrap_or_else(|| "Règle grammaticale".to_string()),
        },
        None => RuleInfo::generic(),
    };

    Finding {
        offset: raw.offset,
        length: raw.length,
        message: raw.message,
        suggestions: raw
            .replacements
            .into_iter()
            .map(|r| r.value)
            .filter(|v| !v.is_empty())
            .collect(),
        rule,
        category: Category::Style,
        hint: None,
        rule_category,
    }
}
