use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Grammar provider endpoint (LanguageTool v2 check protocol).
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Target language tag sent to the provider.
    #[serde(default = "default_language")]
    pub language: String,

    /// Provider strictness level.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub enabled_only: bool,

    /// Provider rule ids excluded from checking.
    #[serde(default = "default_disabled_rules")]
    pub disabled_rules: Vec<String>,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    pub history_path: Option<PathBuf>,

    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_provider_url() -> String {
    "https://api.languagetool.org/v2/check".to_string()
}

fn default_language() -> String {
    "fr".to_string()
}

fn default_level() -> String {
    "picky".to_string()
}

fn default_disabled_rules() -> Vec<String> {
    vec!["WHITESPACE_RULE".to_string()]
}

fn default_cache_capacity() -> usize {
    100
}

fn default_history_limit() -> usize {
    10
}

fn default_bind() -> String {
    "127.0.0.1:4310".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            language: default_language(),
            level: default_level(),
            enabled_only: false,
            disabled_rules: default_disabled_rules(),
            cache_capacity: default_cache_capacity(),
            history_limit: default_history_limit(),
            history_path: None,
            bind: default_bind(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(provider_url: Option<String>, language: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".orthoflow.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(url) = provider_url {
            config.provider_url = url;
        }
        if let Some(lang) = language {
            config.language = lang;
        }

        // Set default history location if not specified
        if config.history_path.is_none() {
            config.history_path = Self::default_history_path();
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        if other.provider_url != default_provider_url() {
            self.provider_url = other.provider_url;
        }
        if other.language != default_language() {
            self.language = other.language;
        }
        if other.level != default_level() {
            self.level = other.level;
        }
        self.enabled_only = other.enabled_only;
        if other.disabled_rules != default_disabled_rules() {
            self.disabled_rules = other.disabled_rules;
        }
        if other.cache_capacity != default_cache_capacity() {
            self.cache_capacity = other.cache_capacity;
        }
        if other.history_limit != default_history_limit() {
            self.history_limit = other.history_limit;
        }
        if other.history_path.is_some() {
            self.history_path = other.history_path;
        }
        if other.bind != default_bind() {
            self.bind = other.bind;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orthoflow").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_history_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orthoflow").map(|dirs| dirs.data_dir().join("history.json"))
    }
}
