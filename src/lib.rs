pub mod cache;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod provider;
pub mod rules;
pub mod server;
pub mod splice;

pub use cache::CorrectionCache;
pub use checker::Corrector;
pub use config::Config;
pub use error::CorrectError;

use serde::{Deserialize, Serialize};

/// Error taxonomy assigned to every finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spelling,
    Grammar,
    Style,
}

/// Self-classification reported by the originating source, if any.
/// Consulted during classification only; never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceHint {
    Grammar,
    Spelling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub description: String,
}

impl RuleInfo {
    /// Identity used when the source supplies no rule metadata.
    pub fn generic() -> Self {
        Self {
            id: "grammar".to_string(),
            description: "Règle grammaticale".to_string(),
        }
    }
}

impl Default for RuleInfo {
    fn default() -> Self {
        Self::generic()
    }
}

/// A single detected issue over the original text.
///
/// `offset` and `length` count characters (not bytes) into the text the
/// finding was produced for. Findings are immutable: classification and
/// merging build new values rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    #[serde(rename = "replacements")]
    pub suggestions: Vec<String>,
    pub rule: RuleInfo,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(skip)]
    pub hint: Option<SourceHint>,
    /// Provider rule-category identifier (e.g. "TYPOS"), kept as a
    /// classification fallback. Not part of the wire shape.
    #[serde(skip)]
    pub rule_category: Option<String>,
}

impl Finding {
    /// Half-open span `[offset, offset + length)` in characters.
    pub fn span(&self) -> (usize, usize) {
        (self.offset, self.offset + self.length)
    }

    /// Copy of this finding with the given category.
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }
}

/// Output of one pipeline run over one input text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub text: String,
    pub corrections: Vec<Finding>,
    pub score: u8,
}
