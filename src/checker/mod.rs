pub mod classify;
pub mod merge;
pub mod score;

use crate::cache::CorrectionCache;
use crate::provider::ProviderClient;
use crate::rules;
use crate::{Config, CorrectError, CorrectionResult, Finding};
use tracing::debug;

/// The correction pipeline: remote provider + local rules, merged,
/// classified, scored, memoized per exact input text.
pub struct Corrector {
    provider: ProviderClient,
    cache: CorrectionCache,
}

impl Corrector {
    pub fn new(config: &Config) -> Self {
        Self {
            provider: ProviderClient::new(config),
            cache: CorrectionCache::new(config.cache_capacity),
        }
    }

    /// Run the full pipeline over `text`.
    ///
    /// The provider call and the local rule scan have no data dependency and
    /// run concurrently. A provider failure fails the whole request; there is
    /// no degraded local-only result.
    pub async fn correct(&self, text: &str) -> Result<CorrectionResult, CorrectError> {
        if text.trim().is_empty() {
            return Err(CorrectError::InvalidInput);
        }

        if let Some(hit) = self.cache.get(text) {
            debug!(chars = text.chars().count(), "correction cache hit");
            return Ok(hit);
        }

        let (remote, local) = tokio::join!(self.provider.check(text), async {
            rules::evaluate_all(text)
        });
        let remote = remote?;

        let result = assemble(text, remote, local);
        self.cache.put(text, result.clone());
        Ok(result)
    }

    /// Provider findings only, classified but not merged with local rules.
    pub async fn check_remote(&self, text: &str) -> Result<Vec<Finding>, CorrectError> {
        if text.trim().is_empty() {
            return Err(CorrectError::InvalidInput);
        }
        let findings = self.provider.check(text).await?;
        Ok(findings
            .iter()
            .map(|f| f.with_category(classify::classify(f)))
            .collect())
    }
}

/// Merge, classify and score one set of source findings. Pure; split out of
/// [`Corrector::correct`] so the pipeline is testable without a provider.
fn assemble(text: &str, remote: Vec<Finding>, local: Vec<Finding>) -> CorrectionResult {
    let merged = merge::merge(remote, local);
    let corrections: Vec<Finding> = merged
        .iter()
        .map(|f| f.with_category(classify::classify(f)))
        .collect();
    let score = score::quality_score(corrections.len(), text.chars().count());

    CorrectionResult {
        text: text.to_string(),
        corrections,
        score,
    }
}
