use thiserror::Error;

/// Failures surfaced to the caller of the correction pipeline.
///
/// Individual local-rule faults are not part of this taxonomy: they are
/// isolated per match, logged, and never fail a request.
#[derive(Debug, Error)]
pub enum CorrectError {
    /// Empty or missing input text, rejected before any pipeline work.
    #[error("Le texte est requis")]
    InvalidInput,

    /// The remote grammar provider could not be reached or returned a
    /// non-success status. Fatal to the request; no local-only fallback.
    #[error("Service de correction indisponible: {0}")]
    ProviderUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(CorrectError::InvalidInput.to_string(), "Le texte est requis");
        assert!(CorrectError::ProviderUnavailable("HTTP 503".into())
            .to_string()
            .contains("HTTP 503"));
    }
}
