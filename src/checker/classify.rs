//! Assignment of the {spelling, grammar, style} taxonomy to findings.

use crate::{Category, Finding, SourceHint};

/// Markers in a provider rule-category id that indicate a spelling issue.
const SPELLING_MARKERS: &[&str] = &["TYPOS", "ORTHOGRAPHY"];

/// Markers in a provider rule-category id that indicate a grammar issue.
const GRAMMAR_MARKERS: &[&str] = &["GRAMMAR", "AGREEMENT", "ACCORD"];

/// Classify a finding. Total over all findings; first signal wins:
/// source self-classification, then provider rule-category markers, then
/// the style default.
pub fn classify(finding: &Finding) -> Category {
    match finding.hint {
        Some(SourceHint::Grammar) => return Category::Grammar,
        Some(SourceHint::Spelling) => return Category::Spelling,
        None => {}
    }

    if let Some(category_id) = &finding.rule_category {
        if SPELLING_MARKERS.iter().any(|m| category_id.contains(m)) {
            return Category::Spelling;
        }
        if GRAMMAR_MARKERS.iter().any(|m| category_id.contains(m)) {
            return Category::Grammar;
        }
    }

    Category::Style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleInfo;

    fn finding(hint: Option<SourceHint>, category_id: Option<&str>) -> Finding {
        Finding {
            offset: 0,
            length: 1,
            message: "m".to_string(),
            suggestions: Vec::new(),
            rule: RuleInfo::generic(),
            category: Category::Style,
            hint,
            rule_category: category_id.map(str::to_string),
        }
    }

    #[test]
    fn test_hint_wins_over_category_metadata() {
        assert_eq!(
            classify(&finding(Some(SourceHint::Grammar), Some("TYPOS"))),
            Category::Grammar
        );
        assert_eq!(
            classify(&finding(Some(SourceHint::Spelling), Some("GRAMMAR"))),
            Category::Spelling
        );
    }

    #[test]
    fn test_category_id_markers() {
        assert_eq!(classify(&finding(None, Some("TYPOS"))), Category::Spelling);
        assert_eq!(
            classify(&finding(None, Some("ORTHOGRAPHY"))),
            Category::Spelling
        );
        assert_eq!(classify(&finding(None, Some("GRAMMAR"))), Category::Grammar);
        assert_eq!(
            classify(&finding(None, Some("AGREEMENT_RULES"))),
            Category::Grammar
        );
        assert_eq!(
            classify(&finding(None, Some("ACCORD_SUJET_VERBE"))),
            Category::Grammar
        );
    }

    #[test]
    fn test_spelling_marker_beats_grammar_marker() {
        // Decision order checks spelling markers first.
        assert_eq!(
            classify(&finding(None, Some("TYPOS_AGREEMENT"))),
            Category::Spelling
        );
    }

    #[test]
    fn test_default_is_style() {
        assert_eq!(classify(&finding(None, Some("CASING"))), Category::Style);
        assert_eq!(classify(&finding(None, Some(""))), Category::Style);
        assert_eq!(classify(&finding(None, None)), Category::Style);
    }
}
