pub mod french;

use crate::{Category, Finding, RuleInfo, SourceHint};
use regex::{Captures, Regex};
use tracing::warn;

/// One correction proposed by a rule validator.
///
/// `offset` and `length` count characters *relative to the start of the
/// matched substring*; the scan engine translates them to absolute text
/// offsets before emitting a [`Finding`].
#[derive(Debug, Clone)]
pub struct Candidate {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// View over one regex match, used by validators to locate capture groups
/// without resorting to substring search (which misplaces corrections when
/// a token repeats inside the match).
pub struct MatchView<'t> {
    matched: &'t str,
    start_byte: usize,
}

impl<'t> MatchView<'t> {
    /// Character span of capture group `i`, relative to the match start.
    pub fn group_span(&self, caps: &Captures<'_>, i: usize) -> Option<(usize, usize)> {
        let group = caps.get(i)?;
        let rel_bytes = group.start() - self.start_byte;
        let offset = self.matched[..rel_bytes].chars().count();
        let length = group.as_str().chars().count();
        Some((offset, length))
    }
}

/// Registry of local French grammar rules.
///
/// Each variant pairs a compiled pattern with a validator; rules operate
/// independently and may overlap each other in what they match. Within one
/// rule, matches are found left-to-right and never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    PluralAfterDeterminer,
    AdjectiveAgreement,
    SuperlativePlural,
    AversusAccent,
    OuVersusAccent,
}

impl Rule {
    pub fn all() -> &'static [Rule] {
        &[
            Rule::PluralAfterDeterminer,
            Rule::AdjectiveAgreement,
            Rule::SuperlativePlural,
            Rule::AversusAccent,
            Rule::OuVersusAccent,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Rule::PluralAfterDeterminer => "FR_ACCORD_PLURIEL_NOM",
            Rule::AdjectiveAgreement => "FR_ACCORD_ADJECTIF",
            Rule::SuperlativePlural => "FR_DES_PLUS_PLURIEL",
            Rule::AversusAccent => "FR_A_ACCENT",
            Rule::OuVersusAccent => "FR_OU_ACCENT",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::PluralAfterDeterminer => "Accord du nom après un déterminant pluriel",
            Rule::AdjectiveAgreement => "Accord de l'adjectif avec le nom",
            Rule::SuperlativePlural => "Pluriel obligatoire après « l'un des plus »",
            Rule::AversusAccent => "Confusion entre « a » et « à »",
            Rule::OuVersusAccent => "Confusion entre « ou » et « où »",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Rule::PluralAfterDeterminer => &french::RE_PLURAL_DETERMINER,
            Rule::AdjectiveAgreement => &french::RE_ADJECTIVE_AGREEMENT,
            Rule::SuperlativePlural => &french::RE_SUPERLATIVE,
            Rule::AversusAccent => &french::RE_A_ACCENT,
            Rule::OuVersusAccent => &french::RE_OU_ACCENT,
        }
    }

    fn validate(&self, caps: &Captures<'_>, view: &MatchView<'_>) -> Vec<Candidate> {
        match self {
            Rule::PluralAfterDeterminer => french::check_plural_determiner(caps, view),
            Rule::AdjectiveAgreement => french::check_adjective_agreement(caps, view),
            Rule::SuperlativePlural => french::check_superlative_plural(caps, view),
            Rule::AversusAccent => french::check_a_accent(caps, view),
            Rule::OuVersusAccent => french::check_ou_accent(caps, view),
        }
    }

    /// Scan `text` and emit findings with absolute character offsets.
    pub fn evaluate(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for caps in self.pattern().captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let view = MatchView {
                matched: whole.as_str(),
                start_byte: whole.start(),
            };
            let match_start = text[..whole.start()].chars().count();
            let match_chars = whole.as_str().chars().count();

            let candidates = self.validate(&caps, &view);
            findings.extend(self.admit(candidates, match_start, match_chars));
        }

        findings
    }

    /// Translate match-relative candidates into absolute findings.
    ///
    /// Fault isolation: a candidate with an empty span, or one extending
    /// past the matched substring, is dropped without aborting the
    /// remaining candidates, matches or rules.
    fn admit(&self, candidates: Vec<Candidate>, match_start: usize, match_chars: usize) -> Vec<Finding> {
        let mut findings = Vec::new();

        for candidate in candidates {
            if candidate.length == 0 || candidate.offset + candidate.length > match_chars {
                warn!(
                    rule = self.id(),
                    offset = candidate.offset,
                    length = candidate.length,
                    "skipping malformed rule candidate"
                );
                continue;
            }

            findings.push(Finding {
                offset: match_start + candidate.offset,
                length: candidate.length,
                message: candidate.message,
                suggestions: candidate.suggestions,
                rule: RuleInfo {
                    id: self.id().to_string(),
                    description: self.description().to_string(),
                },
                category: Category::Grammar,
                hint: Some(SourceHint::Grammar),
                rule_category: None,
            });
        }

        findings
    }
}

/// Run every registered rule over `text`.
pub fn evaluate_all(text: &str) -> Vec<Finding> {
    Rule::all()
        .iter()
        .flat_map(|rule| rule.evaluate(text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_after_determiner() {
        let findings = Rule::PluralAfterDeterminer.evaluate("Je range les livre du salon.");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].offset, 13);
        assert_eq!(findings[0].length, 5);
        assert_eq!(findings[0].suggestions, vec!["livres".to_string()]);
        assert_eq!(findings[0].hint, Some(SourceHint::Grammar));
    }

    #[test]
    fn test_plural_determiner_ignores_plural_nouns() {
        assert!(Rule::PluralAfterDeterminer
            .evaluate("les chats, des choix, ces nez")
            .is_empty());
    }

    #[test]
    fn test_superlative_emits_two_findings() {
        let text = "L'un des plus grand mystère de la vie.";
        let findings = Rule::SuperlativePlural.evaluate(text);
        assert_eq!(findings.len(), 2);

        // "grand" starts after "L'un des plus " (14 chars).
        assert_eq!(findings[0].offset, 14);
        assert_eq!(findings[0].length, 5);
        assert_eq!(findings[0].suggestions, vec!["grands".to_string()]);

        // "mystère" follows, accented character counted once.
        assert_eq!(findings[1].offset, 20);
        assert_eq!(findings[1].length, 7);
        assert_eq!(findings[1].suggestions, vec!["mystères".to_string()]);
    }

    #[test]
    fn test_ou_accent_after_place_noun() {
        let text = "C'est un endroit ou on peut se détendre.";
        let findings = Rule::OuVersusAccent.evaluate(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].offset, 17);
        assert_eq!(findings[0].length, 2);
        assert_eq!(findings[0].suggestions, vec!["où".to_string()]);
    }

    #[test]
    fn test_a_accent_after_governing_verb() {
        let findings = Rule::AversusAccent.evaluate("Il faut penser a demain.");
        assert_eq!(findings.len(), 1);
        // The flagged "a" is the standalone word, not the "a" inside "demain".
        assert_eq!(findings[0].offset, 15);
        assert_eq!(findings[0].length, 1);
        assert_eq!(findings[0].suggestions, vec!["à".to_string()]);
    }

    #[test]
    fn test_repeated_token_inside_match_is_not_confused() {
        // "aller a" contains two 'a' characters before the standalone one;
        // capture-group tracking must flag the right occurrence.
        let findings = Rule::AversusAccent.evaluate("Nous allons aller a Paris.");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].offset, 18);
    }

    #[test]
    fn test_adjective_agreement() {
        let findings = Rule::AdjectiveAgreement.evaluate("Ce sont de très grand jardins.");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].suggestions, vec!["grands".to_string()]);
        assert_eq!(findings[0].offset, 16);
        assert_eq!(findings[0].length, 5);
    }

    #[test]
    fn test_evaluate_all_combines_rules() {
        let text = "C'est un endroit ou les livre sont rares.";
        let findings = evaluate_all(text);
        assert!(findings.len() >= 2);
        assert!(findings.iter().any(|f| f.rule.id == "FR_OU_ACCENT"));
        assert!(findings
            .iter()
            .any(|f| f.rule.id == "FR_ACCORD_PLURIEL_NOM"));
    }

    #[test]
    fn test_malformed_candidate_is_dropped_others_kept() {
        let candidate = |offset: usize, length: usize| Candidate {
            offset,
            length,
            message: "accord".to_string(),
            suggestions: vec!["livres".to_string()],
        };

        // Match of 9 chars starting at absolute offset 10: the first
        // candidate runs past the match end, the last one is empty.
        let findings = Rule::PluralAfterDeterminer.admit(
            vec![candidate(7, 9), candidate(4, 5), candidate(0, 0)],
            10,
            9,
        );

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].offset, 14);
        assert_eq!(findings[0].length, 5);
        assert_eq!(findings[0].rule.id, "FR_ACCORD_PLURIEL_NOM");
    }

    #[test]
    fn test_matches_within_one_rule_do_not_overlap() {
        let findings = Rule::PluralAfterDeterminer.evaluate("les table et les chaise");
        assert_eq!(findings.len(), 2);
        let (_, end_first) = findings[0].span();
        assert!(end_first <= findings[1].offset);
    }
}
