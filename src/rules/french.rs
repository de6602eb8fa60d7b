//! Pattern definitions and validators for the built-in French rules.
//!
//! Validators receive the capture groups of one match plus a [`MatchView`]
//! and return candidates positioned relative to the match start.

use super::{Candidate, MatchView};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

// Lowercase French letters; `(?i)` in the patterns folds in the capitals.
const WORD: &str = "[a-zéèêëàâäôöùûüÿçœæ]+";

lazy_static! {
    pub static ref RE_PLURAL_DETERMINER: Regex = Regex::new(&format!(
        r"(?i)\b(les|des|ces|mes|tes|ses|nos|vos|leurs)\s+({WORD})\b"
    ))
    .unwrap();
    pub static ref RE_ADJECTIVE_AGREEMENT: Regex = Regex::new(&format!(
        r"(?i)\b(plus|très|assez|trop)\s+(grand|petit|beau|nouveau|vieux)\s+({WORD})\b"
    ))
    .unwrap();
    pub static ref RE_SUPERLATIVE: Regex =
        Regex::new(&format!(r"(?i)\bl'un des plus ({WORD}) ({WORD})\b")).unwrap();
    pub static ref RE_A_ACCENT: Regex =
        Regex::new(&format!(r"(?i)\b({WORD})\s+(a)\s+({WORD})\b")).unwrap();
    pub static ref RE_OU_ACCENT: Regex =
        Regex::new(&format!(r"(?i)\b({WORD})\s+(ou)\s+({WORD})\b")).unwrap();
}

/// Verbs that govern the preposition "à" rather than the verb form "a".
const VERBS_REQUIRING_A: &[&str] = &[
    "aller",
    "venir",
    "penser",
    "réfléchir",
    "songer",
    "participer",
    "assister",
];

/// Nouns of place or time after which "où" is expected rather than "ou".
const WORDS_REQUIRING_OU: &[&str] = &[
    "endroit", "lieu", "place", "moment", "instant", "pays", "ville",
];

fn already_plural(word: &str) -> bool {
    word.to_lowercase().ends_with(['s', 'x', 'z'])
}

pub fn check_plural_determiner(caps: &Captures<'_>, view: &MatchView<'_>) -> Vec<Candidate> {
    let article = &caps[1];
    let noun = &caps[2];
    if already_plural(noun) {
        return Vec::new();
    }
    let Some((offset, length)) = view.group_span(caps, 2) else {
        return Vec::new();
    };
    vec![Candidate {
        offset,
        length,
        message: format!("Le nom « {noun} » devrait être au pluriel après « {article} »."),
        suggestions: vec![format!("{noun}s")],
    }]
}

pub fn check_adjective_agreement(caps: &Captures<'_>, view: &MatchView<'_>) -> Vec<Candidate> {
    let adj = &caps[2];
    let noun = &caps[3];
    // Only flag when the noun is plural and the adjective is not.
    if !noun.to_lowercase().ends_with('s') || already_plural(adj) {
        return Vec::new();
    }
    let Some((offset, length)) = view.group_span(caps, 2) else {
        return Vec::new();
    };
    vec![Candidate {
        offset,
        length,
        message: format!(
            "L'adjectif « {adj} » devrait s'accorder avec le nom « {noun} » au pluriel."
        ),
        suggestions: vec![format!("{adj}s")],
    }]
}

/// After "l'un des plus", adjective and noun must both be plural; one match
/// may therefore yield two simultaneous corrections.
pub fn check_superlative_plural(caps: &Captures<'_>, view: &MatchView<'_>) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let adj = &caps[1];
    if !already_plural(adj) {
        if let Some((offset, length)) = view.group_span(caps, 1) {
            candidates.push(Candidate {
                offset,
                length,
                message: format!(
                    "L'adjectif « {adj} » doit être au pluriel après « des plus »."
                ),
                suggestions: vec![format!("{adj}s")],
            });
        }
    }

    let noun = &caps[2];
    if !already_plural(noun) {
        if let Some((offset, length)) = view.group_span(caps, 2) {
            candidates.push(Candidate {
                offset,
                length,
                message: format!("Le nom « {noun} » doit être au pluriel après « des plus »."),
                suggestions: vec![format!("{noun}s")],
            });
        }
    }

    candidates
}

pub fn check_a_accent(caps: &Captures<'_>, view: &MatchView<'_>) -> Vec<Candidate> {
    let word = &caps[1];
    if !VERBS_REQUIRING_A.contains(&word.to_lowercase().as_str()) {
        return Vec::new();
    }
    let Some((offset, length)) = view.group_span(caps, 2) else {
        return Vec::new();
    };
    vec![Candidate {
        offset,
        length,
        message: format!(
            "Après « {word} », utilisez « à » (préposition) et non « a » (verbe avoir)."
        ),
        suggestions: vec!["à".to_string()],
    }]
}

pub fn check_ou_accent(caps: &Captures<'_>, view: &MatchView<'_>) -> Vec<Candidate> {
    let word = &caps[1];
    if !WORDS_REQUIRING_OU.contains(&word.to_lowercase().as_str()) {
        return Vec::new();
    }
    let Some((offset, length)) = view.group_span(caps, 2) else {
        return Vec::new();
    };
    vec![Candidate {
        offset,
        length,
        message: format!(
            "Après « {word} », utilisez « où » (adverbe de lieu) et non « ou » (conjonction)."
        ),
        suggestions: vec!["où".to_string()],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_plural() {
        assert!(already_plural("chats"));
        assert!(already_plural("choix"));
        assert!(already_plural("nez"));
        assert!(already_plural("VIEUX"));
        assert!(!already_plural("livre"));
    }

    #[test]
    fn test_patterns_compile_and_match() {
        assert!(RE_PLURAL_DETERMINER.is_match("les livre"));
        assert!(RE_SUPERLATIVE.is_match("l'un des plus grand mystère"));
        assert!(RE_A_ACCENT.is_match("penser a demain"));
        assert!(RE_OU_ACCENT.is_match("endroit ou on"));
    }

    #[test]
    fn test_correct_plural_adjective_is_not_flagged() {
        // "vieux" is invariable in the plural; suggesting "vieuxs" would be
        // worse than silence.
        let caps = RE_ADJECTIVE_AGREEMENT.captures("très vieux jardins").unwrap();
        let whole = caps.get(0).unwrap();
        let view = MatchView {
            matched: whole.as_str(),
            start_byte: whole.start(),
        };
        assert!(check_adjective_agreement(&caps, &view).is_empty());
    }
}
