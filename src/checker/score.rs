//! Quality and readability scoring.

/// Quality score in [0, 100] derived from finding density.
///
/// `ratio = findings / (chars / 100)`, `score = 100 - ratio * 5`, rounded
/// and clamped. Empty text scores 100: no text, no errors.
pub fn quality_score(finding_count: usize, text_chars: usize) -> u8 {
    if text_chars == 0 {
        return 100;
    }
    let error_ratio = finding_count as f64 / (text_chars as f64 / 100.0);
    (100.0 - error_ratio * 5.0).round().clamp(0.0, 100.0) as u8
}

/// Flesch-style readability estimate in [0, 100], stored with history
/// entries. Syllables are approximated by counting vowel characters per
/// word, which is rough but stable.
pub fn readability(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();

    if sentences == 0 || words == 0 {
        return 0.0;
    }

    let syllables: usize = text
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|c| "aeiouy".contains(*c)).count())
        .sum();

    let score = 206.835
        - 1.015 * (words as f64 / sentences as f64)
        - 84.6 * (syllables as f64 / words as f64);
    score.clamp(0.0, 100.0)
}
