//! Deterministic substitution of finding spans into corrected text.

use crate::Finding;

/// Byte offset of the given character offset, or None when out of range.
fn char_to_byte(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    let mut seen = 0usize;
    for (byte_idx, _) in text.char_indices() {
        if seen == char_offset {
            return Some(byte_idx);
        }
        seen += 1;
    }
    (seen == char_offset).then_some(text.len())
}

fn splice(text: &str, offset: usize, length: usize, replacement: &str) -> Option<String> {
    if length == 0 {
        return None;
    }
    let start = char_to_byte(text, offset)?;
    let end = char_to_byte(text, offset + length)?;
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    Some(out)
}

/// Apply every finding's first suggestion to `text`.
///
/// Findings must be non-overlapping (the merger's output invariant).
/// Substitutions run in descending-offset order so earlier offsets stay
/// valid as the string is rebuilt. Findings without suggestions or with
/// spans outside the text are skipped.
pub fn apply_all(text: &str, findings: &[Finding]) -> String {
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut corrected = text.to_string();
    for finding in ordered {
        let Some(replacement) = finding.suggestions.first() else {
            continue;
        };
        if let Some(next) = splice(&corrected, finding.offset, finding.length, replacement) {
            corrected = next;
        }
    }
    corrected
}

/// Apply one finding with an explicitly chosen replacement.
///
/// Offsets of any other pending findings for the same text are stale after
/// this; the caller re-runs the detection pipeline on the result rather
/// than remapping them.
pub fn apply_one(text: &str, finding: &Finding, replacement: &str) -> String {
    splice(text, finding.offset, finding.length, replacement)
        .unwrap_or_else(|| text.to_string())
}
