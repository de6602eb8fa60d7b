//! Merging and deduplication of findings from independent sources.

use crate::Finding;

/// Returns true when the two half-open spans intersect. Touching endpoints
/// do not count as overlap.
fn overlaps(a: (usize, usize), b: (usize, usize)) -> bool {
    let (start, end) = a;
    let (range_start, range_end) = b;
    // Start inside the accepted span, end inside it, or full containment.
    (start >= range_start && start < range_end)
        || (end > range_start && end <= range_end)
        || (start <= range_start && end >= range_end)
}

/// Combine remote and local findings into a single non-overlapping set.
///
/// Candidates are ordered by offset ascending, ties broken by length
/// descending (the longer finding is presumed more specific). Each candidate
/// is tested against every previously accepted span; overlapping candidates
/// are discarded permanently, their suggestions are never merged. The stable
/// sort keeps remote findings ahead of local ones on exact span ties.
pub fn merge(remote: Vec<Finding>, local: Vec<Finding>) -> Vec<Finding> {
    let mut candidates = remote;
    candidates.extend(local);
    candidates.sort_by(|a, b| {
        a.offset
            .cmp(&b.offset)
            .then(b.length.cmp(&a.length))
    });

    let mut accepted: Vec<Finding> = Vec::new();
    let mut covered: Vec<(usize, usize)> = Vec::new();

    for candidate in candidates {
        let span = candidate.span();
        if covered.iter().any(|&range| overlaps(span, range)) {
            continue;
        }
        covered.push(span);
        accepted.push(candidate);
    }

    accepted
}
