//! Sorted-diff engine: added/removed API counts between two ordered
//! API-key sequences.

use std::cmp::Ordering;

use confluence_core::keys::ApiKey;

/// Result of diffing a previous release's API sequence against the current
/// one. Removed keys are retained because the aggressive-removal calculator
/// needs the set, not just the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedDiff {
    pub new_apis: usize,
    pub removed_apis: usize,
    pub removed_keys: Vec<ApiKey>,
}

/// Linear two-pointer merge over two ascending sequences. Equal heads
/// advance both pointers; a smaller current head is a new API; a smaller
/// previous head is a removed API; exhaustion drains the remainder of the
/// other side. O(n+m), no intermediate sets.
///
/// Inputs must already be sorted ascending; reordering is not performed
/// here.
pub fn diff_sorted(prev: &[ApiKey], curr: &[ApiKey]) -> SortedDiff {
    let mut new_apis = 0;
    let mut removed_keys = Vec::new();
    let mut p = 0;
    let mut c = 0;

    while p < prev.len() && c < curr.len() {
        match prev[p].cmp(&curr[c]) {
            Ordering::Equal => {
                p += 1;
                c += 1;
            }
            Ordering::Greater => {
                new_apis += 1;
                c += 1;
            }
            Ordering::Less => {
                removed_keys.push(prev[p].clone());
                p += 1;
            }
        }
    }
    new_apis += curr.len() - c;
    removed_keys.extend_from_slice(&prev[p..]);

    SortedDiff {
        new_apis,
        removed_apis: removed_keys.len(),
        removed_keys,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<ApiKey> {
        raw.iter().map(|k| k.parse().unwrap()).collect()
    }

    #[test]
    fn one_added_one_removed() {
        let prev = keys(&["I#a", "I#b", "I#c"]);
        let curr = keys(&["I#b", "I#c", "I#d"]);
        let diff = diff_sorted(&prev, &curr);
        assert_eq!(diff.new_apis, 1);
        assert_eq!(diff.removed_apis, 1);
        assert_eq!(diff.removed_keys, keys(&["I#a"]));
    }

    #[test]
    fn identical_sequences_have_no_churn() {
        let seq = keys(&["A#x", "B#y"]);
        let diff = diff_sorted(&seq, &seq);
        assert_eq!(diff.new_apis, 0);
        assert_eq!(diff.removed_apis, 0);
    }

    #[test]
    fn empty_previous_counts_everything_new() {
        let curr = keys(&["A#x", "B#y", "C#z"]);
        let diff = diff_sorted(&[], &curr);
        assert_eq!(diff.new_apis, 3);
        assert_eq!(diff.removed_apis, 0);
    }

    #[test]
    fn empty_current_counts_everything_removed() {
        let prev = keys(&["A#x", "B#y", "C#z"]);
        let diff = diff_sorted(&prev, &[]);
        assert_eq!(diff.new_apis, 0);
        assert_eq!(diff.removed_apis, 3);
        assert_eq!(diff.removed_keys, prev);
    }

    #[test]
    fn disjoint_sequences() {
        let prev = keys(&["A#x", "C#z"]);
        let curr = keys(&["B#y", "D#w"]);
        let diff = diff_sorted(&prev, &curr);
        assert_eq!(diff.new_apis, 2);
        assert_eq!(diff.removed_apis, 2);
    }

    #[test]
    fn interleaved_tails_drain_correctly() {
        let prev = keys(&["A#a", "B#b", "E#e", "F#f"]);
        let curr = keys(&["B#b", "C#c"]);
        let diff = diff_sorted(&prev, &curr);
        assert_eq!(diff.new_apis, 1);
        assert_eq!(diff.removed_keys, keys(&["A#a", "E#e", "F#f"]));
    }
}
