//! The paragraph aligner (A): classic LCS over the similarity oracle,
//! producing an ordered trace of Matched/Inserted/Deleted entries.

use crate::model::Paragraph;
use crate::similarity::{self, similar};

/// One entry in an alignment trace, in document order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignEntry {
    /// Indices into the original and modified paragraph sequences, plus the
    /// similarity score that made them match.
    Matched { original_index: usize, modified_index: usize, score: f64 },
    Inserted { modified_index: usize },
    Deleted { original_index: usize },
}

/// Align `original` against `modified` by longest common subsequence under
/// the similarity oracle. `O(m*n)` time and space; no heuristic trimming.
pub fn align(original: &[&Paragraph], modified: &[&Paragraph], ignore_case: bool) -> Vec<AlignEntry> {
    let m = original.len();
    let n = modified.len();

    // similar_table[i][j] memoizes similar(original[i], modified[j]) so the
    // backtrack doesn't recompute it.
    let mut similar_table = vec![vec![false; n]; m];
    for i in 0..m {
        for j in 0..n {
            similar_table[i][j] = similar(original[i], modified[j], ignore_case);
        }
    }

    let mut l = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            l[i][j] = if similar_table[i - 1][j - 1] {
                l[i - 1][j - 1] + 1
            } else {
                l[i - 1][j].max(l[i][j - 1])
            };
        }
    }

    let mut trace = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && similar_table[i - 1][j - 1] {
            let score = similarity::similarity_score(
                &crate::text::normalized_text(original[i - 1]),
                &crate::text::normalized_text(modified[j - 1]),
                ignore_case,
            );
            trace.push(AlignEntry::Matched { original_index: i - 1, modified_index: j - 1, score });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || l[i][j - 1] >= l[i - 1][j]) {
            // `>=` is deliberate: on ties, prefer inserts before deletes
            // when the trace is read top-to-bottom.
            trace.push(AlignEntry::Inserted { modified_index: j - 1 });
            j -= 1;
        } else {
            trace.push(AlignEntry::Deleted { original_index: i - 1 });
            i -= 1;
        }
    }

    trace.reverse();
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Run;

    fn para(text: &str) -> Paragraph {
        let mut p = Paragraph::new();
        p.runs.push(Run::plain(text));
        p
    }

    #[test]
    fn insertion_in_the_middle() {
        let a = para("Alpha paragraph one");
        let b = para("Beta paragraph two completely distinct");
        let c = para("Charlie paragraph three");
        let original = vec![&a, &c];
        let modified = vec![&a, &b, &c];

        let trace = align(&original, &modified, false);
        assert_eq!(trace.len(), 3);
        let inserted = trace.iter().filter(|e| matches!(e, AlignEntry::Inserted { .. })).count();
        assert_eq!(inserted, 1);
        assert!(matches!(trace[0], AlignEntry::Matched { original_index: 0, modified_index: 0, .. }));
        assert!(matches!(trace[1], AlignEntry::Inserted { modified_index: 1 }));
        assert!(matches!(trace[2], AlignEntry::Matched { original_index: 1, modified_index: 2, .. }));
    }

    #[test]
    fn deletion_in_the_middle() {
        let a = para("Alpha paragraph one");
        let b = para("Beta paragraph two completely distinct");
        let c = para("Charlie paragraph three");
        let original = vec![&a, &b, &c];
        let modified = vec![&a, &c];

        let trace = align(&original, &modified, false);
        assert_eq!(trace.len(), 3);
        let deleted = trace.iter().filter(|e| matches!(e, AlignEntry::Deleted { .. })).count();
        assert_eq!(deleted, 1);
    }

    #[test]
    fn identical_sequences_are_all_matched() {
        let a = para("same text here");
        let b = para("other text there");
        let original = vec![&a, &b];
        let modified = vec![&a, &b];

        let trace = align(&original, &modified, false);
        assert_eq!(trace.len(), 2);
        assert!(trace.iter().all(|e| matches!(e, AlignEntry::Matched { .. })));
    }

    #[test]
    fn empty_original_is_all_inserts() {
        let a = para("brand new paragraph");
        let modified = vec![&a];
        let trace = align(&[], &modified, false);
        assert_eq!(trace, vec![AlignEntry::Inserted { modified_index: 0 }]);
    }
}
