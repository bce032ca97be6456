//! The similarity oracle (S): decides whether two paragraphs are "the same
//! paragraph, possibly edited," via Jaccard similarity over word-token sets.

use std::collections::HashSet;

use crate::model::Paragraph;
use crate::text::{normalized_text, tokenize_words};

/// The threshold at which two paragraphs are considered the same paragraph.
/// Chosen so heavy edits (>=50% word overlap) still match while distinct
/// paragraphs (<50%) are treated as insertion+deletion. This value is a
/// contract: tests assert it exactly.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Decide whether `pa` and `pb` are the same paragraph, possibly edited.
pub fn similar(pa: &Paragraph, pb: &Paragraph, ignore_case: bool) -> bool {
    let a = normalized_text(pa);
    let b = normalized_text(pb);
    let a_empty = a.trim().is_empty();
    let b_empty = b.trim().is_empty();

    if a_empty && b_empty {
        return true;
    }
    if a_empty != b_empty {
        return false;
    }
    jaccard(&a, &b, ignore_case) >= SIMILARITY_THRESHOLD
}

/// Jaccard similarity of `a` and `b`'s word-token sets, in `[0, 1]`.
pub fn similarity_score(a: &str, b: &str, ignore_case: bool) -> f64 {
    jaccard(a, b, ignore_case)
}

fn jaccard(a: &str, b: &str, ignore_case: bool) -> f64 {
    let (owned_a, owned_b);
    let (a, b) = if ignore_case {
        owned_a = a.to_ascii_lowercase();
        owned_b = b.to_ascii_lowercase();
        (owned_a.as_str(), owned_b.as_str())
    } else {
        (a, b)
    };

    let set_a: HashSet<&str> = tokenize_words(a).into_iter().collect();
    let set_b: HashSet<&str> = tokenize_words(b).into_iter().collect();

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Run;

    fn paragraph(text: &str) -> Paragraph {
        let mut p = Paragraph::new();
        p.runs.push(Run::plain(text));
        p
    }

    #[test]
    fn both_empty_are_similar() {
        assert!(similar(&paragraph(""), &paragraph("   "), false));
    }

    #[test]
    fn one_empty_one_not_is_never_similar() {
        assert!(!similar(&paragraph(""), &paragraph("hello"), false));
    }

    #[test]
    fn threshold_is_exactly_one_half_inclusive() {
        // {a,b} vs {a,c}: intersection=1, union=3 -> 1/3, below threshold.
        assert!(jaccard("a b", "a c", false) < SIMILARITY_THRESHOLD);
        // {a,b} vs {a,b,c,d}: intersection=2, union=4 -> exactly 0.5.
        let score = jaccard("a b", "a b c d", false);
        assert!((score - 0.5).abs() < 1e-12);
        assert!(score >= SIMILARITY_THRESHOLD);
    }

    #[test]
    fn ignore_case_affects_only_casing_mismatches() {
        // "Hello" vs "hello" is one intersecting token either way once the
        // rest of the text matches, but a case-sensitive compare on
        // majority-mismatched casing should score lower than a
        // case-insensitive one.
        let a = paragraph("Hello World Foo");
        let b = paragraph("hello world bar");
        let sensitive = similarity_score(&normalized_text(&a), &normalized_text(&b), false);
        let insensitive = similarity_score(&normalized_text(&a), &normalized_text(&b), true);
        assert!(insensitive > sensitive);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn word_text() -> impl Strategy<Value = String> {
            prop::collection::vec("[a-z]{1,8}", 0..12).prop_map(|words| words.join(" "))
        }

        proptest! {
            /// Jaccard similarity is always in `[0, 1]`.
            #[test]
            fn jaccard_is_bounded(a in word_text(), b in word_text()) {
                let score = similarity_score(&a, &b, false);
                prop_assert!((0.0..=1.0).contains(&score));
            }

            /// Jaccard similarity is symmetric: `J(a, b) == J(b, a)`.
            #[test]
            fn jaccard_is_symmetric(a in word_text(), b in word_text()) {
                let ab = similarity_score(&a, &b, false);
                let ba = similarity_score(&b, &a, false);
                prop_assert!((ab - ba).abs() < 1e-12);
            }

            /// A text is always maximally similar to itself.
            #[test]
            fn jaccard_of_identical_text_is_one_or_undefined_empty(a in word_text()) {
                let score = similarity_score(&a, &a, false);
                prop_assert!((score - 1.0).abs() < 1e-12);
            }
        }
    }
}
