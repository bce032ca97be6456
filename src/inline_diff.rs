//! The inline differ (W): diff inside one matched paragraph pair, built on
//! the `similar` crate's Myers implementation the way `stencila`'s
//! `lift_edits` module uses it — diffing token slices rather than raw text,
//! then reassembling segments with the granularity's join separator.
//!
//! Word granularity is the default and the only one spec.md's contract
//! requires; character and sentence granularity reuse the same machinery
//! over a different tokenizer (spec.md §4.4: "the algorithm is
//! granularity-agnostic at the contract level"). Paragraph granularity skips
//! intra-paragraph diffing entirely: a changed paragraph is one deleted
//! segment plus one inserted segment, with no sub-paragraph detail.

use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::options::Granularity;
use crate::text::{tokenize_characters, tokenize_sentences, tokenize_words};

/// One contiguous span of the result: either carried over unchanged, or
/// added/removed relative to the original.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffSegment {
    pub text: String,
    pub kind: SegmentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Inserted,
    Deleted,
    /// Produced only by the redline composer's move-detection pass, never by
    /// this module directly.
    MovedFrom,
    MovedTo,
}

/// Result of diffing one matched paragraph pair at word granularity. Counts
/// are numbers of *segments*, not words.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphDiffResult {
    pub segments: Vec<DiffSegment>,
    pub entirely_inserted: bool,
    pub entirely_deleted: bool,
    pub insertion_count: usize,
    pub deletion_count: usize,
    pub unchanged_count: usize,
}

/// Diff `original` against `modified` plain text at the requested
/// granularity.
pub fn diff_paragraph(original: &str, modified: &str, granularity: Granularity) -> ParagraphDiffResult {
    let original_trimmed = original.trim();
    let modified_trimmed = modified.trim();

    if original_trimmed.is_empty() && modified_trimmed.is_empty() {
        return ParagraphDiffResult::default();
    }
    if original_trimmed.is_empty() {
        return whole_paragraph_result(modified, SegmentKind::Inserted, true, false);
    }
    if modified_trimmed.is_empty() {
        return whole_paragraph_result(original, SegmentKind::Deleted, false, true);
    }

    if granularity == Granularity::Paragraph {
        if original_trimmed == modified_trimmed {
            return ParagraphDiffResult {
                segments: vec![DiffSegment { text: modified.to_string(), kind: SegmentKind::Unchanged }],
                entirely_inserted: false,
                entirely_deleted: false,
                insertion_count: 0,
                deletion_count: 0,
                unchanged_count: 1,
            };
        }
        return ParagraphDiffResult {
            segments: vec![
                DiffSegment { text: original.to_string(), kind: SegmentKind::Deleted },
                DiffSegment { text: modified.to_string(), kind: SegmentKind::Inserted },
            ],
            entirely_inserted: false,
            entirely_deleted: false,
            insertion_count: 1,
            deletion_count: 1,
            unchanged_count: 0,
        };
    }

    let (separator, original_tokens, modified_tokens) = match granularity {
        Granularity::Character => ("", tokenize_characters(original), tokenize_characters(modified)),
        Granularity::Sentence => (" ", tokenize_sentences(original), tokenize_sentences(modified)),
        Granularity::Word => (" ", tokenize_words(original), tokenize_words(modified)),
        // Handled above; unreachable, but kept exhaustive rather than panicking.
        Granularity::Paragraph => (" ", tokenize_words(original), tokenize_words(modified)),
    };

    let ops = capture_diff_slices(Algorithm::Myers, &original_tokens, &modified_tokens);

    let mut segments: Vec<DiffSegment> = Vec::new();
    let mut insertion_count = 0;
    let mut deletion_count = 0;
    let mut unchanged_count = 0;

    let mut push_run = |tokens: &[&str], kind: SegmentKind, segments: &mut Vec<DiffSegment>| {
        if tokens.is_empty() {
            return;
        }
        let mut text = tokens.join(separator);
        text.push_str(if separator.is_empty() { "" } else { " " });
        segments.push(DiffSegment { text, kind });
        match kind {
            SegmentKind::Inserted => insertion_count += 1,
            SegmentKind::Deleted => deletion_count += 1,
            SegmentKind::Unchanged => unchanged_count += 1,
            SegmentKind::MovedFrom | SegmentKind::MovedTo => {},
        }
    };

    for op in ops {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                push_run(&original_tokens[old_index..old_index + len], SegmentKind::Unchanged, &mut segments);
            },
            DiffOp::Delete { old_index, old_len, .. } => {
                push_run(&original_tokens[old_index..old_index + old_len], SegmentKind::Deleted, &mut segments);
            },
            DiffOp::Insert { new_index, new_len, .. } => {
                push_run(&modified_tokens[new_index..new_index + new_len], SegmentKind::Inserted, &mut segments);
            },
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                push_run(&original_tokens[old_index..old_index + old_len], SegmentKind::Deleted, &mut segments);
                push_run(&modified_tokens[new_index..new_index + new_len], SegmentKind::Inserted, &mut segments);
            },
        }
    }

    // For word/sentence granularity, the trailing join separator is part of
    // the contract between segments; trim it off the final segment only.
    if !separator.is_empty() {
        if let Some(last) = segments.last_mut() {
            if last.text.ends_with(separator) {
                last.text.truncate(last.text.len() - separator.len());
            }
        }
    }

    ParagraphDiffResult {
        segments,
        entirely_inserted: false,
        entirely_deleted: false,
        insertion_count,
        deletion_count,
        unchanged_count,
    }
}

fn whole_paragraph_result(
    text: &str,
    kind: SegmentKind,
    entirely_inserted: bool,
    entirely_deleted: bool,
) -> ParagraphDiffResult {
    let (insertion_count, deletion_count) = match kind {
        SegmentKind::Inserted => (1, 0),
        SegmentKind::Deleted => (0, 1),
        _ => (0, 0),
    };
    ParagraphDiffResult {
        segments: vec![DiffSegment { text: text.to_string(), kind }],
        entirely_inserted,
        entirely_deleted,
        insertion_count,
        deletion_count,
        unchanged_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_to_nonempty_is_entirely_inserted() {
        let result = diff_paragraph("", "X", Granularity::Word);
        assert!(result.entirely_inserted);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].text, "X");
        assert_eq!(result.segments[0].kind, SegmentKind::Inserted);
    }

    #[test]
    fn nonempty_to_empty_is_entirely_deleted() {
        let result = diff_paragraph("X", "", Granularity::Word);
        assert!(result.entirely_deleted);
        assert_eq!(result.segments[0].kind, SegmentKind::Deleted);
    }

    #[test]
    fn word_addition_yields_insert_with_no_deletes() {
        let result = diff_paragraph("Hello world", "Hello beautiful world", Granularity::Word);
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Inserted && s.text.contains("beautiful")));
        assert!(!result.segments.iter().any(|s| s.kind == SegmentKind::Deleted));
    }

    #[test]
    fn word_removal_yields_exactly_one_delete() {
        let result = diff_paragraph("Hello beautiful world", "Hello world", Granularity::Word);
        let deletes: Vec<_> = result.segments.iter().filter(|s| s.kind == SegmentKind::Deleted).collect();
        assert_eq!(deletes.len(), 1);
        assert!(deletes[0].text.contains("beautiful"));
    }

    #[test]
    fn replace_yields_both_a_delete_and_an_insert() {
        let result = diff_paragraph("Hello world", "Hello universe", Granularity::Word);
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Deleted && s.text.contains("world")));
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Inserted && s.text.contains("universe")));
    }

    #[test]
    fn segments_concatenate_back_to_joined_words() {
        let result = diff_paragraph("foo bar", "foo bar baz", Granularity::Word);
        let joined: String = result.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "foo bar baz");
    }

    #[test]
    fn both_empty_yields_empty_result() {
        let result = diff_paragraph("", "   ", Granularity::Word);
        assert_eq!(result, ParagraphDiffResult::default());
    }

    #[test]
    fn character_granularity_isolates_the_changed_letters() {
        let result = diff_paragraph("cat", "car", Granularity::Character);
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Unchanged && s.text == "ca"));
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Deleted && s.text == "t"));
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Inserted && s.text == "r"));
    }

    #[test]
    fn sentence_granularity_isolates_the_changed_sentence() {
        let result = diff_paragraph("One. Two. Three.", "One. Deux. Three.", Granularity::Sentence);
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Deleted && s.text == "Two."));
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Inserted && s.text == "Deux."));
        assert!(result.segments.iter().any(|s| s.kind == SegmentKind::Unchanged && s.text.contains("One.")));
    }

    #[test]
    fn paragraph_granularity_never_diffs_inside_the_paragraph() {
        let result = diff_paragraph("Hello world foo", "Hello there foo", Granularity::Paragraph);
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].kind, SegmentKind::Deleted);
        assert_eq!(result.segments[0].text, "Hello world foo");
        assert_eq!(result.segments[1].kind, SegmentKind::Inserted);
        assert_eq!(result.segments[1].text, "Hello there foo");
    }

    #[test]
    fn paragraph_granularity_of_identical_text_is_unchanged() {
        let result = diff_paragraph("Hello world", "Hello world", Granularity::Paragraph);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Unchanged);
    }
}
