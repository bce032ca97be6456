//! The compare façade: wires T/S/A/W/R/X together into one call.

use rayon::prelude::*;

use crate::align::{self, AlignEntry};
use crate::inline_diff::{self, ParagraphDiffResult};
use crate::model::Document;
use crate::options::CompareOptions;
use crate::stats::Statistics;

/// The redlined document plus the statistics accumulated while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    pub document: Document,
    pub statistics: Statistics,
}

/// Compare `original` against `modified` and build the redlined document.
///
/// This is total on well-formed model inputs: it never fails. I/O failures
/// (parsing the inputs, writing the result) are the caller's concern — see
/// [`crate::ooxml`].
pub fn compare(original: &Document, modified: &Document, options: &CompareOptions) -> CompareResult {
    let original_paragraphs = original.paragraphs_flat();
    let modified_paragraphs = modified.paragraphs_flat();

    let _span = tracing::debug_span!(
        "compare",
        original_paragraphs = original_paragraphs.len(),
        modified_paragraphs = modified_paragraphs.len(),
    )
    .entered();

    let trace: Vec<AlignEntry> = align::align(&original_paragraphs, &modified_paragraphs, options.ignore_case);
    tracing::debug!(entries = trace.len(), "aligned paragraph sequences");

    // Each matched pair's inline diff is independent of every other pair, so
    // this fans out across rayon's pool the same way rt-compare's
    // `CompareEngine::compare` parallelizes its per-pair token diff.
    let inline_diffs: Vec<ParagraphDiffResult> = trace
        .par_iter()
        .filter_map(|entry| match entry {
            AlignEntry::Matched { original_index, modified_index, .. } => Some(inline_diff::diff_paragraph(
                &original_paragraphs[*original_index].plain_text(),
                &modified_paragraphs[*modified_index].plain_text(),
                options.granularity,
            )),
            _ => None,
        })
        .collect();

    let (document, statistics) = crate::compose::compose(
        original,
        modified,
        &trace,
        &inline_diffs,
        &options.styles,
        options.detect_moves,
    );

    tracing::debug!(
        insertions = statistics.insertions,
        deletions = statistics.deletions,
        moves = statistics.moves,
        "composed redlined document"
    );

    CompareResult { document, statistics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Paragraph, Run, Section};
    use crate::options::Granularity;

    fn doc_with_paragraphs(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        let mut section = Section::default();
        for text in texts {
            let mut p = Paragraph::new();
            p.runs.push(Run::plain(*text));
            section.blocks.push(Block::Paragraph(p));
        }
        doc.sections.push(section);
        doc
    }

    #[test]
    fn identity_yields_zero_insertions_and_deletions() {
        let doc = doc_with_paragraphs(&["Hello world", "Another paragraph of text"]);
        let result = compare(&doc, &doc, &CompareOptions::default());
        assert_eq!(result.statistics.insertions, 0);
        assert_eq!(result.statistics.deletions, 0);
    }

    #[test]
    fn determinism_across_repeated_calls() {
        let original = doc_with_paragraphs(&["Hello world", "Second one here"]);
        let modified = doc_with_paragraphs(&["Hello beautiful world", "Second one here", "Third new one"]);
        let a = compare(&original, &modified, &CompareOptions::default());
        let b = compare(&original, &modified, &CompareOptions::default());
        assert_eq!(a.document, b.document);
        assert_eq!(a.statistics, b.statistics);
    }

    #[test]
    fn granularity_option_actually_changes_the_diff() {
        // A one-word substitution in the middle of an otherwise-unchanged
        // paragraph: word granularity should leave "Hello"/"foo" untouched
        // and only rewrite "world" -> "there"; paragraph granularity never
        // looks inside the paragraph, so the whole thing is one deletion
        // plus one insertion regardless of the overlap.
        let original = doc_with_paragraphs(&["Hello world foo"]);
        let modified = doc_with_paragraphs(&["Hello there foo"]);

        let word_opts = CompareOptions { granularity: Granularity::Word, ..CompareOptions::default() };
        let paragraph_opts = CompareOptions { granularity: Granularity::Paragraph, ..CompareOptions::default() };

        let word_result = compare(&original, &modified, &word_opts);
        let paragraph_result = compare(&original, &modified, &paragraph_opts);

        let word_runs = &word_result.document.sections[0].blocks[0].as_paragraph().unwrap().runs;
        assert!(word_runs.iter().any(|r| r.text.trim() == "Hello" && r.formatting.color.is_none()));
        assert!(word_runs.iter().any(|r| r.text.contains("there") && r.formatting.bold));

        let paragraph_runs = &paragraph_result.document.sections[0].blocks[0].as_paragraph().unwrap().runs;
        assert_eq!(paragraph_runs.len(), 2);
        assert!(paragraph_runs[0].text.contains("world") && paragraph_runs[0].formatting.strikethrough);
        assert!(paragraph_runs[1].text.contains("there") && paragraph_runs[1].formatting.bold);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn paragraph_texts() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec("[a-zA-Z ]{0,20}", 0..6)
        }

        proptest! {
            /// Property 16: given identical inputs and options, `compare`
            /// produces a byte-for-byte identical result every time.
            #[test]
            fn compare_is_deterministic(original in paragraph_texts(), modified in paragraph_texts()) {
                let original_strs: Vec<&str> = original.iter().map(String::as_str).collect();
                let modified_strs: Vec<&str> = modified.iter().map(String::as_str).collect();
                let original_doc = doc_with_paragraphs(&original_strs);
                let modified_doc = doc_with_paragraphs(&modified_strs);

                let a = compare(&original_doc, &modified_doc, &CompareOptions::default());
                let b = compare(&original_doc, &modified_doc, &CompareOptions::default());

                prop_assert_eq!(a.document, b.document);
                prop_assert_eq!(a.statistics, b.statistics);
            }
        }
    }
}
