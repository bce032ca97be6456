//! The redline composer (R): walks an alignment trace and builds the output
//! document by cloning the modified document's structural scaffolding and
//! emitting rewritten paragraph sequences whose runs carry redline
//! formatting.

use crate::align::AlignEntry;
use crate::inline_diff::{ParagraphDiffResult, SegmentKind};
use crate::model::{
    Block, Document, HeaderFooterSet, NumberingInfo, NumberingInstance, Paragraph, Run,
    RunFormatting, Section, SectionProperties,
};
use crate::options::RedlineStyles;
use crate::stats::Statistics;
use crate::text;

/// Build the redlined document `D` from `original`/`modified` and their
/// alignment trace, accumulating statistics along the way.
///
/// `inline_diffs[k]` must be the result of diffing the `k`-th `Matched`
/// entry in `trace`, in the order `Matched` entries appear in `trace`.
pub fn compose(
    original: &Document,
    modified: &Document,
    trace: &[AlignEntry],
    inline_diffs: &[ParagraphDiffResult],
    styles: &RedlineStyles,
    detect_moves: bool,
) -> (Document, Statistics) {
    let original_paragraphs = original.paragraphs_flat();
    let modified_paragraphs = modified.paragraphs_flat();

    let mut document = Document {
        properties: modified.properties.clone(),
        sections: Vec::new(),
        numbering_definitions: modified.numbering_definitions.clone(),
        numbering_instances: modified.numbering_instances.clone(),
        styles: modified.styles.clone(),
    };

    let (properties, headers, footers) = match modified.sections.first() {
        Some(s) => (s.properties.clone(), s.headers.clone(), s.footers.clone()),
        None => (SectionProperties::default(), HeaderFooterSet::default(), HeaderFooterSet::default()),
    };

    let mut stats = Statistics {
        original_paragraphs: original_paragraphs.len(),
        modified_paragraphs: modified_paragraphs.len(),
        ..Statistics::default()
    };

    let mut blocks = Vec::with_capacity(trace.len());
    let mut inline_diffs = inline_diffs.iter();

    for entry in trace {
        match *entry {
            AlignEntry::Deleted { original_index } => {
                let source = original_paragraphs[original_index];
                let word_count = text::tokenize_words(&source.plain_text()).len();
                let mut paragraph = rewrite_whole_paragraph(source, |base| deletion_formatting(base, styles));
                drop_dangling_numbering(&mut paragraph, &document.numbering_instances);
                blocks.push(Block::Paragraph(paragraph));
                stats.deletions += word_count;
            },
            AlignEntry::Inserted { modified_index } => {
                let source = modified_paragraphs[modified_index];
                let word_count = text::tokenize_words(&source.plain_text()).len();
                blocks.push(Block::Paragraph(rewrite_whole_paragraph(source, |base| {
                    insertion_formatting(base, styles)
                })));
                stats.insertions += word_count;
            },
            AlignEntry::Matched { modified_index, .. } => {
                let diff = inline_diffs.next().expect("one inline diff per Matched entry");
                let modified_paragraph = modified_paragraphs[modified_index];
                blocks.push(Block::Paragraph(build_matched_paragraph(modified_paragraph, diff, styles)));
                stats.insertions += diff.insertion_count;
                stats.deletions += diff.deletion_count;
                stats.unchanged += diff.unchanged_count;
            },
        }
    }

    if detect_moves {
        detect_and_mark_moves(&mut blocks, &mut stats, styles);
    }

    document.sections.push(Section { blocks, properties, headers, footers });
    (document, stats)
}

/// A deleted paragraph is cloned from `original`, but the output document's
/// numbering list is cloned from `modified` (spec.md §3: numbering instance
/// identity is document-scoped). If the instance the deleted paragraph
/// numbers against didn't survive into `modified`, clear the reference
/// rather than emit a dangling `numId` (spec.md §3: "dangling references ...
/// must not be produced on output").
fn drop_dangling_numbering(paragraph: &mut Paragraph, numbering_instances: &[NumberingInstance]) {
    if let Some(info) = paragraph.numbering {
        if !numbering_instances.iter().any(|inst| inst.id == info.instance_id) {
            paragraph.numbering = None;
        }
    }
}

fn rewrite_whole_paragraph(
    source: &Paragraph,
    formatting_for: impl Fn(Option<&RunFormatting>) -> RunFormatting,
) -> Paragraph {
    let mut out = source.clone();
    for run in &mut out.runs {
        run.formatting = formatting_for(Some(&run.formatting));
    }
    out
}

fn build_matched_paragraph(
    modified_paragraph: &Paragraph,
    diff: &ParagraphDiffResult,
    styles: &RedlineStyles,
) -> Paragraph {
    let mut out = Paragraph {
        runs: Vec::with_capacity(diff.segments.len()),
        style: modified_paragraph.style.clone(),
        numbering: modified_paragraph.numbering,
        bookmark_starts: modified_paragraph.bookmark_starts.clone(),
        bookmark_ends: modified_paragraph.bookmark_ends.clone(),
        id: modified_paragraph.id.clone(),
    };

    for segment in &diff.segments {
        if segment.text.is_empty() {
            continue;
        }
        let formatting = match segment.kind {
            SegmentKind::Unchanged => RunFormatting::default(),
            SegmentKind::Deleted => deletion_formatting(None, styles),
            SegmentKind::Inserted => insertion_formatting(None, styles),
            SegmentKind::MovedFrom => move_formatting(None, styles, true),
            SegmentKind::MovedTo => move_formatting(None, styles, false),
        };
        out.runs.push(Run::new(segment.text.clone(), formatting));
    }

    out
}

fn deletion_formatting(base: Option<&RunFormatting>, styles: &RedlineStyles) -> RunFormatting {
    let mut f = base.cloned().unwrap_or_default();
    f.strikethrough = styles.deletion_strikethrough;
    f.color = Some(styles.deletion_color);
    f
}

fn insertion_formatting(base: Option<&RunFormatting>, styles: &RedlineStyles) -> RunFormatting {
    let mut f = base.cloned().unwrap_or_default();
    f.bold = styles.insertion_bold;
    f.color = Some(styles.insertion_color);
    f
}

fn move_formatting(base: Option<&RunFormatting>, styles: &RedlineStyles, is_source: bool) -> RunFormatting {
    let mut f = base.cloned().unwrap_or_default();
    f.color = Some(styles.move_color);
    if is_source {
        f.strikethrough = true;
    }
    f
}

/// Move-detection hook (`CompareOptions.detect_moves`). Runs of consecutive
/// Deleted-only and Inserted-only paragraphs whose normalized texts match
/// exactly are rewritten into MovedFrom/MovedTo pairs; the policy beyond
/// exact normalized-text equality is left open by design (see
/// `spec.md` §9 "Open questions").
fn detect_and_mark_moves(blocks: &mut [Block], stats: &mut Statistics, styles: &RedlineStyles) {
    let normalized: Vec<Option<String>> = blocks
        .iter()
        .map(|b| b.as_paragraph().map(|p| p.normalized_text()))
        .collect();

    let is_all_deleted = |p: &Paragraph| p.runs.iter().all(|r| r.formatting.color == Some(styles.deletion_color));
    let is_all_inserted = |p: &Paragraph| p.runs.iter().all(|r| r.formatting.color == Some(styles.insertion_color));

    for i in 0..blocks.len() {
        let Some(text_i) = normalized[i].clone() else { continue };
        if text_i.is_empty() {
            continue;
        }
        let Block::Paragraph(p) = &blocks[i] else { continue };
        if !is_all_deleted(p) {
            continue;
        }

        if let Some(j) = (0..blocks.len()).find(|&j| {
            j != i
                && normalized[j].as_deref() == Some(text_i.as_str())
                && matches!(&blocks[j], Block::Paragraph(q) if is_all_inserted(q))
        }) {
            let word_count = text::tokenize_words(&text_i).len();

            if let Block::Paragraph(p) = &mut blocks[i] {
                for run in &mut p.runs {
                    run.formatting = move_formatting(Some(&run.formatting), styles, true);
                }
            }
            if let Block::Paragraph(q) = &mut blocks[j] {
                for run in &mut q.runs {
                    run.formatting = move_formatting(Some(&run.formatting), styles, false);
                }
            }

            stats.deletions = stats.deletions.saturating_sub(word_count);
            stats.insertions = stats.insertions.saturating_sub(word_count);
            stats.moves += word_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::inline_diff::diff_paragraph;
    use crate::model::Run as ModelRun;
    use crate::options::Granularity;

    fn doc_with_paragraphs(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        let mut section = Section::default();
        for text in texts {
            let mut p = Paragraph::new();
            p.runs.push(ModelRun::plain(*text));
            section.blocks.push(Block::Paragraph(p));
        }
        doc.sections.push(section);
        doc
    }

    fn compare_simple(original: &Document, modified: &Document, detect_moves: bool) -> (Document, Statistics) {
        let originals = original.paragraphs_flat();
        let modifieds = modified.paragraphs_flat();
        let trace = align(&originals, &modifieds, false);

        let mut diffs = Vec::new();
        for entry in &trace {
            if let AlignEntry::Matched { original_index, modified_index, .. } = entry {
                diffs.push(diff_paragraph(
                    &originals[*original_index].plain_text(),
                    &modifieds[*modified_index].plain_text(),
                    Granularity::Word,
                ));
            }
        }

        compose(original, modified, &trace, &diffs, &RedlineStyles::default(), detect_moves)
    }

    #[test]
    fn identity_has_no_insertions_or_deletions() {
        let doc = doc_with_paragraphs(&["Hello world", "Second paragraph here"]);
        let (redlined, stats) = compare_simple(&doc, &doc, false);
        assert_eq!(stats.insertions, 0);
        assert_eq!(stats.deletions, 0);
        for block in &redlined.sections[0].blocks {
            let p = block.as_paragraph().unwrap();
            for run in &p.runs {
                assert_ne!(run.formatting.color, Some(RedlineStyles::default().deletion_color));
                assert_ne!(run.formatting.color, Some(RedlineStyles::default().insertion_color));
            }
        }
    }

    #[test]
    fn deleted_paragraph_gets_deletion_formatting() {
        let original = doc_with_paragraphs(&["Alpha one", "Gone paragraph entirely", "Charlie three"]);
        let modified = doc_with_paragraphs(&["Alpha one", "Charlie three"]);
        let (redlined, stats) = compare_simple(&original, &modified, false);
        assert!(stats.deletions > 0);

        let deleted_block = redlined.sections[0]
            .blocks
            .iter()
            .find(|b| b.as_paragraph().unwrap().plain_text().contains("Gone"))
            .unwrap();
        let p = deleted_block.as_paragraph().unwrap();
        assert!(p.runs.iter().all(|r| r.formatting.strikethrough));
    }

    #[test]
    fn deleted_paragraph_loses_numbering_not_present_in_modified() {
        let mut original = doc_with_paragraphs(&["Alpha one", "Gone paragraph entirely", "Charlie three"]);
        original.numbering_instances.push(NumberingInstance { id: 7, definition_id: 0, overrides: Default::default() });
        if let Block::Paragraph(p) = &mut original.sections[0].blocks[1] {
            p.numbering = Some(NumberingInfo { instance_id: 7, level: 0 });
        }

        // `modified` never carries numbering instance 7.
        let modified = doc_with_paragraphs(&["Alpha one", "Charlie three"]);

        let (redlined, _) = compare_simple(&original, &modified, false);
        let deleted_block = redlined.sections[0]
            .blocks
            .iter()
            .find(|b| b.as_paragraph().unwrap().plain_text().contains("Gone"))
            .unwrap();
        assert_eq!(deleted_block.as_paragraph().unwrap().numbering, None);
    }

    #[test]
    fn deleted_paragraph_keeps_numbering_present_in_modified() {
        let mut original = doc_with_paragraphs(&["Alpha one", "Gone paragraph entirely", "Charlie three"]);
        original.numbering_instances.push(NumberingInstance { id: 7, definition_id: 0, overrides: Default::default() });
        if let Block::Paragraph(p) = &mut original.sections[0].blocks[1] {
            p.numbering = Some(NumberingInfo { instance_id: 7, level: 0 });
        }

        let mut modified = doc_with_paragraphs(&["Alpha one", "Charlie three"]);
        modified.numbering_instances.push(NumberingInstance { id: 7, definition_id: 0, overrides: Default::default() });

        let (redlined, _) = compare_simple(&original, &modified, false);
        let deleted_block = redlined.sections[0]
            .blocks
            .iter()
            .find(|b| b.as_paragraph().unwrap().plain_text().contains("Gone"))
            .unwrap();
        assert_eq!(
            deleted_block.as_paragraph().unwrap().numbering,
            Some(NumberingInfo { instance_id: 7, level: 0 })
        );
    }

    #[test]
    fn move_detection_converts_delete_insert_pair_into_moves() {
        // "Relocated paragraph text" moves from the middle to the front;
        // "Alpha stays"/"Charlie stays" match in place on both sides, so the
        // aligner's optimal common subsequence is those two, leaving the
        // relocated paragraph as a Deleted/Inserted pair for move detection
        // to pick up.
        let original = doc_with_paragraphs(&["Alpha stays", "Relocated paragraph text", "Charlie stays"]);
        let modified = doc_with_paragraphs(&["Relocated paragraph text", "Alpha stays", "Charlie stays"]);
        let (_, stats) = compare_simple(&original, &modified, true);
        assert!(stats.moves > 0);
    }
}
