use std::collections::BTreeSet;

use crate::common::units::Twips;
use crate::model::numbering::NumberingInfo;
use crate::model::run::Run;

/// A paragraph: an ordered run sequence plus its formatting and numbering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub style: ParagraphStyle,
    pub numbering: Option<NumberingInfo>,
    pub bookmark_starts: BTreeSet<String>,
    pub bookmark_ends: BTreeSet<String>,
    pub id: Option<String>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenation of run texts, verbatim (leading/trailing spaces kept).
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// `plain_text`, trimmed, with interior whitespace runs collapsed to a
    /// single space. Used only by the similarity oracle.
    pub fn normalized_text(&self) -> String {
        let text = self.plain_text();
        let mut out = String::with_capacity(text.len());
        let mut last_was_space = false;
        for ch in text.trim().chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            } else {
                out.push(ch);
                last_was_space = false;
            }
        }
        out
    }
}

/// Paragraph-level formatting: alignment, indents, spacing, pagination flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub style_id: Option<String>,
    pub heading_level: Option<u8>,
    pub alignment: ParagraphAlignment,
    pub indent_left: Twips,
    pub indent_right: Twips,
    /// Negative encodes a hanging indent.
    pub indent_first_line: Twips,
    pub spacing_before: Twips,
    pub spacing_after: Twips,
    pub spacing_line: Twips,
    pub spacing_rule: SpacingRule,
    pub keep_with_next: bool,
    pub keep_lines_together: bool,
    pub page_break_before: bool,
    pub outline_level: Option<u8>,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            style_id: None,
            heading_level: None,
            alignment: ParagraphAlignment::Left,
            indent_left: Twips::default(),
            indent_right: Twips::default(),
            indent_first_line: Twips::default(),
            spacing_before: Twips::default(),
            spacing_after: Twips::default(),
            spacing_line: Twips::default(),
            spacing_rule: SpacingRule::Auto,
            keep_with_next: false,
            keep_lines_together: false,
            page_break_before: false,
            outline_level: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingRule {
    #[default]
    Auto,
    Exact,
    AtLeast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_preserves_spacing() {
        let mut p = Paragraph::new();
        p.runs.push(Run::plain("  leading"));
        p.runs.push(Run::plain(" and trailing  "));
        assert_eq!(p.plain_text(), "  leading and trailing  ");
    }

    #[test]
    fn normalized_text_collapses_whitespace() {
        let mut p = Paragraph::new();
        p.runs.push(Run::plain("  Hello   "));
        p.runs.push(Run::plain("\tworld\n"));
        assert_eq!(p.normalized_text(), "Hello world");
    }

    #[test]
    fn normalized_text_of_empty_paragraph_is_empty() {
        assert_eq!(Paragraph::new().normalized_text(), "");
    }
}
