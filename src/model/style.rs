use crate::model::paragraph::ParagraphStyle;
use crate::model::run::RunFormatting;

/// A named style definition: a paragraph style, character style, table
/// style, or numbering style, optionally based on another style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefinition {
    pub id: String,
    pub name: Option<String>,
    pub style_type: StyleType,
    pub based_on: Option<String>,
    pub next_style: Option<String>,
    pub paragraph_style: Option<ParagraphStyle>,
    pub run_formatting: Option<RunFormatting>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}
