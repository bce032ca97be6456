use crate::model::block::Block;
use crate::model::paragraph::Paragraph;

/// A table: rows of cells, each cell holding its own block sequence. Table
/// bodies are opaque to the paragraph aligner — cell paragraphs participate
/// in the flattened sequence it diffs, but alignment never reorders content
/// across table boundaries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<Row>,
    pub properties: Option<TableProperties>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub blocks: Vec<Block>,
}

impl Cell {
    /// Every emitted cell must contain at least one paragraph; this produces
    /// an empty placeholder when a cell would otherwise be block-less.
    pub fn with_placeholder_if_empty(mut self) -> Self {
        if self.blocks.is_empty() {
            self.blocks.push(Block::Paragraph(Paragraph::new()));
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableProperties {
    pub width: Option<i32>,
    pub width_type: WidthType,
    pub alignment: TableAlignment,
}

impl Default for TableProperties {
    fn default() -> Self {
        Self { width: None, width_type: WidthType::Auto, alignment: TableAlignment::Left }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthType {
    #[default]
    Auto,
    /// Twentieths of a point (dxa), OOXML's `w:type="dxa"`.
    Dxa,
    /// Fiftieths of a percent, OOXML's `w:type="pct"`.
    Pct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlignment {
    #[default]
    Left,
    Center,
    Right,
}
