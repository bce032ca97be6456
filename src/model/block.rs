use crate::model::paragraph::Paragraph;
use crate::model::table::Table;

/// A top-level element inside a section, or inside a table cell: a tagged
/// sum rather than an inheritance hierarchy — matching over the variant is
/// how every consumer (flattening, composing, writing) inspects a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}
