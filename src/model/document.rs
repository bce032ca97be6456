use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::units::Twips;
use crate::model::block::Block;
use crate::model::numbering::{NumberingDefinition, NumberingInstance};
use crate::model::paragraph::Paragraph;
use crate::model::style::StyleDefinition;

/// The root of the document model. Owns every section, numbering
/// definition/instance, and style definition; nothing inside a `Document`
/// borrows from or shares state with another `Document`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub properties: DocumentProperties,
    pub sections: Vec<Section>,
    pub numbering_definitions: Vec<NumberingDefinition>,
    pub numbering_instances: Vec<NumberingInstance>,
    pub styles: Vec<StyleDefinition>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every paragraph in document order: each section's top-level blocks,
    /// and — in place, where a `Table` block occurs — the paragraphs inside
    /// that table's cells (row-major, cell-major, block order).
    pub fn paragraphs_flat(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for section in &self.sections {
            flatten_blocks(&section.blocks, &mut out);
        }
        out
    }

    pub fn numbering_definition(&self, id: u32) -> Option<&NumberingDefinition> {
        self.numbering_definitions.iter().find(|d| d.id == id)
    }

    pub fn numbering_instance(&self, id: u32) -> Option<&NumberingInstance> {
        self.numbering_instances.iter().find(|i| i.id == id)
    }
}

fn flatten_blocks<'a>(blocks: &'a [Block], out: &mut Vec<&'a Paragraph>) {
    for block in blocks {
        match block {
            Block::Paragraph(p) => out.push(p),
            Block::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        flatten_blocks(&cell.blocks, out);
                    }
                }
            },
        }
    }
}

/// Document-level metadata (`docProps/core.xml` / `app.xml`). All fields are
/// optional: a freshly-built redlined document carries only what the
/// composer chose to clone from the modified input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub creator: Option<String>,
    pub last_modified_by: Option<String>,
    pub default_font: Option<String>,
    pub default_font_size: Option<f64>,
}

/// A section: its blocks, page layout, and header/footer sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub blocks: Vec<Block>,
    pub properties: SectionProperties,
    pub headers: HeaderFooterSet,
    pub footers: HeaderFooterSet,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            properties: SectionProperties::default(),
            headers: HeaderFooterSet::default(),
            footers: HeaderFooterSet::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionProperties {
    pub page_width: Twips,
    pub page_height: Twips,
    pub margin_top: Twips,
    pub margin_bottom: Twips,
    pub margin_left: Twips,
    pub margin_right: Twips,
    pub header_distance: Twips,
    pub footer_distance: Twips,
    pub orientation: PageOrientation,
    pub break_type: SectionBreakType,
    pub different_first_page: bool,
    pub different_odd_even: bool,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            page_width: Twips::new(12240),
            page_height: Twips::new(15840),
            margin_top: Twips::new(1440),
            margin_bottom: Twips::new(1440),
            margin_left: Twips::new(1440),
            margin_right: Twips::new(1440),
            header_distance: Twips::new(720),
            footer_distance: Twips::new(720),
            orientation: PageOrientation::Portrait,
            break_type: SectionBreakType::NextPage,
            different_first_page: false,
            different_odd_even: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionBreakType {
    Continuous,
    #[default]
    NextPage,
    EvenPage,
    OddPage,
}

/// A section's header (or footer) content, keyed by which pages it applies
/// to. `default` covers pages not handled by `first`/`even`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderFooterSet {
    pub default: Option<Vec<Block>>,
    pub first: Option<Vec<Block>>,
    pub even: Option<Vec<Block>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::paragraph::Paragraph;
    use crate::model::table::{Cell, Row, Table};

    fn para(text: &str) -> Block {
        let mut p = Paragraph::new();
        p.runs.push(crate::model::run::Run::plain(text));
        Block::Paragraph(p)
    }

    #[test]
    fn flattening_descends_into_table_cells_in_order() {
        let mut doc = Document::new();
        let table = Table {
            rows: vec![Row {
                cells: vec![
                    Cell { blocks: vec![para("cell-a")] },
                    Cell { blocks: vec![para("cell-b")] },
                ],
            }],
            properties: None,
        };
        let mut section = Section::default();
        section.blocks.push(para("before"));
        section.blocks.push(Block::Table(table));
        section.blocks.push(para("after"));
        doc.sections.push(section);

        let texts: Vec<String> = doc.paragraphs_flat().iter().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["before", "cell-a", "cell-b", "after"]);
    }

    #[test]
    fn clone_is_deep() {
        let mut doc = Document::new();
        doc.sections.push(Section::default());
        doc.sections[0].blocks.push(para("original"));

        let mut cloned = doc.clone();
        if let Block::Paragraph(p) = &mut cloned.sections[0].blocks[0] {
            p.runs[0].text = "mutated".into();
        }

        assert_eq!(doc.sections[0].blocks[0].as_paragraph().unwrap().plain_text(), "original");
    }
}
