//! The in-memory document model: owned, deep-cloneable, no borrowed data.
//!
//! A [`Document`] is the unit everything else in this crate operates on —
//! the OOXML reader builds one, the compare pipeline diffs two of them, the
//! composer builds a third, and the OOXML writer serializes it back out.
//! Every type here is `Clone`; cloning a `Document` produces a fully
//! independent tree, which is the property the redline composer relies on
//! when it clones structural scaffolding out of the modified document.

mod block;
mod document;
mod numbering;
mod paragraph;
mod run;
mod style;
mod table;

pub use block::Block;
pub use document::{
    Document, DocumentProperties, HeaderFooterSet, PageOrientation, Section, SectionBreakType,
    SectionProperties,
};
pub use numbering::{
    NumberingDefinition, NumberingFormat, NumberingInfo, NumberingInstance, NumberingLevel,
    NumberingLevelOverride,
};
pub use paragraph::{Paragraph, ParagraphAlignment, ParagraphStyle, SpacingRule};
pub use run::{Run, RunFormatting};
pub use style::{StyleDefinition, StyleType};
pub use table::{Cell, Row, Table, TableAlignment, TableProperties, WidthType};
