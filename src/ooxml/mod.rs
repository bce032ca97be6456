//! Reads and writes the WordprocessingML subset of the OOXML package format
//! that [`crate::model`] cares about: document body, numbering, styles, and
//! core document properties.
//!
//! This is the "external collaborator" `spec.md` §1 scopes out of the core
//! diff engine's contract — the core only knows about [`crate::model::Document`].
//! It is carried here, grounded on the teacher's `quick-xml` event-loop and
//! string-builder idioms, so the crate has a working end-to-end path.

mod reader;
mod templates;
mod writer;

use std::io::{Read, Write};
use std::path::Path;

pub use reader::DocumentParser;
pub use writer::DocumentGenerator;

use crate::model::Document;
use crate::Result;

/// Read a `.docx` package from `path` into the document model.
pub fn read_docx(path: impl AsRef<Path>) -> Result<Document> {
    reader::DocxReader.parse(path.as_ref())
}

/// Read a `.docx` package from an in-memory byte buffer.
pub fn read_docx_bytes(bytes: &[u8]) -> Result<Document> {
    reader::DocxReader.parse_bytes(bytes)
}

/// Read a `.docx` package from an arbitrary stream, e.g. an upload body that
/// hasn't been buffered to disk.
pub fn read_docx_stream(reader: &mut dyn Read, filename_hint: &str) -> Result<Document> {
    reader::DocxReader.parse_reader(reader, filename_hint)
}

/// Write the document model to a `.docx` package at `path`.
pub fn write_docx(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    writer::DocxWriter.generate(document, path.as_ref())
}

/// Serialize the document model to an in-memory `.docx` package.
pub fn write_docx_bytes(document: &Document) -> Result<Vec<u8>> {
    writer::DocxWriter.generate_bytes(document)
}

/// Write the document model out to an arbitrary stream.
pub fn write_docx_stream(document: &Document, writer: &mut dyn Write) -> Result<()> {
    writer::DocxWriter.generate_writer(document, writer)
}
