//! redline-docx - compare two Word (WordprocessingML) documents and produce a
//! third `.docx` carrying the differences as formatted redlines.
//!
//! The engine never touches Word's real tracked-changes machinery
//! (`w:ins`/`w:del`). Instead it diffs two in-memory [`model::Document`]
//! trees and re-emits a single document whose runs carry formatting
//! overrides: struck-through red for deletions, bold blue for insertions,
//! green for moves.
//!
//! # Example
//!
//! ```no_run
//! use redline_docx::{compare, options::CompareOptions};
//!
//! # fn main() -> redline_docx::Result<()> {
//! let original = redline_docx::ooxml::read_docx("before.docx")?;
//! let revised = redline_docx::ooxml::read_docx("after.docx")?;
//!
//! let result = compare::compare(&original, &revised, &CompareOptions::default());
//! redline_docx::ooxml::write_docx(&result.document, "redlined.docx")?;
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod common;
pub mod compare;
pub mod compose;
pub mod error;
pub mod inline_diff;
pub mod model;
pub mod ooxml;
pub mod options;
pub mod similarity;
pub mod stats;
pub mod text;

pub use error::{Error, Result};
