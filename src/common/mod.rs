//! Small cross-cutting utilities shared by the document model and the OOXML
//! reader/writer: color, length units, XML escaping, and id generation.

pub mod color;
pub mod id;
pub mod units;
pub mod xml;

pub use color::RGBColor;
pub use units::{HalfPoints, Twips};
