//! Options controlling one compare call: what to ignore, how fine-grained
//! the inline diff should be, and what colors/flags the redline uses.

use serde::{Deserialize, Serialize};

use crate::common::RGBColor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Rewrite consecutive delete-only/insert-only runs whose normalized
    /// text matches exactly into MovedFrom/MovedTo pairs. See
    /// [`crate::compose`] for the exact-match policy this implements.
    pub detect_moves: bool,
    pub ignore_whitespace: bool,
    pub ignore_case: bool,
    pub ignore_formatting: bool,
    pub granularity: Granularity,
    pub styles: RedlineStyles,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            detect_moves: false,
            ignore_whitespace: true,
            ignore_case: false,
            ignore_formatting: false,
            granularity: Granularity::Word,
            styles: RedlineStyles::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Granularity {
    Character,
    #[default]
    Word,
    Sentence,
    Paragraph,
}

/// Colors and flags the redline composer uses in place of the hard-coded
/// deletion/insertion/move defaults, when a caller overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedlineStyles {
    pub deletion_color: RGBColor,
    pub insertion_color: RGBColor,
    pub move_color: RGBColor,
    pub insertion_bold: bool,
    pub deletion_strikethrough: bool,
}

impl Default for RedlineStyles {
    fn default() -> Self {
        Self {
            deletion_color: RGBColor::FOR_DELETION,
            insertion_color: RGBColor::FOR_INSERTION,
            move_color: RGBColor::FOR_MOVE,
            insertion_bold: true,
            deletion_strikethrough: true,
        }
    }
}
