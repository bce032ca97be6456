//! The statistics accumulator (X): counts produced alongside the redlined
//! document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub insertions: usize,
    pub deletions: usize,
    pub moves: usize,
    pub unchanged: usize,
    pub original_paragraphs: usize,
    pub modified_paragraphs: usize,
}

impl Statistics {
    /// `100 * (I + D + Mv) / max(1, I + D + Mv + U)`.
    pub fn change_percentage(&self) -> f64 {
        let changed = self.insertions + self.deletions + self.moves;
        let total = (changed + self.unchanged).max(1);
        100.0 * changed as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_percentage_of_untouched_document_is_zero() {
        let stats = Statistics { unchanged: 10, ..Statistics::default() };
        assert_eq!(stats.change_percentage(), 0.0);
    }

    #[test]
    fn change_percentage_of_empty_statistics_does_not_divide_by_zero() {
        assert_eq!(Statistics::default().change_percentage(), 0.0);
    }

    #[test]
    fn change_percentage_mixes_all_three_change_kinds() {
        let stats = Statistics { insertions: 2, deletions: 1, moves: 1, unchanged: 4, ..Statistics::default() };
        assert!((stats.change_percentage() - 50.0).abs() < 1e-9);
    }
}
