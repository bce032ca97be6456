use crate::common::units::HalfPoints;
use crate::common::RGBColor;

/// A maximal span of text sharing one formatting record inside a paragraph.
///
/// Leading and trailing spaces in `text` are significant and must round-trip
/// through the OOXML writer unchanged (`xml:space="preserve"`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub formatting: RunFormatting,
}

impl Run {
    pub fn new(text: impl Into<String>, formatting: RunFormatting) -> Self {
        Self { text: text.into(), formatting }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), formatting: RunFormatting::default() }
    }
}

/// Character-level formatting. `None` fields mean "not set at this level";
/// resolution against a style's own `RunFormatting` is the writer's concern,
/// not this type's.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub font_family: Option<String>,
    pub font_size: Option<HalfPoints>,
    pub color: Option<RGBColor>,
    pub highlight_color: Option<RGBColor>,
    pub style_id: Option<String>,
}

impl RunFormatting {
    /// Formatting for a deleted run: strikethrough + red. The base formatting
    /// (font, bold, etc.) is preserved; only strikethrough and color are
    /// overridden. This exact hex/flag pair is a contract — tests assert it.
    pub fn for_deletion(base: Option<&RunFormatting>) -> Self {
        let mut f = base.cloned().unwrap_or_default();
        f.strikethrough = true;
        f.color = Some(RGBColor::FOR_DELETION);
        f
    }

    /// Formatting for an inserted run: bold + blue.
    pub fn for_insertion(base: Option<&RunFormatting>) -> Self {
        let mut f = base.cloned().unwrap_or_default();
        f.bold = true;
        f.color = Some(RGBColor::FOR_INSERTION);
        f
    }

    /// Formatting for a moved run: green, plus strikethrough on the source
    /// (pre-move) side only.
    pub fn for_move(base: Option<&RunFormatting>, is_source: bool) -> Self {
        let mut f = base.cloned().unwrap_or_default();
        f.color = Some(RGBColor::FOR_MOVE);
        if is_source {
            f.strikethrough = true;
        }
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_deletion_contract() {
        let f = RunFormatting::for_deletion(None);
        assert!(f.strikethrough);
        assert_eq!(f.color, Some(RGBColor::FOR_DELETION));
        assert_eq!(f.color.unwrap().to_hex(), "FF0000");
    }

    #[test]
    fn for_insertion_contract() {
        let f = RunFormatting::for_insertion(None);
        assert!(f.bold);
        assert_eq!(f.color.unwrap().to_hex(), "0000FF");
    }

    #[test]
    fn for_move_contract() {
        let source = RunFormatting::for_move(None, true);
        assert_eq!(source.color.unwrap().to_hex(), "008000");
        assert!(source.strikethrough);

        let target = RunFormatting::for_move(None, false);
        assert_eq!(target.color.unwrap().to_hex(), "008000");
        assert!(!target.strikethrough);
    }

    #[test]
    fn base_formatting_is_preserved() {
        let base = RunFormatting {
            bold: true,
            font_family: Some("Arial".into()),
            font_size: Some(HalfPoints::from_points(12.0)),
            ..Default::default()
        };
        let deleted = RunFormatting::for_deletion(Some(&base));
        assert!(deleted.bold);
        assert_eq!(deleted.font_family.as_deref(), Some("Arial"));
        assert_eq!(deleted.font_size, Some(HalfPoints::from_points(12.0)));
        assert!(deleted.strikethrough);
        assert_eq!(deleted.color.unwrap().to_hex(), "FF0000");
    }
}
