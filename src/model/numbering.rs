use std::collections::BTreeMap;

use crate::common::units::Twips;
use crate::model::paragraph::ParagraphAlignment;

/// Abstract description of a multi-level list format. Referenced by id from
/// one or more [`NumberingInstance`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingDefinition {
    pub id: u32,
    pub name: Option<String>,
    pub multi_level: bool,
    pub levels: Vec<NumberingLevel>,
}

/// One level (0..8) of a [`NumberingDefinition`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingLevel {
    pub level: u8,
    pub format: NumberingFormat,
    /// Text pattern with `%n` placeholders, e.g. `"%1.%2"`.
    pub text_pattern: String,
    pub start: i32,
    pub indent: Option<Twips>,
    pub hanging_indent: Option<Twips>,
    pub alignment: ParagraphAlignment,
    pub font: Option<String>,
}

impl NumberingLevel {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            format: NumberingFormat::Decimal,
            text_pattern: format!("%{}.", level + 1),
            start: 1,
            indent: None,
            hanging_indent: None,
            alignment: ParagraphAlignment::Left,
            font: None,
        }
    }
}

/// The list-numbering formats OOXML's `w:numFmt` enumerates. Unknown values
/// read from a package fall back to `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingFormat {
    #[default]
    Decimal,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
    Bullet,
    None,
    Ordinal,
    CardinalText,
    OrdinalText,
}

impl NumberingFormat {
    pub fn from_ooxml(s: &str) -> Self {
        match s {
            "decimal" => Self::Decimal,
            "lowerLetter" => Self::LowerLetter,
            "upperLetter" => Self::UpperLetter,
            "lowerRoman" => Self::LowerRoman,
            "upperRoman" => Self::UpperRoman,
            "bullet" => Self::Bullet,
            "none" => Self::None,
            "ordinal" => Self::Ordinal,
            "cardinalText" => Self::CardinalText,
            "ordinalText" => Self::OrdinalText,
            _ => Self::Decimal,
        }
    }

    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::LowerLetter => "lowerLetter",
            Self::UpperLetter => "upperLetter",
            Self::LowerRoman => "lowerRoman",
            Self::UpperRoman => "upperRoman",
            Self::Bullet => "bullet",
            Self::None => "none",
            Self::Ordinal => "ordinal",
            Self::CardinalText => "cardinalText",
            Self::OrdinalText => "ordinalText",
        }
    }
}

/// A runtime "counter" instantiating a [`NumberingDefinition`], with optional
/// per-level overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingInstance {
    pub id: u32,
    pub definition_id: u32,
    pub overrides: BTreeMap<u8, NumberingLevelOverride>,
}

/// A per-level override on a [`NumberingInstance`]: a different start value,
/// or a full redefinition of the level's formatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberingLevelOverride {
    pub level: u8,
    pub start_override: Option<i32>,
    pub level_override: Option<NumberingLevel>,
}

/// What a [`crate::model::Paragraph`] needs to resolve its list marker: the
/// instance it counts against, and the level within that instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingInfo {
    pub instance_id: u32,
    pub level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_falls_back_to_decimal() {
        assert_eq!(NumberingFormat::from_ooxml("totallyUnknown"), NumberingFormat::Decimal);
    }

    #[test]
    fn format_round_trips_through_ooxml_strings() {
        for fmt in [
            NumberingFormat::Decimal,
            NumberingFormat::LowerRoman,
            NumberingFormat::Bullet,
            NumberingFormat::OrdinalText,
        ] {
            assert_eq!(NumberingFormat::from_ooxml(fmt.as_ooxml()), fmt);
        }
    }
}
