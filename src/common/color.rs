use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// RGB color used for run formatting (text color, redline colors).
///
/// Parses from hex strings (#RRGGBB, #RGB) and CSS3 named colors, matching the
/// subset of color syntax that shows up in `w:color`/`w:highlight` attributes.
///
/// # Examples
///
/// ```rust
/// use redline_docx::common::RGBColor;
///
/// let red = RGBColor::new(255, 0, 0);
/// let blue = RGBColor::from_hex("0000FF").unwrap();
/// let green: RGBColor = "#0f0".parse().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RGBColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGBColor {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from `#RRGGBB` or `#RGB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> crate::Result<Self> {
        let hex = hex.trim().trim_start_matches('#');

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16)
                    .map_err(|_| Error::Other("invalid hex digit for red".into()))?;
                let g = u8::from_str_radix(&hex[1..2], 16)
                    .map_err(|_| Error::Other("invalid hex digit for green".into()))?;
                let b = u8::from_str_radix(&hex[2..3], 16)
                    .map_err(|_| Error::Other("invalid hex digit for blue".into()))?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            },
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|_| Error::Other("invalid hex value for red".into()))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|_| Error::Other("invalid hex value for green".into()))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|_| Error::Other("invalid hex value for blue".into()))?;
                Ok(Self::new(r, g, b))
            },
            _ => Err(Error::Other(format!(
                "invalid hex color format '{hex}', expected #RGB or #RRGGBB"
            ))),
        }
    }

    /// Parse a CSS3 named color (case-insensitive).
    pub fn from_name(name: &str) -> crate::Result<Self> {
        match name.to_lowercase().as_str() {
            "black" => Ok(Self::new(0, 0, 0)),
            "white" => Ok(Self::new(255, 255, 255)),
            "red" => Ok(Self::new(255, 0, 0)),
            "green" => Ok(Self::new(0, 128, 0)),
            "blue" => Ok(Self::new(0, 0, 255)),
            "lime" => Ok(Self::new(0, 255, 0)),
            "yellow" => Ok(Self::new(255, 255, 0)),
            "cyan" | "aqua" => Ok(Self::new(0, 255, 255)),
            "magenta" | "fuchsia" => Ok(Self::new(255, 0, 255)),
            "silver" => Ok(Self::new(192, 192, 192)),
            "gray" | "grey" => Ok(Self::new(128, 128, 128)),
            "maroon" => Ok(Self::new(128, 0, 0)),
            "olive" => Ok(Self::new(128, 128, 0)),
            "navy" => Ok(Self::new(0, 0, 128)),
            "purple" => Ok(Self::new(128, 0, 128)),
            "teal" => Ok(Self::new(0, 128, 128)),
            "orange" => Ok(Self::new(255, 165, 0)),
            "pink" => Ok(Self::new(255, 192, 203)),
            "brown" => Ok(Self::new(165, 42, 42)),
            "gold" => Ok(Self::new(255, 215, 0)),
            _ => Err(Error::Other(format!("unknown color name '{name}'"))),
        }
    }

    /// Hex string without `#`, uppercase (the form `w:color` attributes use).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Hex string with `#`, lowercase.
    #[inline]
    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[inline]
    pub const fn red(&self) -> u8 {
        self.r
    }

    #[inline]
    pub const fn green(&self) -> u8 {
        self.g
    }

    #[inline]
    pub const fn blue(&self) -> u8 {
        self.b
    }
}

impl RGBColor {
    /// Color contract for deletions: strikethrough + this red.
    pub const FOR_DELETION: Self = Self::new(0xFF, 0x00, 0x00);
    /// Color contract for insertions: bold + this blue.
    pub const FOR_INSERTION: Self = Self::new(0x00, 0x00, 0xFF);
    /// Color contract for moves: this green, plus strikethrough on the source side.
    pub const FOR_MOVE: Self = Self::new(0x00, 0x80, 0x00);

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 128, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
}

impl FromStr for RGBColor {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') || trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            Self::from_hex(trimmed)
        } else {
            Self::from_name(trimmed)
        }
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redline_color_contract() {
        assert_eq!(RGBColor::FOR_DELETION.to_hex(), "FF0000");
        assert_eq!(RGBColor::FOR_INSERTION.to_hex(), "0000FF");
        assert_eq!(RGBColor::FOR_MOVE.to_hex(), "008000");
    }

    #[test]
    fn hex_round_trip() {
        let c = RGBColor::new(255, 128, 64);
        assert_eq!(c.to_hex(), "FF8040");
        assert_eq!(c.to_hex_string(), "#ff8040");
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(RGBColor::from_hex("#abc").unwrap(), RGBColor::new(170, 187, 204));
    }

    #[test]
    fn named_colors() {
        assert_eq!(RGBColor::from_name("red").unwrap(), RGBColor::RED);
        assert_eq!(RGBColor::from_name("RED").unwrap(), RGBColor::RED);
    }

    #[test]
    fn from_str_tries_hex_then_name() {
        let c: RGBColor = "#ff0000".parse().unwrap();
        assert_eq!(c, RGBColor::RED);
        let c: RGBColor = "red".parse().unwrap();
        assert_eq!(c, RGBColor::RED);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(RGBColor::from_hex("#gg0000").is_err());
        assert!(RGBColor::from_hex("#ff00").is_err());
    }
}
