//! Length measurement in twentieths of a point (twips), the native unit of
//! WordprocessingML for indents, spacing, and font sizes.

use std::fmt;

/// Twips per inch (1440), per point (20), and per centimeter (567, rounded).
pub const TWIPS_PER_INCH: i32 = 1440;
pub const TWIPS_PER_POINT: i32 = 20;
pub const TWIPS_PER_CM: i32 = 567;

/// A length in twips (1/1440 inch = 1/20 point).
///
/// # Examples
///
/// ```rust
/// use redline_docx::common::Twips;
///
/// let indent = Twips::from_inches(0.5);
/// assert_eq!(indent.value(), 720);
/// assert_eq!(indent.points(), 36.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Twips(i32);

impl Twips {
    #[inline]
    pub const fn new(twips: i32) -> Self {
        Self(twips)
    }

    #[inline]
    pub fn from_points(points: f64) -> Self {
        Self((points * TWIPS_PER_POINT as f64).round() as i32)
    }

    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * TWIPS_PER_INCH as f64).round() as i32)
    }

    #[inline]
    pub fn from_cm(cm: f64) -> Self {
        Self((cm * TWIPS_PER_CM as f64).round() as i32)
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.0
    }

    #[inline]
    pub fn points(&self) -> f64 {
        self.0 as f64 / TWIPS_PER_POINT as f64
    }

    #[inline]
    pub fn inches(&self) -> f64 {
        self.0 as f64 / TWIPS_PER_INCH as f64
    }

    #[inline]
    pub fn cm(&self) -> f64 {
        self.0 as f64 / TWIPS_PER_CM as f64
    }
}

impl fmt::Display for Twips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}tw", self.0)
    }
}

/// Font size in half-points, the unit `w:sz` uses (e.g. `w:sz w:val="24"` is 12pt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct HalfPoints(pub u32);

impl HalfPoints {
    #[inline]
    pub fn from_points(points: f64) -> Self {
        Self((points * 2.0).round() as u32)
    }

    #[inline]
    pub fn points(&self) -> f64 {
        self.0 as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_round_trips_through_twips() {
        let t = Twips::from_inches(1.0);
        assert_eq!(t.value(), TWIPS_PER_INCH);
        assert!((t.inches() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn half_points_from_points() {
        assert_eq!(HalfPoints::from_points(12.0).0, 24);
        assert_eq!(HalfPoints(24).points(), 12.0);
    }
}
