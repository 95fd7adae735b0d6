//! Length values with units, and their resolution against a reference length.
//!
//! Percent resolution is integer floor division against the reference. A
//! pixel maps to 2 cells horizontally and 1 cell vertically (the terminal
//! character aspect). Resolution is never memoized: callers re-resolve
//! whenever the reference length changes.

use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// Axis a dimension is resolved on. Pixels scale differently per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A scalar tagged with a unit, or one of the intrinsic sizing keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// Character cells.
    Chars(i32),
    /// Pixels; 1 px = 2 cells horizontally, 1 cell vertically.
    Pixels(i32),
    /// Percentage of the reference length, floor-divided.
    Percent(i32),
    /// Size from content.
    #[default]
    Auto,
    /// The narrowest the content can be laid out at.
    MinContent,
    /// The content laid out without wrapping.
    MaxContent,
}

impl Dimension {
    pub const ZERO: Self = Self::Chars(0);

    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }

    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Dimension::Chars(_) | Dimension::Pixels(_) | Dimension::Percent(_)
        )
    }

    /// Resolve to an absolute cell count against `reference`.
    ///
    /// Auto, min-content and max-content have no scalar form and fail with
    /// [`StyleError::NotScalar`]; sizing code handles those variants before
    /// calling this.
    pub fn resolve(&self, reference: i32, axis: Axis) -> Result<i32, StyleError> {
        let px = match axis {
            Axis::Horizontal => 2,
            Axis::Vertical => 1,
        };
        match *self {
            Dimension::Chars(n) => Ok(n),
            Dimension::Pixels(n) => Ok(n * px),
            Dimension::Percent(p) => Ok(reference * p / 100),
            other => Err(StyleError::NotScalar(other.to_string())),
        }
    }

    /// Resolve for spacing (margin/padding): the intrinsic keywords
    /// contribute no offset.
    pub fn resolve_spacing(&self, reference: i32, axis: Axis) -> i32 {
        self.resolve(reference, axis).unwrap_or(0)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Chars(n) => write!(f, "{n}ch"),
            Dimension::Pixels(n) => write!(f, "{n}px"),
            Dimension::Percent(n) => write!(f, "{n}%"),
            Dimension::Auto => write!(f, "auto"),
            Dimension::MinContent => write!(f, "min-content"),
            Dimension::MaxContent => write!(f, "max-content"),
        }
    }
}

impl FromStr for Dimension {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || StyleError::BadValue {
            property: "dimension".into(),
            value: s.into(),
        };

        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "auto" => return Ok(Dimension::Auto),
            "min-content" | "mincontent" => return Ok(Dimension::MinContent),
            "max-content" | "maxcontent" => return Ok(Dimension::MaxContent),
            _ => {}
        }

        if let Some(n) = t.strip_suffix("px") {
            return n.trim().parse().map(Dimension::Pixels).map_err(|_| bad());
        }
        if let Some(n) = t.strip_suffix("ch") {
            return n.trim().parse().map(Dimension::Chars).map_err(|_| bad());
        }
        if let Some(n) = t.strip_suffix('%') {
            return n.trim().parse().map(Dimension::Percent).map_err(|_| bad());
        }
        t.parse().map(Dimension::Chars).map_err(|_| bad())
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        Dimension::Chars(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_floor_division() {
        assert_eq!(
            Dimension::Percent(10).resolve(100, Axis::Horizontal).unwrap(),
            10
        );
        assert_eq!(
            Dimension::Percent(33).resolve(80, Axis::Horizontal).unwrap(),
            26
        );
        // 33% of 10 is 3.3 -> floors to 3
        assert_eq!(
            Dimension::Percent(33).resolve(10, Axis::Vertical).unwrap(),
            3
        );
    }

    #[test]
    fn pixels_scale_per_axis() {
        assert_eq!(Dimension::Pixels(3).resolve(0, Axis::Horizontal).unwrap(), 6);
        assert_eq!(Dimension::Pixels(3).resolve(0, Axis::Vertical).unwrap(), 3);
    }

    #[test]
    fn keywords_are_not_scalar() {
        assert!(Dimension::Auto.resolve(100, Axis::Horizontal).is_err());
        assert!(Dimension::MinContent.resolve(100, Axis::Vertical).is_err());
        assert_eq!(Dimension::Auto.resolve_spacing(100, Axis::Horizontal), 0);
    }

    #[test]
    fn parses_every_unit() {
        assert_eq!("12".parse::<Dimension>().unwrap(), Dimension::Chars(12));
        assert_eq!("12ch".parse::<Dimension>().unwrap(), Dimension::Chars(12));
        assert_eq!("3px".parse::<Dimension>().unwrap(), Dimension::Pixels(3));
        assert_eq!("50%".parse::<Dimension>().unwrap(), Dimension::Percent(50));
        assert_eq!("auto".parse::<Dimension>().unwrap(), Dimension::Auto);
        assert_eq!(
            "min-content".parse::<Dimension>().unwrap(),
            Dimension::MinContent
        );
        assert!("12em".parse::<Dimension>().is_err());
    }
}
