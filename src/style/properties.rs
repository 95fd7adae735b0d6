//! The closed set of style properties.
//!
//! Each property is one variant of [`StyleProperty`], carrying its typed
//! payload and identified by a [`PropertyKind`]. A static name table maps the
//! kebab-case names used by XML documents and stylesheets to kinds; every
//! kind has a static default, so resolved lookups never return "unset".

use std::str::FromStr;

use crate::error::StyleError;
use crate::style::color::Color;
use crate::style::dimension::{Axis, Dimension};

// =============================================================================
// Value types
// =============================================================================

/// Per-side spacing used by margin and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub left: Dimension,
    pub right: Dimension,
    pub top: Dimension,
    pub bottom: Dimension,
}

impl Spacing {
    pub const ZERO: Self = Self {
        left: Dimension::ZERO,
        right: Dimension::ZERO,
        top: Dimension::ZERO,
        bottom: Dimension::ZERO,
    };

    pub const fn uniform(value: Dimension) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    pub const fn symmetric(horizontal: Dimension, vertical: Dimension) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    /// Resolved left+right against a horizontal reference.
    pub fn horizontal_total(&self, reference: i32) -> i32 {
        self.left.resolve_spacing(reference, Axis::Horizontal)
            + self.right.resolve_spacing(reference, Axis::Horizontal)
    }

    /// Resolved top+bottom against a vertical reference.
    pub fn vertical_total(&self, reference: i32) -> i32 {
        self.top.resolve_spacing(reference, Axis::Vertical)
            + self.bottom.resolve_spacing(reference, Axis::Vertical)
    }
}

impl FromStr for Spacing {
    type Err = StyleError;

    /// CSS-like shorthand: one value for all sides, two for
    /// horizontal/vertical, four for left/right/top/bottom.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<Dimension> = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [all] => Ok(Spacing::uniform(*all)),
            [h, v] => Ok(Spacing::symmetric(*h, *v)),
            [l, r, t, b] => Ok(Spacing {
                left: *l,
                right: *r,
                top: *t,
                bottom: *b,
            }),
            _ => Err(StyleError::BadValue {
                property: "spacing".into(),
                value: s.into(),
            }),
        }
    }
}

/// The glyphs of one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_right: char,
    pub bottom_left: char,
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderKind {
    #[default]
    None,
    Solid,
    Double,
    Rounded,
    Thick,
}

impl BorderKind {
    /// Glyph set for the style. `None` has no glyphs to draw.
    pub fn chars(&self) -> Option<BorderChars> {
        let (h, v, tl, tr, br, bl) = match self {
            BorderKind::None => return None,
            BorderKind::Solid => ('─', '│', '┌', '┐', '┘', '└'),
            BorderKind::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            BorderKind::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            BorderKind::Thick => ('━', '┃', '┏', '┓', '┛', '┗'),
        };
        Some(BorderChars {
            horizontal: h,
            vertical: v,
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        })
    }
}

/// Border style plus the color it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderStyle {
    pub kind: BorderKind,
    pub color: Color,
}

impl BorderStyle {
    pub const NONE: Self = Self {
        kind: BorderKind::None,
        color: Color::Default,
    };

    pub const fn solid(color: Color) -> Self {
        Self {
            kind: BorderKind::Solid,
            color,
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self.kind, BorderKind::None)
    }

    /// Cells a bordered side occupies: 0 for no border, otherwise 1.
    #[inline]
    pub const fn thickness(&self) -> i32 {
        if self.is_none() { 0 } else { 1 }
    }
}

impl FromStr for BorderStyle {
    type Err = StyleError;

    /// `"solid"`, `"double red"`, `"none"`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let kind = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("none") | None => BorderKind::None,
            Some("solid") => BorderKind::Solid,
            Some("double") => BorderKind::Double,
            Some("rounded") => BorderKind::Rounded,
            Some("thick") => BorderKind::Thick,
            Some(other) => {
                return Err(StyleError::BadValue {
                    property: "border".into(),
                    value: other.into(),
                });
            }
        };
        let color = match parts.next() {
            Some(c) => c.parse()?,
            None => Color::Default,
        };
        Ok(BorderStyle { kind, color })
    }
}

/// How an element lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Stack children vertically.
    #[default]
    Block,
    /// Lay children out along the flex direction, distributing slack by
    /// flex-grow weight.
    Flex,
    /// Block plus a marker gutter per item.
    List,
    /// The element and its subtree contribute nothing.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    #[inline]
    pub const fn is_row(&self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    #[inline]
    pub const fn is_reverse(&self) -> bool {
        matches!(
            self,
            FlexDirection::RowReverse | FlexDirection::ColumnReverse
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignH {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignV {
    #[default]
    Top,
    Center,
    Bottom,
}

/// What happens to content larger than its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Clip at the content rectangle.
    #[default]
    Hidden,
    /// Let content spill past the bottom/right edge.
    Visible,
}

fn parse_keyword<T>(s: &str, property: &str, table: &[(&str, T)]) -> Result<T, StyleError>
where
    T: Copy,
{
    let t = s.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == t)
        .map(|(_, v)| *v)
        .ok_or_else(|| StyleError::BadValue {
            property: property.into(),
            value: s.into(),
        })
}

// =============================================================================
// Property kinds and the name table
// =============================================================================

/// Identity of a style property. One instance of each kind per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    BackgroundColor,
    Border,
    Padding,
    Margin,
    Display,
    FlexDirection,
    FlexGrow,
    FlexWrap,
    Width,
    Height,
    MinWidth,
    MinHeight,
    AlignH,
    AlignV,
    Overflow,
    ListMarker,
    ZIndex,
}

/// Every kind with its registered kebab-case name.
pub const PROPERTY_NAMES: &[(&str, PropertyKind)] = &[
    ("color", PropertyKind::Color),
    ("background-color", PropertyKind::BackgroundColor),
    ("border", PropertyKind::Border),
    ("padding", PropertyKind::Padding),
    ("margin", PropertyKind::Margin),
    ("display", PropertyKind::Display),
    ("flex-direction", PropertyKind::FlexDirection),
    ("flex-grow", PropertyKind::FlexGrow),
    ("flex-wrap", PropertyKind::FlexWrap),
    ("width", PropertyKind::Width),
    ("height", PropertyKind::Height),
    ("min-width", PropertyKind::MinWidth),
    ("min-height", PropertyKind::MinHeight),
    ("align-items", PropertyKind::AlignH),
    ("align-vertical", PropertyKind::AlignV),
    ("overflow", PropertyKind::Overflow),
    ("list-marker", PropertyKind::ListMarker),
    ("z-index", PropertyKind::ZIndex),
];

impl PropertyKind {
    /// The registered kebab-case name of the kind.
    pub fn name(&self) -> &'static str {
        PROPERTY_NAMES
            .iter()
            .find(|(_, k)| k == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// Look a kind up by name, accepting the `-property` suffix form that
    /// document authors carry over from the property type names.
    pub fn from_name(name: &str) -> Result<PropertyKind, StyleError> {
        let t = name.trim().to_ascii_lowercase();
        let base = t.strip_suffix("-property").unwrap_or(&t);
        PROPERTY_NAMES
            .iter()
            .find(|(n, _)| *n == base)
            .map(|(_, k)| *k)
            .ok_or_else(|| StyleError::UnknownProperty(name.into()))
    }
}

// =============================================================================
// StyleProperty
// =============================================================================

/// A named, typed, immutable style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProperty {
    Color(Color),
    BackgroundColor(Color),
    Border(BorderStyle),
    Padding(Spacing),
    Margin(Spacing),
    Display(Display),
    FlexDirection(FlexDirection),
    FlexGrow(u16),
    FlexWrap(bool),
    Width(Dimension),
    Height(Dimension),
    MinWidth(Dimension),
    MinHeight(Dimension),
    AlignH(AlignH),
    AlignV(AlignV),
    Overflow(Overflow),
    ListMarker(String),
    ZIndex(i32),
}

impl StyleProperty {
    pub fn kind(&self) -> PropertyKind {
        match self {
            StyleProperty::Color(_) => PropertyKind::Color,
            StyleProperty::BackgroundColor(_) => PropertyKind::BackgroundColor,
            StyleProperty::Border(_) => PropertyKind::Border,
            StyleProperty::Padding(_) => PropertyKind::Padding,
            StyleProperty::Margin(_) => PropertyKind::Margin,
            StyleProperty::Display(_) => PropertyKind::Display,
            StyleProperty::FlexDirection(_) => PropertyKind::FlexDirection,
            StyleProperty::FlexGrow(_) => PropertyKind::FlexGrow,
            StyleProperty::FlexWrap(_) => PropertyKind::FlexWrap,
            StyleProperty::Width(_) => PropertyKind::Width,
            StyleProperty::Height(_) => PropertyKind::Height,
            StyleProperty::MinWidth(_) => PropertyKind::MinWidth,
            StyleProperty::MinHeight(_) => PropertyKind::MinHeight,
            StyleProperty::AlignH(_) => PropertyKind::AlignH,
            StyleProperty::AlignV(_) => PropertyKind::AlignV,
            StyleProperty::Overflow(_) => PropertyKind::Overflow,
            StyleProperty::ListMarker(_) => PropertyKind::ListMarker,
            StyleProperty::ZIndex(_) => PropertyKind::ZIndex,
        }
    }

    /// The static default value of a kind. Lookups fall back to this, so
    /// consumers never see an unset property.
    pub fn default_for(kind: PropertyKind) -> StyleProperty {
        match kind {
            PropertyKind::Color => StyleProperty::Color(Color::Default),
            PropertyKind::BackgroundColor => StyleProperty::BackgroundColor(Color::Default),
            PropertyKind::Border => StyleProperty::Border(BorderStyle::NONE),
            PropertyKind::Padding => StyleProperty::Padding(Spacing::ZERO),
            PropertyKind::Margin => StyleProperty::Margin(Spacing::ZERO),
            PropertyKind::Display => StyleProperty::Display(Display::Block),
            PropertyKind::FlexDirection => StyleProperty::FlexDirection(FlexDirection::Row),
            PropertyKind::FlexGrow => StyleProperty::FlexGrow(1),
            PropertyKind::FlexWrap => StyleProperty::FlexWrap(false),
            PropertyKind::Width => StyleProperty::Width(Dimension::Auto),
            PropertyKind::Height => StyleProperty::Height(Dimension::Auto),
            PropertyKind::MinWidth => StyleProperty::MinWidth(Dimension::ZERO),
            PropertyKind::MinHeight => StyleProperty::MinHeight(Dimension::ZERO),
            PropertyKind::AlignH => StyleProperty::AlignH(AlignH::Left),
            PropertyKind::AlignV => StyleProperty::AlignV(AlignV::Top),
            PropertyKind::Overflow => StyleProperty::Overflow(Overflow::Hidden),
            PropertyKind::ListMarker => StyleProperty::ListMarker("*".into()),
            PropertyKind::ZIndex => StyleProperty::ZIndex(0),
        }
    }

    /// Parse a property value string (XML attribute / stylesheet entry) for
    /// the given kind.
    pub fn parse(kind: PropertyKind, value: &str) -> Result<StyleProperty, StyleError> {
        let bad = || StyleError::BadValue {
            property: kind.name().into(),
            value: value.into(),
        };
        Ok(match kind {
            PropertyKind::Color => StyleProperty::Color(value.parse()?),
            PropertyKind::BackgroundColor => StyleProperty::BackgroundColor(value.parse()?),
            PropertyKind::Border => StyleProperty::Border(value.parse()?),
            PropertyKind::Padding => StyleProperty::Padding(value.parse()?),
            PropertyKind::Margin => StyleProperty::Margin(value.parse()?),
            PropertyKind::Display => StyleProperty::Display(parse_keyword(
                value,
                "display",
                &[
                    ("block", Display::Block),
                    ("flex", Display::Flex),
                    ("list", Display::List),
                    ("none", Display::None),
                ],
            )?),
            PropertyKind::FlexDirection => StyleProperty::FlexDirection(parse_keyword(
                value,
                "flex-direction",
                &[
                    ("row", FlexDirection::Row),
                    ("row-reverse", FlexDirection::RowReverse),
                    ("column", FlexDirection::Column),
                    ("column-reverse", FlexDirection::ColumnReverse),
                ],
            )?),
            PropertyKind::FlexGrow => StyleProperty::FlexGrow(value.trim().parse().map_err(|_| bad())?),
            PropertyKind::FlexWrap => StyleProperty::FlexWrap(parse_keyword(
                value,
                "flex-wrap",
                &[("true", true), ("wrap", true), ("false", false), ("nowrap", false)],
            )?),
            PropertyKind::Width => StyleProperty::Width(value.parse()?),
            PropertyKind::Height => StyleProperty::Height(value.parse()?),
            PropertyKind::MinWidth => StyleProperty::MinWidth(value.parse()?),
            PropertyKind::MinHeight => StyleProperty::MinHeight(value.parse()?),
            PropertyKind::AlignH => StyleProperty::AlignH(parse_keyword(
                value,
                "align-items",
                &[
                    ("left", AlignH::Left),
                    ("center", AlignH::Center),
                    ("right", AlignH::Right),
                ],
            )?),
            PropertyKind::AlignV => StyleProperty::AlignV(parse_keyword(
                value,
                "align-vertical",
                &[
                    ("top", AlignV::Top),
                    ("center", AlignV::Center),
                    ("bottom", AlignV::Bottom),
                ],
            )?),
            PropertyKind::Overflow => StyleProperty::Overflow(parse_keyword(
                value,
                "overflow",
                &[("hidden", Overflow::Hidden), ("visible", Overflow::Visible)],
            )?),
            PropertyKind::ListMarker => StyleProperty::ListMarker(value.to_string()),
            PropertyKind::ZIndex => StyleProperty::ZIndex(value.trim().parse().map_err(|_| bad())?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_table_round_trips() {
        for (name, kind) in PROPERTY_NAMES {
            assert_eq!(PropertyKind::from_name(name).unwrap(), *kind);
            assert_eq!(kind.name(), *name);
        }
    }

    #[test]
    fn property_suffix_fallback() {
        assert_eq!(
            PropertyKind::from_name("padding-property").unwrap(),
            PropertyKind::Padding
        );
        assert!(matches!(
            PropertyKind::from_name("outline"),
            Err(StyleError::UnknownProperty(_))
        ));
    }

    #[test]
    fn spacing_shorthand_forms() {
        assert_eq!(
            "2".parse::<Spacing>().unwrap(),
            Spacing::uniform(Dimension::Chars(2))
        );
        assert_eq!(
            "2 10%".parse::<Spacing>().unwrap(),
            Spacing::symmetric(Dimension::Chars(2), Dimension::Percent(10))
        );
        let four = "1 2 3 4".parse::<Spacing>().unwrap();
        assert_eq!(four.bottom, Dimension::Chars(4));
        assert!("1 2 3".parse::<Spacing>().is_err());
    }

    #[test]
    fn parse_typed_values() {
        assert_eq!(
            StyleProperty::parse(PropertyKind::Display, "flex").unwrap(),
            StyleProperty::Display(Display::Flex)
        );
        assert_eq!(
            StyleProperty::parse(PropertyKind::Border, "double red").unwrap(),
            StyleProperty::Border(BorderStyle {
                kind: BorderKind::Double,
                color: Color::RED
            })
        );
        assert!(StyleProperty::parse(PropertyKind::ZIndex, "soon").is_err());
    }

    #[test]
    fn border_thickness() {
        assert_eq!(BorderStyle::NONE.thickness(), 0);
        assert_eq!(BorderStyle::solid(Color::Default).thickness(), 1);
        assert!(BorderKind::None.chars().is_none());
        assert_eq!(BorderKind::Rounded.chars().unwrap().top_left, '╭');
    }
}
