//! Style blocks and cascade resolution.
//!
//! A [`StyleBlock`] is an unordered set of properties keyed by kind — at most
//! one instance of each. [`StyleBlock::override_with`] merges another block
//! property-by-property with the later block winning, which makes cascade
//! resolution a plain left-to-right fold. Reads fall back to the kind's
//! static default, so resolved values are never "unset".

use std::collections::HashMap;

use crate::style::color::Color;
use crate::style::dimension::Dimension;
use crate::style::properties::{
    AlignH, AlignV, BorderStyle, Display, FlexDirection, Overflow, PropertyKind, Spacing,
    StyleProperty,
};

/// An unordered set of style properties, one per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBlock {
    props: HashMap<PropertyKind, StyleProperty>,
}

impl StyleBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from a list of properties. Later duplicates replace
    /// earlier ones.
    pub fn from_props(props: impl IntoIterator<Item = StyleProperty>) -> Self {
        let mut block = Self::new();
        for p in props {
            block.set(p);
        }
        block
    }

    /// Insert or replace the property of its kind.
    pub fn set(&mut self, prop: StyleProperty) {
        self.props.insert(prop.kind(), prop);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, prop: StyleProperty) -> Self {
        self.set(prop);
        self
    }

    /// The stored property of `kind`, or its static default.
    pub fn get(&self, kind: PropertyKind) -> StyleProperty {
        self.props
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| StyleProperty::default_for(kind))
    }

    /// Whether the block explicitly sets `kind`.
    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.props.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.props.values()
    }

    /// Merge `other` into this block, property by property; `other` wins on
    /// conflicts. Unset properties in `other` leave this block untouched.
    pub fn override_with(&mut self, other: &StyleBlock) {
        for prop in other.props.values() {
            self.set(prop.clone());
        }
    }

    /// Resolve an ordered cascade of blocks into one effective block.
    pub fn resolve(cascade: &[&StyleBlock]) -> StyleBlock {
        let mut effective = StyleBlock::new();
        for block in cascade {
            effective.override_with(block);
        }
        effective
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn color(&self) -> Color {
        match self.get(PropertyKind::Color) {
            StyleProperty::Color(c) => c,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn background_color(&self) -> Color {
        match self.get(PropertyKind::BackgroundColor) {
            StyleProperty::BackgroundColor(c) => c,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn border(&self) -> BorderStyle {
        match self.get(PropertyKind::Border) {
            StyleProperty::Border(b) => b,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn padding(&self) -> Spacing {
        match self.get(PropertyKind::Padding) {
            StyleProperty::Padding(s) => s,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn margin(&self) -> Spacing {
        match self.get(PropertyKind::Margin) {
            StyleProperty::Margin(s) => s,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn display(&self) -> Display {
        match self.get(PropertyKind::Display) {
            StyleProperty::Display(d) => d,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn flex_direction(&self) -> FlexDirection {
        match self.get(PropertyKind::FlexDirection) {
            StyleProperty::FlexDirection(d) => d,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn flex_grow(&self) -> u16 {
        match self.get(PropertyKind::FlexGrow) {
            StyleProperty::FlexGrow(g) => g,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn flex_wrap(&self) -> bool {
        match self.get(PropertyKind::FlexWrap) {
            StyleProperty::FlexWrap(w) => w,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn width(&self) -> Dimension {
        match self.get(PropertyKind::Width) {
            StyleProperty::Width(d) => d,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn height(&self) -> Dimension {
        match self.get(PropertyKind::Height) {
            StyleProperty::Height(d) => d,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn min_width(&self) -> Dimension {
        match self.get(PropertyKind::MinWidth) {
            StyleProperty::MinWidth(d) => d,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn min_height(&self) -> Dimension {
        match self.get(PropertyKind::MinHeight) {
            StyleProperty::MinHeight(d) => d,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn align_h(&self) -> AlignH {
        match self.get(PropertyKind::AlignH) {
            StyleProperty::AlignH(a) => a,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn align_v(&self) -> AlignV {
        match self.get(PropertyKind::AlignV) {
            StyleProperty::AlignV(a) => a,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn overflow(&self) -> Overflow {
        match self.get(PropertyKind::Overflow) {
            StyleProperty::Overflow(o) => o,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn list_marker(&self) -> String {
        match self.get(PropertyKind::ListMarker) {
            StyleProperty::ListMarker(m) => m,
            _ => unreachable!("kind-keyed storage"),
        }
    }

    pub fn z_index(&self) -> i32 {
        match self.get(PropertyKind::ZIndex) {
            StyleProperty::ZIndex(z) => z,
            _ => unreachable!("kind-keyed storage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_block_wins_property_by_property() {
        let base = StyleBlock::from_props([StyleProperty::Color(Color::RED)]);
        let over = StyleBlock::from_props([StyleProperty::BackgroundColor(Color::BLUE)]);

        let resolved = StyleBlock::resolve(&[&base, &over]);
        assert_eq!(resolved.color(), Color::RED);
        assert_eq!(resolved.background_color(), Color::BLUE);
    }

    #[test]
    fn conflicting_property_takes_the_later_value() {
        let a = StyleBlock::from_props([StyleProperty::Color(Color::RED)]);
        let b = StyleBlock::from_props([StyleProperty::Color(Color::GREEN)]);
        assert_eq!(StyleBlock::resolve(&[&a, &b]).color(), Color::GREEN);
        assert_eq!(StyleBlock::resolve(&[&b, &a]).color(), Color::RED);
    }

    #[test]
    fn unset_properties_fall_back_to_defaults() {
        let block = StyleBlock::new();
        assert_eq!(block.color(), Color::Default);
        assert_eq!(block.display(), Display::Block);
        assert_eq!(block.width(), Dimension::Auto);
        assert_eq!(block.flex_grow(), 1);
        assert_eq!(block.list_marker(), "*");
    }

    #[test]
    fn set_replaces_never_duplicates() {
        let mut block = StyleBlock::new();
        block.set(StyleProperty::ZIndex(1));
        block.set(StyleProperty::ZIndex(5));
        assert_eq!(block.z_index(), 5);
        assert_eq!(block.iter().count(), 1);
    }
}
