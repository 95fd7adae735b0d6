//! The box-model layout engine.
//!
//! Rectangles resolve outside-in: margin is subtracted from the available
//! rectangle to give the border box, the border (if any) eats one cell per
//! side, and padding — percent padding resolves against the post-border
//! content box — gives the content rectangle. Element measurement is the
//! bottom-up half of the algorithm and lives with the elements; this module
//! owns the numeric parts: rectangle resolution, slack alignment, and
//! flex-grow distribution.
//!
//! Sizing never errors. Content larger than its box is clamped or spills
//! per the overflow policy. The only failure here is exceeding the nesting
//! bound, which is reported as a typed error instead of a stack overflow.

mod context;

pub use context::{LayoutContext, DEFAULT_MAX_NESTING};

use crate::geometry::Rectangle;
use crate::style::{AlignH, AlignV, Axis, BorderStyle, Dimension, Spacing};

/// The border box: the available rectangle with margin subtracted.
///
/// Percent margins resolve against the available rectangle's own axis
/// length, integer floor.
pub fn border_rect(rect: Rectangle, margin: &Spacing) -> Rectangle {
    let w = rect.width();
    let h = rect.height();
    Rectangle::new(
        rect.lower_x() + margin.left.resolve_spacing(w, Axis::Horizontal),
        rect.lower_y() + margin.top.resolve_spacing(h, Axis::Vertical),
        rect.higher_x() - margin.right.resolve_spacing(w, Axis::Horizontal),
        rect.higher_y() - margin.bottom.resolve_spacing(h, Axis::Vertical),
    )
}

/// The content rectangle: margin, then border thickness, then padding.
///
/// Percent padding is relative to the content box (the rectangle after
/// margin and border), not the outer box.
pub fn content_rect(
    rect: Rectangle,
    margin: &Spacing,
    padding: &Spacing,
    border: &BorderStyle,
) -> Rectangle {
    let br = border_rect(rect, margin);
    let t = border.thickness();
    let inner = Rectangle::new(
        br.lower_x() + t,
        br.lower_y() + t,
        br.higher_x() - t,
        br.higher_y() - t,
    );

    let w = inner.width();
    let h = inner.height();
    Rectangle::new(
        inner.lower_x() + padding.left.resolve_spacing(w, Axis::Horizontal),
        inner.lower_y() + padding.top.resolve_spacing(h, Axis::Vertical),
        inner.higher_x() - padding.right.resolve_spacing(w, Axis::Horizontal),
        inner.higher_y() - padding.bottom.resolve_spacing(h, Axis::Vertical),
    )
}

/// Columns the margin/border/padding chrome adds around content,
/// resolved against `reference`.
pub fn horizontal_chrome(
    margin: &Spacing,
    padding: &Spacing,
    border: &BorderStyle,
    reference: i32,
) -> i32 {
    margin.horizontal_total(reference) + padding.horizontal_total(reference) + 2 * border.thickness()
}

/// Rows the margin/border/padding chrome adds around content,
/// resolved against `reference`.
pub fn vertical_chrome(
    margin: &Spacing,
    padding: &Spacing,
    border: &BorderStyle,
    reference: i32,
) -> i32 {
    margin.vertical_total(reference) + padding.vertical_total(reference) + 2 * border.thickness()
}

/// Horizontal offset of content inside its box.
///
/// Operates on the unused slack; negative slack (content wider than the
/// box) clamps to zero so content overflows right, never left.
pub fn align_offset_h(align: AlignH, box_width: i32, content_width: i32) -> i32 {
    let slack = (box_width - content_width).max(0);
    match align {
        AlignH::Left => 0,
        AlignH::Center => slack / 2,
        AlignH::Right => slack,
    }
}

/// Vertical counterpart of [`align_offset_h`]: overflow goes past the
/// bottom, never the top.
pub fn align_offset_v(align: AlignV, box_height: i32, content_height: i32) -> i32 {
    let slack = (box_height - content_height).max(0);
    match align {
        AlignV::Top => 0,
        AlignV::Center => slack / 2,
        AlignV::Bottom => slack,
    }
}

/// Resolve a width/height style dimension to a concrete size.
///
/// Scalar dimensions resolve against the reference; the intrinsic keywords
/// pick from the supplied content measurements.
pub fn resolve_size(
    dimension: Dimension,
    reference: i32,
    auto: i32,
    min_content: i32,
    max_content: i32,
    axis: Axis,
) -> i32 {
    match dimension {
        Dimension::Auto => auto,
        Dimension::MinContent => min_content,
        Dimension::MaxContent => max_content,
        scalar => scalar.resolve(reference, axis).unwrap_or(auto),
    }
}

/// Clamp a computed size to a minimum constraint. The minimum always wins,
/// even over a smaller computed size.
pub fn clamp_min(value: i32, min: Dimension, reference: i32, axis: Axis) -> i32 {
    match min.resolve(reference, axis) {
        Ok(m) if m > 0 => value.max(m),
        _ => value,
    }
}

/// Distribute `total` cells among flex children.
///
/// Every child is floored at its minimum size; the remaining slack is
/// distributed by flex-grow weight (integer share, leftover cells go to the
/// earliest growing children one by one). With zero total weight the
/// minimums are returned as-is.
pub fn distribute_flex(total: i32, minimums: &[i32], weights: &[u16]) -> Vec<i32> {
    debug_assert_eq!(minimums.len(), weights.len());
    let mut sizes: Vec<i32> = minimums.to_vec();

    let used: i32 = sizes.iter().sum();
    let slack = total - used;
    if slack <= 0 {
        return sizes;
    }

    let weight_sum: i32 = weights.iter().map(|&w| w as i32).sum();
    if weight_sum == 0 {
        return sizes;
    }

    let mut distributed = 0;
    for (size, &weight) in sizes.iter_mut().zip(weights) {
        let share = slack * weight as i32 / weight_sum;
        *size += share;
        distributed += share;
    }

    // Integer-division leftovers land on the earliest growing children.
    let mut leftover = slack - distributed;
    for (size, &weight) in sizes.iter_mut().zip(weights) {
        if leftover == 0 {
            break;
        }
        if weight > 0 {
            *size += 1;
            leftover -= 1;
        }
    }

    sizes
}
