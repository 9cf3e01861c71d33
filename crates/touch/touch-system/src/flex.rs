//! Flexbox layout engine for a single container.
//!
//! This module implements the subset of CSS Flexbox
//! (https://www.w3.org/TR/css-flexbox-1/) that touch screens need: one line,
//! no wrapping, per-child margins and grow/shrink factors.
//!
//! # Layout Algorithm
//!
//! 1. **Outer sizes**: each child's measured box plus its margins on the main axis
//! 2. **Distribute remaining space**: apply flex-grow or flex-shrink
//! 3. **Apply justification**: position children along main axis (justify-content)
//! 4. **Apply alignment**: position children along cross axis (align-items)
//! 5. **Apply margins**: offset each box by its leading margins
//!
//! Positions are relative to the container's content box (padding already removed).
//!
//! # Examples
//!
//! ```
//! use touch_system::flex::{FlexChild, FlexLayout};
//! use touch_system::style::*;
//! use embedded_graphics::geometry::Size;
//!
//! let style = Style::new()
//!     .flex_direction(FlexDirection::Row)
//!     .justify_content(Justify::SpaceBetween);
//!
//! let children = [
//!     FlexChild::fixed(Size::new(50, 50)),
//!     FlexChild::fixed(Size::new(50, 50)),
//! ];
//!
//! let outcome = FlexLayout::new(style).layout(Size::new(200, 100), &children);
//! assert_eq!(outcome.placements[1].position.x, 150);
//! ```

use crate::style::{Align, Edges, FlexDirection, Justify, Style};
use embedded_graphics::prelude::*;

/// A child taking part in a flex layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexChild {
    /// Measured box size, margins excluded.
    pub size: Size,
    /// Outer spacing.
    pub margin: Edges,
    /// Share of leftover main-axis space.
    pub grow: f32,
    /// Share of main-axis overflow absorbed.
    pub shrink: f32,
    /// Fill the cross axis when the container aligns with [`Align::Stretch`].
    pub stretch_cross: bool,
}

impl FlexChild {
    /// A child of fixed size with no margins that neither grows nor shrinks.
    pub const fn fixed(size: Size) -> Self {
        Self {
            size,
            margin: Edges::ZERO,
            grow: 0.0,
            shrink: 0.0,
            stretch_cross: false,
        }
    }

    /// Builds a flex child from a measured size and the child's own style.
    pub fn from_style(size: Size, style: &Style) -> Self {
        Self {
            size,
            margin: style.margin,
            grow: style.flex_grow,
            shrink: style.flex_shrink,
            stretch_cross: false,
        }
    }
}

/// Final box of one child, relative to the container's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexPlacement {
    /// Top-left corner of the child's box (after margins).
    pub position: Point,
    /// Size of the child's box.
    pub size: Size,
}

/// Result of laying out every child of one container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlexOutcome {
    /// One placement per child, in child order.
    pub placements: Vec<FlexPlacement>,
    /// Total main-axis extent used by children, gaps and margins.
    pub content_main: u32,
    /// Largest cross-axis extent of a child including margins.
    pub content_cross: u32,
}

/// Flexbox layout engine
///
/// Positions and sizes the children of one container according to the
/// container's flow, justification, alignment and gap.
#[derive(Debug, Clone)]
pub struct FlexLayout {
    style: Style,
}

/// Internal representation of a flex item during layout computation
#[derive(Debug, Clone, Copy)]
struct FlexItem {
    main_size: u32,
    cross_size: u32,
    margin_main_start: u32,
    margin_main: u32,
    margin_cross_start: u32,
    margin_cross: u32,
    grow: f32,
    shrink: f32,
}

impl FlexItem {
    fn outer_main(&self) -> u32 {
        self.main_size.saturating_add(self.margin_main)
    }

    fn outer_cross(&self) -> u32 {
        self.cross_size.saturating_add(self.margin_cross)
    }
}

impl FlexLayout {
    /// Creates a new flexbox layout with the given container style
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Computes placements for `children` inside a content box of size `container`.
    pub fn layout(&self, container: Size, children: &[FlexChild]) -> FlexOutcome {
        if children.is_empty() {
            return FlexOutcome::default();
        }

        let direction = self.style.flex_direction;
        let (available_main, available_cross) = split(direction, container);

        let mut items: Vec<FlexItem> = children
            .iter()
            .map(|child| self.create_flex_item(child, available_cross))
            .collect();

        let gap_space = self
            .style
            .gap
            .saturating_mul(u32::try_from(children.len().saturating_sub(1)).unwrap_or(u32::MAX));

        let used = total_outer_main(&items).saturating_add(gap_space);
        let remaining = i64::from(available_main) - i64::from(used);
        apply_flex_sizing(&mut items, remaining);

        let content_main = total_outer_main(&items).saturating_add(gap_space);
        let content_cross = items.iter().map(FlexItem::outer_cross).max().unwrap_or(0);

        let positions_main = self.calculate_main_axis_positions(&items, available_main, content_main);

        let placements = items
            .iter()
            .zip(positions_main)
            .map(|(item, main_pos)| {
                let cross_pos = self.cross_axis_position(item, available_cross);
                let main = main_pos.saturating_add(item.margin_main_start);
                let cross = cross_pos.saturating_add(item.margin_cross_start);
                let (x, y) = join(direction, main, cross);
                let (width, height) = join(direction, item.main_size, item.cross_size);
                FlexPlacement {
                    position: Point::new(to_coord(x), to_coord(y)),
                    size: Size::new(width, height),
                }
            })
            .collect();

        FlexOutcome {
            placements,
            content_main,
            content_cross,
        }
    }

    /// Creates a flex item from a child
    fn create_flex_item(&self, child: &FlexChild, available_cross: u32) -> FlexItem {
        let direction = self.style.flex_direction;
        let (main_size, mut cross_size) = split(direction, child.size);
        let (margin_main_start, margin_main_end, margin_cross_start, margin_cross_end) =
            match direction {
                FlexDirection::Row => (
                    child.margin.left,
                    child.margin.right,
                    child.margin.top,
                    child.margin.bottom,
                ),
                FlexDirection::Column => (
                    child.margin.top,
                    child.margin.bottom,
                    child.margin.left,
                    child.margin.right,
                ),
            };
        let margin_cross = margin_cross_start.saturating_add(margin_cross_end);

        if self.style.align_items == Align::Stretch && child.stretch_cross {
            cross_size = available_cross.saturating_sub(margin_cross);
        }

        FlexItem {
            main_size,
            cross_size,
            margin_main_start,
            margin_main: margin_main_start.saturating_add(margin_main_end),
            margin_cross_start,
            margin_cross,
            grow: child.grow.max(0.0),
            shrink: child.shrink.max(0.0),
        }
    }

    /// Calculates outer start positions along the main axis based on justify-content
    #[allow(clippy::cast_possible_truncation)]
    fn calculate_main_axis_positions(
        &self,
        items: &[FlexItem],
        container_size: u32,
        used: u32,
    ) -> Vec<u32> {
        let remaining = container_size.saturating_sub(used);
        let count = items.len() as u32;
        let gap = self.style.gap;

        let (start, spacing) = match self.style.justify_content {
            Justify::Start => (0, gap),
            Justify::End => (remaining, gap),
            Justify::Center => (remaining / 2, gap),
            Justify::SpaceBetween => {
                if count <= 1 {
                    (0, gap)
                } else {
                    (0, gap.saturating_add(remaining / (count - 1)))
                }
            }
            Justify::SpaceAround => {
                let share = remaining / count;
                (share / 2, gap.saturating_add(share))
            }
            Justify::SpaceEvenly => {
                let share = remaining / (count + 1);
                (share, gap.saturating_add(share))
            }
        };

        let mut positions = Vec::with_capacity(items.len());
        let mut pos = start;
        for item in items {
            positions.push(pos);
            pos = pos.saturating_add(item.outer_main()).saturating_add(spacing);
        }
        positions
    }

    /// Calculates the outer start position along the cross axis based on align-items
    fn cross_axis_position(&self, item: &FlexItem, container_size: u32) -> u32 {
        match self.style.align_items {
            Align::Start | Align::Stretch => 0,
            Align::End => container_size.saturating_sub(item.outer_cross()),
            Align::Center => container_size.saturating_sub(item.outer_cross()) / 2,
        }
    }
}

/// Applies flex-grow or flex-shrink to distribute remaining space
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn apply_flex_sizing(items: &mut [FlexItem], remaining_space: i64) {
    if remaining_space > 0 {
        let total_grow: f32 = items.iter().map(|item| item.grow).sum();
        if total_grow <= 0.0 {
            return;
        }

        let extra = remaining_space as u32;
        let mut handed_out = 0u32;
        let last_grower = items.iter().rposition(|item| item.grow > 0.0);
        for (index, item) in items.iter_mut().enumerate() {
            if item.grow <= 0.0 {
                continue;
            }
            // The last growing item absorbs the rounding remainder so the
            // container is filled exactly.
            let share = if Some(index) == last_grower {
                extra.saturating_sub(handed_out)
            } else {
                (extra as f32 * item.grow / total_grow) as u32
            };
            handed_out = handed_out.saturating_add(share);
            item.main_size = item.main_size.saturating_add(share);
        }
    } else if remaining_space < 0 {
        let total_shrink: f32 = items.iter().map(|item| item.shrink).sum();
        if total_shrink <= 0.0 {
            return;
        }

        let deficit = remaining_space.unsigned_abs() as f32;
        for item in items.iter_mut() {
            if item.shrink > 0.0 {
                let share = (deficit * item.shrink / total_shrink).ceil() as u32;
                item.main_size = item.main_size.saturating_sub(share);
            }
        }
    }
}

fn total_outer_main(items: &[FlexItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |acc, item| acc.saturating_add(item.outer_main()))
}

/// Splits a size into (main, cross) for the given direction.
fn split(direction: FlexDirection, size: Size) -> (u32, u32) {
    match direction {
        FlexDirection::Row => (size.width, size.height),
        FlexDirection::Column => (size.height, size.width),
    }
}

/// Joins (main, cross) back into (x-axis, y-axis).
fn join(direction: FlexDirection, main: u32, cross: u32) -> (u32, u32) {
    match direction {
        FlexDirection::Row => (main, cross),
        FlexDirection::Column => (cross, main),
    }
}

fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Dimension;

    fn row(justify: Justify) -> Style {
        Style::new()
            .flex_direction(FlexDirection::Row)
            .justify_content(justify)
    }

    fn child(width: u32, height: u32) -> FlexChild {
        FlexChild::fixed(Size::new(width, height))
    }

    fn xs(outcome: &FlexOutcome) -> Vec<i32> {
        outcome.placements.iter().map(|p| p.position.x).collect()
    }

    #[test]
    fn test_flex_row_start() {
        let layout = FlexLayout::new(row(Justify::Start));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50), child(50, 50)]);
        assert_eq!(xs(&result), vec![0, 50, 100]);
        assert_eq!(result.content_main, 150);
    }

    #[test]
    fn test_flex_row_end() {
        let layout = FlexLayout::new(row(Justify::End));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50)]);
        // 300 - 100 (total width) = 200 remaining, start at 200
        assert_eq!(xs(&result), vec![200, 250]);
    }

    #[test]
    fn test_flex_row_center() {
        let layout = FlexLayout::new(row(Justify::Center));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50)]);
        assert_eq!(xs(&result), vec![100, 150]);
    }

    #[test]
    fn test_flex_row_space_between() {
        let layout = FlexLayout::new(row(Justify::SpaceBetween));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50), child(50, 50)]);
        // Total width: 150, remaining: 150, gap between 3 items = 75
        assert_eq!(xs(&result), vec![0, 125, 250]);
    }

    #[test]
    fn test_flex_row_space_between_single_child_starts_at_zero() {
        let layout = FlexLayout::new(row(Justify::SpaceBetween));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50)]);
        assert_eq!(xs(&result), vec![0]);
    }

    #[test]
    fn test_flex_row_space_around() {
        let layout = FlexLayout::new(row(Justify::SpaceAround));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50)]);
        // Remaining: 200, gap per item: 100, half-gap at start: 50
        assert_eq!(xs(&result), vec![50, 200]);
    }

    #[test]
    fn test_flex_row_space_evenly() {
        let layout = FlexLayout::new(row(Justify::SpaceEvenly));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50)]);
        // Remaining: 200, 3 gaps of 66
        assert_eq!(xs(&result), vec![66, 182]);
    }

    #[test]
    fn test_flex_column_start_with_margins() {
        let style = Style::new().flex_direction(FlexDirection::Column);
        let mut second = child(50, 30);
        second.margin = Edges::vertical_only(10);

        let result = FlexLayout::new(style).layout(Size::new(100, 300), &[child(50, 30), second, child(50, 30)]);

        let ys: Vec<i32> = result.placements.iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![0, 40, 80]);
        assert_eq!(result.content_main, 110);
    }

    #[test]
    fn test_flex_with_gap() {
        let layout = FlexLayout::new(row(Justify::Start).gap(10));
        let result = layout.layout(Size::new(300, 100), &[child(50, 50), child(50, 50), child(50, 50)]);
        assert_eq!(xs(&result), vec![0, 60, 120]);
    }

    #[test]
    fn test_align_items_center() {
        let layout = FlexLayout::new(row(Justify::Start).align_items(Align::Center));
        let result = layout.layout(Size::new(300, 100), &[child(50, 30), child(50, 50)]);
        assert_eq!(result.placements[0].position.y, 35);
        assert_eq!(result.placements[1].position.y, 25);
    }

    #[test]
    fn test_align_items_center_respects_cross_margins() {
        let layout = FlexLayout::new(row(Justify::Start).align_items(Align::Center));
        let mut icon = child(64, 64);
        icon.margin = Edges::all(16);

        let result = layout.layout(Size::new(384, 96), &[icon]);
        assert_eq!(result.placements[0].position, Point::new(16, 16));
        assert_eq!(result.content_cross, 96);
    }

    #[test]
    fn test_align_items_end() {
        let layout = FlexLayout::new(row(Justify::Start).align_items(Align::End));
        let result = layout.layout(Size::new(300, 100), &[child(50, 30), child(50, 40)]);
        assert_eq!(result.placements[0].position.y, 70);
        assert_eq!(result.placements[1].position.y, 60);
    }

    #[test]
    fn test_align_stretch_only_applies_to_stretchable_children() {
        let layout = FlexLayout::new(row(Justify::Start).align_items(Align::Stretch));
        let mut stretchy = child(50, 10);
        stretchy.stretch_cross = true;

        let result = layout.layout(Size::new(300, 100), &[stretchy, child(50, 10)]);
        assert_eq!(result.placements[0].size.height, 100);
        assert_eq!(result.placements[1].size.height, 10);
    }

    #[test]
    fn test_flex_grow_fills_leftover_space() {
        let layout = FlexLayout::new(row(Justify::SpaceBetween).align_items(Align::Center));
        let mut label = child(40, 20);
        label.grow = 1.0;
        label.margin = Edges::left_only(20);

        let result = layout.layout(Size::new(384, 96), &[child(96, 96), label, child(72, 32)]);

        // 384 - 96 - 72 - 20 margin = 196 for the label
        assert_eq!(result.placements[1].size.width, 196);
        assert_eq!(result.placements[1].position.x, 116);
        assert_eq!(result.placements[2].position.x, 312);
        assert_eq!(result.content_main, 384);
    }

    #[test]
    fn test_flex_grow_distributes_by_ratio_and_fills_exactly() {
        let layout = FlexLayout::new(row(Justify::Start));
        let mut a = child(0, 10);
        a.grow = 1.0;
        let mut b = child(0, 10);
        b.grow = 2.0;

        let result = layout.layout(Size::new(100, 10), &[a, b]);
        assert_eq!(result.placements[0].size.width, 33);
        assert_eq!(result.placements[1].size.width, 67);
    }

    #[test]
    fn test_flex_shrink_only_affects_shrinkable_children() {
        let layout = FlexLayout::new(row(Justify::Start));
        let mut label = child(300, 20);
        label.shrink = 1.0;

        let result = layout.layout(Size::new(200, 20), &[child(50, 20), label, child(50, 20)]);
        assert_eq!(result.placements[0].size.width, 50);
        assert_eq!(result.placements[1].size.width, 100);
        assert_eq!(result.placements[2].size.width, 50);
    }

    #[test]
    fn test_overflowing_column_keeps_sequential_positions() {
        let style = Style::new().flex_direction(FlexDirection::Column);
        let children = vec![child(10, 200); 4];
        let result = FlexLayout::new(style).layout(Size::new(10, 480), &children);

        let ys: Vec<i32> = result.placements.iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![0, 200, 400, 600]);
        assert_eq!(result.content_main, 800);
    }

    #[test]
    fn test_empty_children() {
        let result = FlexLayout::new(Style::new()).layout(Size::new(100, 100), &[]);
        assert!(result.placements.is_empty());
        assert_eq!(result.content_main, 0);
    }

    #[test]
    fn test_from_style_copies_margin_and_factors() {
        let style = Style::new()
            .width(Dimension::Px(10))
            .margin(Edges::all(3))
            .flex_grow(1.0)
            .flex_shrink(0.0);
        let flex_child = FlexChild::from_style(Size::new(10, 10), &style);
        assert_eq!(flex_child.margin, Edges::all(3));
        assert_eq!(flex_child.grow, 1.0);
        assert_eq!(flex_child.shrink, 0.0);
    }
}
