//! Row Builder: icon, title and forward chevron in one navigable row.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ (icon)  Title ........................   >   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Only the title label grows or shrinks. The icon and chevron keep their
//! fixed sizes, so every row has the same geometry whatever its title.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use touch_system::asset::{BuiltinImage, ImageSource};
use touch_system::style::{
    Align, Border, BorderOrder, Dimension, Edges, FlexDirection, FontSize, Justify, Opacity, Radius, Style,
};
use touch_system::tree::{NodeId, NodeKind, NodeTree, TreeError};

/// Trailing chevron image, the same for every row.
pub const FORWARD_ICON: ImageSource = ImageSource::Builtin(BuiltinImage::Forward);

/// Icon edge length in pixels.
pub const ICON_SIZE: u32 = 64;

/// Chevron edge length in pixels.
pub const CHEVRON_SIZE: u32 = 32;

/// Row width as a percentage of the parent's content width.
pub const ROW_WIDTH_PERCENT: f32 = 80.0;

/// Row background.
pub const ROW_BACKGROUND: Rgb888 = Rgb888::new(0x66, 0x66, 0x66);

/// Icon ring color.
pub const ICON_BORDER: Rgb888 = Rgb888::new(0xaa, 0xaa, 0xaa);

/// Styles of the row container and its three children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    /// Row container.
    pub row: Style,
    /// Leading icon.
    pub icon: Style,
    /// Title label.
    pub label: Style,
    /// Trailing chevron.
    pub chevron: Style,
}

const LABEL: Style = Style::new()
    .font(FontSize::Medium)
    .text_color(Rgb888::WHITE)
    .margin(Edges::left_only(20))
    .flex_grow(1.0)
    .flex_shrink(1.0);

const CHEVRON: Style = Style::new()
    .size(Dimension::Px(CHEVRON_SIZE), Dimension::Px(CHEVRON_SIZE))
    .margin(Edges::right_only(40))
    .text_color(Rgb888::WHITE)
    .flex_shrink(0.0);

impl RowStyle {
    /// Gray pill with a ringed circular icon.
    pub const RICH: Self = Self {
        row: Style::new()
            .width(Dimension::Percent(ROW_WIDTH_PERCENT))
            .flex_direction(FlexDirection::Row)
            .justify_content(Justify::SpaceBetween)
            .align_items(Align::Center)
            .background(ROW_BACKGROUND)
            .bg_opacity(Opacity::COVER)
            .radius(Radius::Px(40))
            .flex_shrink(0.0),
        icon: Style::new()
            .size(Dimension::Px(ICON_SIZE), Dimension::Px(ICON_SIZE))
            .margin(Edges::all(16))
            .radius(Radius::Circle)
            .clip_corners(true)
            .border(Border {
                width: 2,
                color: ICON_BORDER,
                opacity: Opacity::COVER,
                order: BorderOrder::AfterContent,
            })
            .flex_shrink(0.0),
        label: LABEL,
        chevron: CHEVRON,
    };

    /// Bare fixed-height rows: no background, square unringed icon.
    pub const PLAIN: Self = Self {
        row: Style::new()
            .size(Dimension::Percent(ROW_WIDTH_PERCENT), Dimension::Px(ICON_SIZE))
            .flex_direction(FlexDirection::Row)
            .justify_content(Justify::SpaceBetween)
            .align_items(Align::Center)
            .flex_shrink(0.0),
        icon: Style::new()
            .size(Dimension::Px(ICON_SIZE), Dimension::Px(ICON_SIZE))
            .margin(Edges::left_only(16))
            .flex_shrink(0.0),
        label: LABEL,
        chevron: CHEVRON,
    };

    /// Replaces the row container's margin.
    #[must_use]
    pub const fn row_margin(mut self, margin: Edges) -> Self {
        self.row.margin = margin;
        self
    }
}

impl Default for RowStyle {
    fn default() -> Self {
        Self::RICH
    }
}

/// Node handles of one built row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// Row container, the only node added to the parent.
    pub container: NodeId,
    /// Leading icon.
    pub icon: NodeId,
    /// Title label.
    pub label: NodeId,
    /// Trailing chevron.
    pub chevron: NodeId,
}

/// Builds one row under `parent` with the rich style.
pub fn build_row(tree: &mut NodeTree, parent: NodeId, title: &str, icon: ImageSource) -> Result<Row, TreeError> {
    build_row_with(tree, parent, title, icon, &RowStyle::RICH)
}

/// Builds one row under `parent`.
///
/// The icon source is bound as given; whether it resolves is only known at
/// render time, where a missing image draws a placeholder.
pub fn build_row_with(
    tree: &mut NodeTree,
    parent: NodeId,
    title: &str,
    icon: ImageSource,
    style: &RowStyle,
) -> Result<Row, TreeError> {
    let container = tree.create(parent, NodeKind::Container, style.row)?;
    let icon = tree.create(container, NodeKind::image(icon), style.icon)?;
    let label = tree.create(container, NodeKind::label(title), style.label)?;
    let chevron = tree.create(container, NodeKind::image(FORWARD_ICON), style.chevron)?;
    Ok(Row {
        container,
        icon,
        label,
        chevron,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::Size;
    use touch_system::layout::compute_layout;

    fn parent(tree: &mut NodeTree) -> NodeId {
        let style = Style::new()
            .size(Dimension::Percent(100.0), Dimension::Percent(100.0))
            .flex_direction(FlexDirection::Column)
            .align_items(Align::Center);
        tree.create(tree.root(), NodeKind::Container, style).unwrap()
    }

    #[test]
    fn test_row_children_in_order() {
        let mut tree = NodeTree::new();
        let page = parent(&mut tree);
        let row = build_row(&mut tree, page, "WLAN", ImageSource::path("/res/WLAN.png")).unwrap();

        assert_eq!(tree.children(page), &[row.container]);
        assert_eq!(tree.children(row.container), &[row.icon, row.label, row.chevron]);
        assert_eq!(tree.image_source(row.icon), Some(&ImageSource::path("/res/WLAN.png")));
        assert_eq!(tree.text(row.label), Some("WLAN"));
        assert_eq!(tree.image_source(row.chevron), Some(&FORWARD_ICON));
    }

    #[test]
    fn test_row_geometry() {
        let mut tree = NodeTree::new();
        let page = parent(&mut tree);
        let row = build_row(&mut tree, page, "Bluetooth", ImageSource::path("/res/Bluetooth.png")).unwrap();
        let layout = compute_layout(&tree, Size::new(480, 480));

        let rect = layout.rect(row.container).unwrap();
        assert_eq!(rect.size, Size::new(384, ICON_SIZE + 32));
        assert_eq!(rect.top_left.x, 48);
        assert_eq!(layout.rect(row.icon).unwrap().size, Size::new(64, 64));
        assert_eq!(layout.rect(row.chevron).unwrap().size, Size::new(32, 32));

        // Chevron sits 40 px from the right edge, vertically centered.
        let chevron = layout.rect(row.chevron).unwrap();
        assert_eq!(chevron.top_left.x, 48 + 384 - 40 - 32);
        assert_eq!(chevron.top_left.y, rect.top_left.y + 32);
    }

    #[test]
    fn test_long_title_does_not_widen_row() {
        let mut tree = NodeTree::new();
        let page = parent(&mut tree);
        let title = "A".repeat(200);
        let row = build_row(&mut tree, page, &title, ImageSource::path("/res/A.png")).unwrap();
        let layout = compute_layout(&tree, Size::new(480, 480));

        assert_eq!(layout.rect(row.container).unwrap().size.width, 384);
        assert_eq!(layout.rect(row.icon).unwrap().size, Size::new(64, 64));
        assert_eq!(layout.rect(row.chevron).unwrap().size, Size::new(32, 32));
        let label = layout.rect(row.label).unwrap();
        assert_eq!(label.size.width, 384 - 96 - 20 - 72);
    }

    #[test]
    fn test_empty_title_builds_blank_label() {
        let mut tree = NodeTree::new();
        let page = parent(&mut tree);
        let row = build_row(&mut tree, page, "", ImageSource::path("/res/.png")).unwrap();
        assert_eq!(tree.text(row.label), Some(""));
        assert_eq!(tree.children(row.container).len(), 3);
    }

    #[test]
    fn test_plain_row_is_fixed_height() {
        let mut tree = NodeTree::new();
        let page = parent(&mut tree);
        let row = build_row_with(&mut tree, page, "Music", ImageSource::path("/res/Music.png"), &RowStyle::PLAIN)
            .unwrap();
        let layout = compute_layout(&tree, Size::new(480, 480));

        assert_eq!(layout.rect(row.container).unwrap().size, Size::new(384, 64));
        assert_eq!(tree.children(row.container).len(), 3);
        assert!(tree.style(row.container).unwrap().background.is_none());
    }

    #[test]
    fn test_row_on_full_tree_reports_capacity() {
        let mut tree = NodeTree::with_capacity(3);
        let root = tree.root();
        let err = build_row(&mut tree, root, "WLAN", ImageSource::path("/res/WLAN.png")).unwrap_err();
        assert!(matches!(err, TreeError::CapacityExhausted { capacity: 3 }));
        // Nodes created before the failure stay attached.
        assert_eq!(tree.len(), 3);
    }
}
