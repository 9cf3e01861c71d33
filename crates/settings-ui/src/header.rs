//! Header Builder: the caption banner at the top of the screen.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use touch_system::style::{Align, Dimension, FlexDirection, FontSize, Justify, Style};
use touch_system::tree::{NodeId, NodeKind, NodeTree, TreeError};

/// Styles of the two header nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    /// Full-width column centering the caption.
    pub container: Style,
    /// Caption label.
    pub caption: Style,
}

impl HeaderStyle {
    /// Large white caption centered across the full width.
    pub const DEFAULT: Self = Self {
        container: Style::new()
            .width(Dimension::Percent(100.0))
            .flex_direction(FlexDirection::Column)
            .justify_content(Justify::Center)
            .align_items(Align::Center)
            .flex_shrink(0.0),
        caption: Style::new()
            .font(FontSize::Large)
            .text_color(Rgb888::WHITE)
            .flex_shrink(0.0),
    };
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builds the default "Settings" header under `parent`.
pub fn build_header(tree: &mut NodeTree, parent: NodeId) -> Result<NodeId, TreeError> {
    build_header_with(tree, parent, crate::descriptor::CAPTION, &HeaderStyle::DEFAULT)
}

/// Builds a header with a custom caption and style.
///
/// Adds exactly one child to `parent` and returns it. The returned container
/// holds a single label.
pub fn build_header_with(
    tree: &mut NodeTree,
    parent: NodeId,
    caption: &str,
    style: &HeaderStyle,
) -> Result<NodeId, TreeError> {
    let header = tree.create(parent, NodeKind::Container, style.container)?;
    tree.create(header, NodeKind::label(caption), style.caption)?;
    Ok(header)
}
