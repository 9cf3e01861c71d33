//! Layout pass over a [`NodeTree`].
//!
//! The pass runs in two directions:
//!
//! 1. **Measure (up)**: each node reports the size it wants given the
//!    parent's content box. Percentages resolve against that box; `Auto`
//!    sizes follow the content (labels: characters × advance width by line
//!    height, images: 0, containers: the flex arrangement of their children).
//! 2. **Arrange (down)**: each container runs [`FlexLayout`] over its
//!    measured children and hands every child its final rectangle.
//!
//! The result is a [`LayoutMap`] of absolute rectangles keyed by node.
//!
//! ```
//! use touch_system::prelude::*;
//!
//! let mut tree = NodeTree::new();
//! let screen = tree
//!     .create(tree.root(), NodeKind::Container,
//!         Style::new().size(Dimension::Percent(100.0), Dimension::Percent(100.0)))
//!     .unwrap();
//! let map = compute_layout(&tree, Size::new(480, 480));
//! assert_eq!(map.rect(screen).unwrap().size, Size::new(480, 480));
//! ```

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use slotmap::SecondaryMap;

use crate::flex::{FlexChild, FlexLayout};
use crate::style::{Dimension, Edges, FlexDirection, Style};
use crate::tree::{NodeId, NodeKind, NodeTree};

/// Constraints define the valid range of sizes for layout.
///
/// Constraints flow down the tree from parent to child. The maximum is the
/// box that percentages resolve against.
///
/// # Invariants
///
/// - `min.width <= max.width`
/// - `min.height <= max.height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Minimum allowed size (inclusive).
    pub min: Size,
    /// Maximum allowed size (inclusive).
    pub max: Size,
}

impl Constraints {
    /// Create new constraints with explicit min and max bounds.
    ///
    /// A minimum larger than the maximum is lowered to the maximum.
    pub fn new(min: Size, max: Size) -> Self {
        Self {
            min: Size::new(min.width.min(max.width), min.height.min(max.height)),
            max,
        }
    }

    /// Create tight constraints (exact size).
    ///
    /// ```rust
    /// use touch_system::layout::Constraints;
    /// use embedded_graphics::prelude::Size;
    ///
    /// let constraints = Constraints::tight(Size::new(100, 50));
    /// assert!(constraints.is_tight());
    /// ```
    pub fn tight(size: Size) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// Create loose constraints (zero to max).
    pub fn loose(max: Size) -> Self {
        Self {
            min: Size::zero(),
            max,
        }
    }

    /// Clamps the given size to the valid range defined by min and max.
    ///
    /// ```rust
    /// use touch_system::layout::Constraints;
    /// use embedded_graphics::prelude::Size;
    ///
    /// let constraints = Constraints::new(Size::new(50, 25), Size::new(200, 100));
    /// assert_eq!(constraints.constrain(Size::new(10, 10)), Size::new(50, 25));
    /// assert_eq!(constraints.constrain(Size::new(300, 300)), Size::new(200, 100));
    /// ```
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min.width, self.max.width),
            size.height.clamp(self.min.height, self.max.height),
        )
    }

    /// Check if these constraints are tight (min == max).
    pub fn is_tight(&self) -> bool {
        self.min == self.max
    }

    /// Shrinks both bounds by the given insets, clamping at zero.
    ///
    /// ```rust
    /// use touch_system::layout::Constraints;
    /// use touch_system::style::Edges;
    /// use embedded_graphics::prelude::Size;
    ///
    /// let shrunk = Constraints::tight(Size::new(100, 50)).deflate(Edges::all(10));
    /// assert_eq!(shrunk.max, Size::new(80, 30));
    /// ```
    pub fn deflate(&self, edges: Edges) -> Self {
        let shrink = |size: Size| {
            Size::new(
                size.width.saturating_sub(edges.horizontal()),
                size.height.saturating_sub(edges.vertical()),
            )
        };
        Self {
            min: shrink(self.min),
            max: shrink(self.max),
        }
    }
}

/// Final geometry of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLayout {
    /// Absolute box on the surface.
    pub rect: Rectangle,
    /// Extent of the children (plus padding), which may exceed `rect`.
    pub content_extent: Size,
}

/// Absolute geometry for every node of a tree.
#[derive(Debug, Clone, Default)]
pub struct LayoutMap {
    nodes: SecondaryMap<NodeId, NodeLayout>,
}

impl LayoutMap {
    /// Geometry of `id`.
    pub fn get(&self, id: NodeId) -> Option<&NodeLayout> {
        self.nodes.get(id)
    }

    /// Absolute box of `id`.
    pub fn rect(&self, id: NodeId) -> Option<Rectangle> {
        self.nodes.get(id).map(|layout| layout.rect)
    }

    /// Children extent of `id`.
    pub fn content_extent(&self, id: NodeId) -> Option<Size> {
        self.nodes.get(id).map(|layout| layout.content_extent)
    }

    /// Number of laid out nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest visible node under `point`, honoring ancestor clipping.
    pub fn hit_test(&self, tree: &NodeTree, point: Point) -> Option<NodeId> {
        let root = tree.root();
        let clip = self.rect(root)?;
        self.hit_test_in(tree, root, clip, point)
    }

    fn hit_test_in(&self, tree: &NodeTree, id: NodeId, clip: Rectangle, point: Point) -> Option<NodeId> {
        let rect = self.rect(id)?;
        let visible = rect.intersection(&clip);
        if !visible.contains(point) {
            return None;
        }
        tree.children(id)
            .iter()
            .rev()
            .find_map(|child| self.hit_test_in(tree, *child, visible, point))
            .or(Some(id))
    }

    fn insert(&mut self, id: NodeId, layout: NodeLayout) {
        self.nodes.insert(id, layout);
    }
}

/// Lays out the whole tree inside a viewport anchored at the origin.
///
/// The root always covers the viewport.
pub fn compute_layout(tree: &NodeTree, viewport: Size) -> LayoutMap {
    let mut map = LayoutMap::default();
    let root_size = Constraints::tight(viewport).constrain(viewport);
    arrange(tree, tree.root(), Rectangle::new(Point::zero(), root_size), &mut map);
    tracing::trace!(nodes = map.len(), width = viewport.width, height = viewport.height, "layout pass");
    map
}

/// Measures the box `id` wants inside a parent content box bounded by `constraints`.
pub fn measure(tree: &NodeTree, id: NodeId, constraints: Constraints) -> Size {
    let (Some(kind), Some(style)) = (tree.kind(id), tree.style(id)) else {
        return Size::zero();
    };
    let avail = constraints.max;

    let fixed_width = resolve_dimension(style.width, avail.width);
    let fixed_height = resolve_dimension(style.height, avail.height);
    if let (Some(width), Some(height)) = (fixed_width, fixed_height) {
        return Size::new(width, height);
    }

    let content = match kind {
        NodeKind::Label { text } => {
            let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
            Size::new(
                chars.saturating_mul(style.font.char_width()),
                style.font.line_height(),
            )
        }
        NodeKind::Image { .. } => Size::zero(),
        NodeKind::Container => {
            let inner_width = fixed_width
                .unwrap_or_else(|| avail.width.saturating_sub(style.margin.horizontal()));
            let inner_height = fixed_height
                .unwrap_or_else(|| avail.height.saturating_sub(style.margin.vertical()));
            let inner = Constraints::loose(Size::new(inner_width, inner_height)).deflate(style.padding);
            container_content(tree, id, style, inner)
        }
    };

    Size::new(
        fixed_width.unwrap_or_else(|| content.width.saturating_add(style.padding.horizontal())),
        fixed_height.unwrap_or_else(|| content.height.saturating_add(style.padding.vertical())),
    )
}

fn resolve_dimension(dimension: Dimension, available: u32) -> Option<u32> {
    match dimension {
        Dimension::Auto => None,
        fixed => Some(fixed.resolve(available)),
    }
}

/// Natural size of a container's children laid out along its flow.
fn container_content(tree: &NodeTree, id: NodeId, style: &Style, inner: Constraints) -> Size {
    let children = flex_children(tree, id, style, inner);
    let gap_count = u32::try_from(children.len().saturating_sub(1)).unwrap_or(u32::MAX);
    let gaps = style.gap.saturating_mul(gap_count);

    let mut main = gaps;
    let mut cross = 0u32;
    for child in &children {
        let (child_main, child_cross) = match style.flex_direction {
            FlexDirection::Row => (
                child.size.width.saturating_add(child.margin.horizontal()),
                child.size.height.saturating_add(child.margin.vertical()),
            ),
            FlexDirection::Column => (
                child.size.height.saturating_add(child.margin.vertical()),
                child.size.width.saturating_add(child.margin.horizontal()),
            ),
        };
        main = main.saturating_add(child_main);
        cross = cross.max(child_cross);
    }

    match style.flex_direction {
        FlexDirection::Row => Size::new(main, cross),
        FlexDirection::Column => Size::new(cross, main),
    }
}

fn flex_children(tree: &NodeTree, id: NodeId, style: &Style, inner: Constraints) -> Vec<FlexChild> {
    tree.children(id)
        .iter()
        .filter_map(|child| {
            let child_style = tree.style(*child)?;
            let size = measure(tree, *child, inner);
            let mut flex = FlexChild::from_style(size, child_style);
            flex.stretch_cross = match style.flex_direction {
                FlexDirection::Row => child_style.height.is_auto(),
                FlexDirection::Column => child_style.width.is_auto(),
            };
            Some(flex)
        })
        .collect()
}

fn arrange(tree: &NodeTree, id: NodeId, rect: Rectangle, map: &mut LayoutMap) {
    let Some(style) = tree.style(id) else {
        return;
    };
    let children = tree.children(id);
    if children.is_empty() {
        map.insert(
            id,
            NodeLayout {
                rect,
                content_extent: Size::zero(),
            },
        );
        return;
    }

    let inner = Constraints::tight(rect.size).deflate(style.padding);
    let flex_children = flex_children(tree, id, style, inner);
    let outcome = FlexLayout::new(*style).layout(inner.max, &flex_children);

    let content_extent = match style.flex_direction {
        FlexDirection::Row => Size::new(outcome.content_main, outcome.content_cross),
        FlexDirection::Column => Size::new(outcome.content_cross, outcome.content_main),
    };
    map.insert(
        id,
        NodeLayout {
            rect,
            content_extent: Size::new(
                content_extent.width.saturating_add(style.padding.horizontal()),
                content_extent.height.saturating_add(style.padding.vertical()),
            ),
        },
    );

    let scroll = i32::try_from(tree.scroll_y(id)).unwrap_or(i32::MAX);
    let origin = rect.top_left
        + Point::new(
            i32::try_from(style.padding.left).unwrap_or(i32::MAX),
            i32::try_from(style.padding.top).unwrap_or(i32::MAX).saturating_sub(scroll),
        );

    for (child, placement) in children.iter().zip(outcome.placements) {
        let child_rect = Rectangle::new(origin + placement.position, placement.size);
        arrange(tree, *child, child_rect, map);
    }
}
