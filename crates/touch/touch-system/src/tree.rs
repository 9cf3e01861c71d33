//! Retained-mode node tree.
//!
//! Nodes live in a slotmap arena and refer to each other by [`NodeId`].
//! A parent owns its children: removing a node removes its whole subtree.
//! The tree always has a root node that stands for the display surface.

use std::fmt;

use slotmap::{new_key_type, Key, SlotMap};
use thiserror::Error;

use crate::asset::ImageSource;
use crate::style::Style;

new_key_type! {
    /// Handle to one node of a [`NodeTree`].
    pub struct NodeId;
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ffi = self.data().as_ffi();
        write!(f, "#{}v{}", ffi & 0xffff_ffff, ffi >> 32)
    }
}

/// Default maximum number of live nodes.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Errors returned by tree mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle does not name a live node.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Only container nodes accept children.
    #[error("node {0} is not a container")]
    NotAContainer(NodeId),

    /// The node exists but has a different kind than the operation needs.
    #[error("node {node} is not a {expected} node")]
    KindMismatch {
        /// Target node.
        node: NodeId,
        /// Kind the operation applies to.
        expected: &'static str,
    },

    /// The node arena is full.
    #[error("node capacity of {capacity} exhausted")]
    CapacityExhausted {
        /// Configured capacity.
        capacity: usize,
    },

    /// The root represents the display surface and cannot be removed.
    #[error("the root node cannot be removed")]
    RootRemoval,
}

/// What a node displays.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Holds and arranges children.
    Container,
    /// Single line of text, drawn with the node's font.
    Label {
        /// Text content; may be empty.
        text: String,
    },
    /// Image stretched to the node's box.
    Image {
        /// Where the pixels come from.
        source: ImageSource,
    },
}

impl NodeKind {
    /// Creates a label kind.
    pub fn label(text: impl Into<String>) -> Self {
        NodeKind::Label { text: text.into() }
    }

    /// Creates an image kind.
    pub fn image(source: ImageSource) -> Self {
        NodeKind::Image { source }
    }

    /// Returns `true` for containers.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Container)
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    style: Style,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    scroll_y: u32,
}

/// Arena of nodes rooted at the display surface.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    capacity: usize,
    dirty: bool,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Creates a tree with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a tree holding at most `capacity` nodes, root included.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            kind: NodeKind::Container,
            style: Style::new(),
            parent: None,
            children: Vec::new(),
            scroll_y: 0,
        });
        Self {
            nodes,
            root,
            capacity: capacity.max(1),
            dirty: true,
        }
    }

    /// The surface root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Maximum number of live nodes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Creates a node as the last child of `parent`.
    pub fn create(&mut self, parent: NodeId, kind: NodeKind, style: Style) -> Result<NodeId, TreeError> {
        let parent_node = self.nodes.get(parent).ok_or(TreeError::UnknownNode(parent))?;
        if !parent_node.kind.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        if self.nodes.len() >= self.capacity {
            return Err(TreeError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        let id = self.nodes.insert(Node {
            kind,
            style,
            parent: Some(parent),
            children: Vec::new(),
            scroll_y: 0,
        });
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        self.dirty = true;
        tracing::trace!(node = %id, parent = %parent, "node created");
        Ok(id)
    }

    /// Children of `id` in order. Empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Parent of `id`; `None` for the root and unknown nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Kind of `id`.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id).map(|node| &node.kind)
    }

    /// Style of `id`.
    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.nodes.get(id).map(|node| &node.style)
    }

    /// Text of a label node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Label { text } => Some(text),
            _ => None,
        }
    }

    /// Source of an image node.
    pub fn image_source(&self, id: NodeId) -> Option<&ImageSource> {
        match self.kind(id)? {
            NodeKind::Image { source } => Some(source),
            _ => None,
        }
    }

    /// Replaces the style of `id`.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        if node.style != style {
            node.style = style;
            self.dirty = true;
        }
        Ok(())
    }

    /// Replaces the text of a label node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        match &mut node.kind {
            NodeKind::Label { text: current } => {
                *current = text.into();
                self.dirty = true;
                Ok(())
            }
            _ => Err(TreeError::KindMismatch {
                node: id,
                expected: "label",
            }),
        }
    }

    /// Rebinds the source of an image node.
    pub fn set_image(&mut self, id: NodeId, source: ImageSource) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        match &mut node.kind {
            NodeKind::Image { source: current } => {
                *current = source;
                self.dirty = true;
                Ok(())
            }
            _ => Err(TreeError::KindMismatch {
                node: id,
                expected: "image",
            }),
        }
    }

    /// Vertical scroll offset of a container's children.
    pub fn scroll_y(&self, id: NodeId) -> u32 {
        self.nodes.get(id).map_or(0, |node| node.scroll_y)
    }

    /// Sets the vertical scroll offset of `id`. Clamping is the caller's job.
    pub fn set_scroll_y(&mut self, id: NodeId, offset: u32) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        if node.scroll_y != offset {
            node.scroll_y = offset;
            self.dirty = true;
        }
        Ok(())
    }

    /// Removes `id` and all of its descendants. Returns the number of removed nodes.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        if !self.nodes.contains_key(id) {
            return Err(TreeError::UnknownNode(id));
        }

        if let Some(parent) = self.parent(id) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }

        let doomed: Vec<NodeId> = self.depth_first(id).collect();
        for node in &doomed {
            self.nodes.remove(*node);
        }
        self.dirty = true;
        Ok(doomed.len())
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    pub fn depth_first(&self, id: NodeId) -> DepthFirst<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        DepthFirst { tree: self, stack }
    }

    /// Nesting depth of `id` below the root (root = 0).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Returns `true` if the tree changed since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns `true` if the tree changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces the next [`take_dirty`](Self::take_dirty) to report a change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct DepthFirst<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::asset::BuiltinImage;

    #[test]
    fn test_new_tree_has_root_only() {
        let tree = NodeTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_create_appends_in_order() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let a = tree.create(root, NodeKind::Container, Style::new()).unwrap();
        let b = tree.create(root, NodeKind::label("b"), Style::new()).unwrap();

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.text(b), Some("b"));
        assert_eq!(tree.depth(b), 1);
    }

    #[test]
    fn test_leaf_nodes_reject_children() {
        let mut tree = NodeTree::new();
        let label = tree
            .create(tree.root(), NodeKind::label("x"), Style::new())
            .unwrap();
        let err = tree.create(label, NodeKind::Container, Style::new()).unwrap_err();
        assert_eq!(err, TreeError::NotAContainer(label));
    }

    #[test]
    fn test_capacity_exhaustion_is_an_error() {
        let mut tree = NodeTree::with_capacity(3);
        let root = tree.root();
        tree.create(root, NodeKind::Container, Style::new()).unwrap();
        tree.create(root, NodeKind::Container, Style::new()).unwrap();
        let err = tree.create(root, NodeKind::Container, Style::new()).unwrap_err();

        assert_eq!(err, TreeError::CapacityExhausted { capacity: 3 });
        assert_eq!(tree.children(root).len(), 2);
    }

    #[test]
    fn test_remove_is_recursive_and_detaches() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let row = tree.create(root, NodeKind::Container, Style::new()).unwrap();
        let label = tree.create(row, NodeKind::label("t"), Style::new()).unwrap();
        let keep = tree.create(root, NodeKind::Container, Style::new()).unwrap();

        assert_eq!(tree.remove(row).unwrap(), 2);
        assert!(!tree.contains(label));
        assert_eq!(tree.children(root), &[keep]);
        assert_eq!(tree.remove(row), Err(TreeError::UnknownNode(row)));
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        assert_eq!(tree.remove(root), Err(TreeError::RootRemoval));
    }

    #[test]
    fn test_stale_parent_reports_unknown_node() {
        let mut tree = NodeTree::new();
        let child = tree
            .create(tree.root(), NodeKind::Container, Style::new())
            .unwrap();
        tree.remove(child).unwrap();
        assert_eq!(
            tree.create(child, NodeKind::Container, Style::new()),
            Err(TreeError::UnknownNode(child))
        );
    }

    #[test]
    fn test_depth_first_is_pre_order() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let a = tree.create(root, NodeKind::Container, Style::new()).unwrap();
        let a1 = tree.create(a, NodeKind::label("a1"), Style::new()).unwrap();
        let b = tree.create(root, NodeKind::Container, Style::new()).unwrap();

        let order: Vec<NodeId> = tree.depth_first(root).collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn test_setters_check_kind_and_mark_dirty() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let image = tree
            .create(root, NodeKind::image(ImageSource::path("/res/a.png")), Style::new())
            .unwrap();
        tree.take_dirty();

        tree.set_image(image, ImageSource::Builtin(BuiltinImage::Forward)).unwrap();
        assert!(tree.take_dirty());
        assert!(!tree.is_dirty());
        assert_eq!(
            tree.image_source(image),
            Some(&ImageSource::Builtin(BuiltinImage::Forward))
        );
        assert_eq!(
            tree.set_text(image, "nope"),
            Err(TreeError::KindMismatch {
                node: image,
                expected: "label"
            })
        );
    }

    #[test]
    fn test_set_same_style_keeps_tree_clean() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        tree.take_dirty();
        tree.set_style(root, Style::new()).unwrap();
        assert!(!tree.take_dirty());
    }

    #[test]
    fn test_scroll_offset_roundtrip() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        tree.set_scroll_y(root, 40).unwrap();
        assert_eq!(tree.scroll_y(root), 40);
    }
}
