//! Touch UI runtime
//!
//! Retained-mode node tree with flexbox layout and a software renderer for
//! fixed-resolution touch panels.
//!
//! # Architecture
//!
//! - Tree: slotmap arena of nodes, parents own children
//! - Core types: Dimension, Edges, Style, Constraints
//! - Flexbox engine: single-line flexbox with grow/shrink and margins
//! - Layout pass: measure up, arrange down, absolute rectangles out
//! - Rendering: embedded-graphics primitives into a [`framebuffer::Framebuffer`]
//! - Assets: [`asset::AssetResolver`] boundary with a placeholder for misses
//!
//! # Example
//!
//! ```
//! use touch_system::prelude::*;
//!
//! let mut tree = NodeTree::new();
//! let label = tree
//!     .create(tree.root(), NodeKind::label("Settings"), Style::new().font(FontSize::Large))
//!     .unwrap();
//!
//! let layout = compute_layout(&tree, Size::new(480, 480));
//! assert_eq!(layout.rect(label).unwrap().size, Size::new(160, 40));
//!
//! let mut frame = Framebuffer::new(480, 480);
//! let stats = Renderer::new().render(&tree, &layout, &mut frame, &mut NoAssets);
//! assert_eq!(stats.placeholders, 0);
//! ```

pub mod asset;
pub mod flex;
pub mod framebuffer;
pub mod layout;
pub mod render;
pub mod style;
pub mod tree;

pub mod prelude {
    //! Commonly used runtime types.

    // Style system
    pub use crate::style::*;

    // Tree
    pub use crate::tree::{NodeId, NodeKind, NodeTree, TreeError};

    // Flex engine
    pub use crate::flex::{FlexChild, FlexLayout};

    // Layout pass
    pub use crate::layout::{compute_layout, Constraints, LayoutMap};

    // Assets
    pub use crate::asset::{AssetError, AssetResolver, BuiltinImage, ImageData, ImageSource, MemoryAssets, NoAssets};

    // Rendering
    pub use crate::framebuffer::Framebuffer;
    pub use crate::render::{RenderStats, Renderer};

    // Geometry and color
    pub use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
    pub use embedded_graphics::prelude::{Point, Size};
}
