//! Settings screen: a caption header over a list of iconed, navigable rows.
//!
//! Screens are assembled into a [`NodeTree`](touch_system::tree::NodeTree)
//! from an ordered list of [`ItemDescriptor`]s:
//!
//! ```text
//! page (100% × 100%, black, column)
//! ├── header (100% wide, column, centered)
//! │   └── "Settings"
//! ├── row 0 (80% wide, gray pill)
//! │   ├── icon (64×64, circular, ringed)
//! │   ├── title (grows)
//! │   └── chevron (32×32)
//! ├── row 1
//! …
//! ```
//!
//! The tree is built once; afterwards [`Navigator`] only restyles and scrolls.
//!
//! # Example
//!
//! ```
//! use settings_ui::{build_screen, ItemDescriptor};
//! use touch_system::tree::NodeTree;
//!
//! let mut tree = NodeTree::new();
//! let screen = build_screen(&mut tree, &[ItemDescriptor::new("WLAN")]).unwrap();
//! let row = screen.rows[0];
//! assert_eq!(tree.text(row.label), Some("WLAN"));
//! assert_eq!(tree.children(row.container).len(), 3);
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod descriptor;
pub mod header;
pub mod navigation;
pub mod row;
pub mod screen;

pub use descriptor::{reference_items, IconMapping, ItemDescriptor, PathTemplate, CAPTION, REFERENCE_TITLES};
pub use header::{build_header, build_header_with, HeaderStyle};
pub use navigation::{Activation, Navigator};
pub use row::{build_row, build_row_with, Row, RowStyle, FORWARD_ICON};
pub use screen::{build_screen, BuildError, Screen, ScreenBuilder};
