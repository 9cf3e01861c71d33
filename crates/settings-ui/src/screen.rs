//! Screen Assembler: root page, header, then one row per descriptor.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use thiserror::Error;
use touch_system::style::{Align, Dimension, Edges, FlexDirection, Justify, Opacity, Style};
use touch_system::tree::{NodeId, NodeKind, NodeTree, TreeError};

use crate::descriptor::{IconMapping, ItemDescriptor, PathTemplate, CAPTION};
use crate::header::{build_header_with, HeaderStyle};
use crate::row::{build_row_with, Row, RowStyle};

/// Space above and below the header.
pub const HEADER_MARGIN: u32 = 22;

/// Space above and below each row.
pub const ROW_MARGIN: u32 = 10;

/// Style of the page container.
pub const PAGE_STYLE: Style = Style::new()
    .size(Dimension::Percent(100.0), Dimension::Percent(100.0))
    .background(Rgb888::BLACK)
    .bg_opacity(Opacity::COVER)
    .flex_direction(FlexDirection::Column)
    .justify_content(Justify::Start)
    .align_items(Align::Center);

/// Failure while assembling the screen.
///
/// Nodes built before the failure stay attached to the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The page container could not be created.
    #[error("failed to create the settings page")]
    Root(#[source] TreeError),

    /// The header could not be built.
    #[error("failed to build the header")]
    Header(#[source] TreeError),

    /// A row could not be built. Rows after it were not attempted.
    #[error("failed to build row {index} \"{title}\"")]
    Row {
        /// Position in the descriptor list.
        index: usize,
        /// Title of the failed row.
        title: String,
        /// Underlying tree error.
        #[source]
        source: TreeError,
    },
}

impl BuildError {
    /// The tree error that stopped the build.
    pub fn tree_error(&self) -> TreeError {
        match self {
            BuildError::Root(err) | BuildError::Header(err) => *err,
            BuildError::Row { source, .. } => *source,
        }
    }
}

/// Handles of a built settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Page container, child of the tree root.
    pub root: NodeId,
    /// Header container.
    pub header: NodeId,
    /// Rows in descriptor order.
    pub rows: Vec<Row>,
}

impl Screen {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the screen has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the row whose container is `id`.
    pub fn row_index(&self, id: NodeId) -> Option<usize> {
        self.rows.iter().position(|row| row.container == id)
    }
}

/// Configurable screen assembly.
///
/// ```
/// use settings_ui::{reference_items, ScreenBuilder};
/// use touch_system::tree::NodeTree;
///
/// let mut tree = NodeTree::new();
/// let screen = ScreenBuilder::new().build(&mut tree, &reference_items()).unwrap();
/// assert_eq!(screen.rows.len(), 16);
/// assert_eq!(tree.children(screen.root).len(), 17);
/// ```
pub struct ScreenBuilder<'a> {
    caption: &'a str,
    header_style: HeaderStyle,
    row_style: RowStyle,
    icons: Box<dyn IconMapping + 'a>,
}

impl Default for ScreenBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScreenBuilder<'a> {
    /// Reference caption, rich rows and the `/res/{title}.png` icon template.
    pub fn new() -> Self {
        Self {
            caption: CAPTION,
            header_style: HeaderStyle::DEFAULT,
            row_style: RowStyle::RICH,
            icons: Box::new(PathTemplate::default()),
        }
    }

    /// Header caption.
    #[must_use]
    pub fn caption(mut self, caption: &'a str) -> Self {
        self.caption = caption;
        self
    }

    /// Row style bundle.
    #[must_use]
    pub fn row_style(mut self, style: RowStyle) -> Self {
        self.row_style = style;
        self
    }

    /// Title → icon mapping for descriptors without an explicit icon.
    #[must_use]
    pub fn icon_mapping(mut self, mapping: impl IconMapping + 'a) -> Self {
        self.icons = Box::new(mapping);
        self
    }

    /// Assembles the screen under the tree root.
    ///
    /// Single pass, in descriptor order. The first failure stops the build and
    /// is returned; nothing already built is rolled back.
    pub fn build(&self, tree: &mut NodeTree, descriptors: &[ItemDescriptor]) -> Result<Screen, BuildError> {
        let root = tree
            .create(tree.root(), NodeKind::Container, PAGE_STYLE)
            .map_err(BuildError::Root)?;

        let mut header_style = self.header_style;
        header_style.container.margin = Edges::new(HEADER_MARGIN, 0, HEADER_MARGIN, 0);
        let header = build_header_with(tree, root, self.caption, &header_style).map_err(BuildError::Header)?;

        let row_style = self.row_style.row_margin(Edges::vertical_only(ROW_MARGIN));
        let mut rows = Vec::with_capacity(descriptors.len());
        for (index, item) in descriptors.iter().enumerate() {
            let icon = item.icon_source(self.icons.as_ref());
            let row = build_row_with(tree, root, &item.title, icon, &row_style).map_err(|source| BuildError::Row {
                index,
                title: item.title.clone(),
                source,
            })?;
            rows.push(row);
        }

        tracing::debug!(rows = rows.len(), nodes = tree.len(), "settings screen built");
        Ok(Screen { root, header, rows })
    }
}

/// Assembles the reference-styled screen for `descriptors`.
pub fn build_screen(tree: &mut NodeTree, descriptors: &[ItemDescriptor]) -> Result<Screen, BuildError> {
    ScreenBuilder::new().build(tree, descriptors)
}
