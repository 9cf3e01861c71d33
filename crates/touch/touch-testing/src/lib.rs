//! Touch UI Testing Utilities
//!
//! Headless harness for screens built on `touch-system`: build a tree,
//! lay it out, render it, then query nodes and assert on pixels.
//!
//! # Quick start
//!
//! ```
//! use touch_testing::TestPanel;
//! use touch_system::prelude::*;
//!
//! let mut t = TestPanel::new(100, 100);
//! let root = t.tree().root();
//! t.tree_mut()
//!     .create(
//!         root,
//!         NodeKind::Container,
//!         Style::new()
//!             .size(Dimension::Px(40), Dimension::Px(20))
//!             .background(Rgb888::new(0x66, 0x66, 0x66)),
//!     )
//!     .unwrap();
//! t.render();
//!
//! t.assert_pixel(10, 10, Rgb888::new(0x66, 0x66, 0x66)).unwrap();
//! t.assert_pixel(60, 10, Rgb888::new(0, 0, 0)).unwrap();
//! ```
//!
//! # Golden screenshot testing
//!
//! ```no_run
//! # use touch_testing::TestPanel;
//! # let t = TestPanel::new(100, 100);
//! // First run: set UPDATE_GOLDEN=1 to create/update the reference file.
//! t.assert_matches_golden("tests/golden/settings.png", 0).unwrap();
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]

use std::path::Path;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use touch_system::asset::MemoryAssets;
use touch_system::framebuffer::Framebuffer;
use touch_system::layout::{compute_layout, LayoutMap};
use touch_system::render::{RenderStats, Renderer};
use touch_system::tree::{NodeId, NodeKind, NodeTree};

pub use embedded_graphics::pixelcolor::Rgb888;

// ─────────────────────────────────────────────────────────────────────────────
// TestPanel
// ─────────────────────────────────────────────────────────────────────────────

/// Headless panel for UI testing.
///
/// Owns a [`NodeTree`], the last [`LayoutMap`] and a [`Framebuffer`].
/// Images resolve through an in-memory store, so tests register the icons
/// they want drawn and everything else renders as a placeholder.
pub struct TestPanel {
    tree: NodeTree,
    layout: LayoutMap,
    frame: Framebuffer,
    assets: MemoryAssets,
    renderer: Renderer,
    stats: RenderStats,
}

impl TestPanel {
    /// Creates an empty panel of `width`×`height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_tree(NodeTree::new(), width, height)
    }

    /// Wraps an existing tree.
    pub fn with_tree(tree: NodeTree, width: u32, height: u32) -> Self {
        let layout = compute_layout(&tree, Size::new(width, height));
        Self {
            tree,
            layout,
            frame: Framebuffer::new(width, height),
            assets: MemoryAssets::new(),
            renderer: Renderer::new(),
            stats: RenderStats::default(),
        }
    }

    /// Panel width in pixels.
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    /// Panel height in pixels.
    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    // ── Tree access ──────────────────────────────────────────────────────────

    /// The node tree.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Mutable node tree. Call [`relayout`](Self::relayout) or
    /// [`render`](Self::render) afterwards.
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// In-memory image store used when rendering.
    pub fn assets_mut(&mut self) -> &mut MemoryAssets {
        &mut self.assets
    }

    /// Layout from the last [`relayout`](Self::relayout) or render.
    pub fn layout(&self) -> &LayoutMap {
        &self.layout
    }

    /// Recomputes the layout without drawing.
    pub fn relayout(&mut self) {
        self.layout = compute_layout(&self.tree, Size::new(self.width(), self.height()));
    }

    /// Lays out and draws the whole tree.
    pub fn render(&mut self) -> RenderStats {
        self.relayout();
        self.stats = self
            .renderer
            .render(&self.tree, &self.layout, &mut self.frame, &mut self.assets);
        self.tree.take_dirty();
        self.stats
    }

    /// Counters from the last render.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Rendered frame.
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Absolute rectangle of `id` in the current layout.
    pub fn rect(&self, id: NodeId) -> Option<Rectangle> {
        self.layout.rect(id)
    }

    /// Every label under the root as `(id, text)`, in depth-first order.
    pub fn labels(&self) -> Vec<(NodeId, String)> {
        self.tree
            .depth_first(self.tree.root())
            .filter_map(|id| match self.tree.kind(id)? {
                NodeKind::Label { text } => Some((id, text.clone())),
                _ => None,
            })
            .collect()
    }

    /// First label whose text equals `text`.
    pub fn find_label(&self, text: &str) -> Option<NodeId> {
        self.tree
            .depth_first(self.tree.root())
            .find(|id| self.tree.text(*id) == Some(text))
    }

    /// Whether any part of `id` lies inside the panel.
    pub fn is_on_screen(&self, id: NodeId) -> bool {
        let screen = Rectangle::new(Point::zero(), self.frame.size());
        self.rect(id)
            .map(|rect| !screen.intersection(&rect).is_zero_sized())
            .unwrap_or(false)
    }

    /// Deepest node under `point`.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.layout.hit_test(&self.tree, point)
    }

    // ── Framebuffer access ───────────────────────────────────────────────────

    /// Color at `(x, y)`, or `None` if out of bounds.
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.frame.pixel(Point::new(x, y))
    }

    /// Number of pixels in `rect` that are exactly `color`.
    pub fn pixel_count_of_color(&self, rect: Rectangle, color: Rgb888) -> usize {
        rect.points()
            .filter(|p| self.frame.pixel(*p) == Some(color))
            .count()
    }

    // ── Pixel assertions ─────────────────────────────────────────────────────

    /// Assert that pixel `(x, y)` has the expected color.
    ///
    /// Returns `Err` with a descriptive message on mismatch.
    pub fn assert_pixel(&self, x: i32, y: i32, expected: Rgb888) -> Result<(), String> {
        let actual = self
            .pixel_at(x, y)
            .ok_or_else(|| format!("Pixel ({x}, {y}) is out of bounds"))?;
        if actual == expected {
            Ok(())
        } else {
            Err(format!(
                "assert_pixel({x}, {y}): expected {}, got {}",
                hex(expected),
                hex(actual)
            ))
        }
    }

    /// Assert that every pixel in `rect` is `color`.
    pub fn assert_region_uniform(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        match rect.points().find(|p| self.frame.pixel(*p) != Some(color)) {
            None => Ok(()),
            Some(p) => Err(format!(
                "assert_region_uniform: pixel ({}, {}) differs from {}",
                p.x,
                p.y,
                hex(color)
            )),
        }
    }

    /// Assert that at least one pixel in `rect` is `color`.
    pub fn assert_region_contains(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        if self.pixel_count_of_color(rect, color) > 0 {
            Ok(())
        } else {
            Err(format!(
                "assert_region_contains: no {} pixel in {}x{} at ({}, {})",
                hex(color),
                rect.size.width,
                rect.size.height,
                rect.top_left.x,
                rect.top_left.y
            ))
        }
    }

    // ── Screenshots ──────────────────────────────────────────────────────────

    /// Writes the frame as PNG.
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }

    fn to_image(&self) -> image::RgbImage {
        let (width, height) = (self.width(), self.height());
        image::RgbImage::from_fn(width, height, |x, y| {
            let point = Point::new(
                i32::try_from(x).unwrap_or(i32::MAX),
                i32::try_from(y).unwrap_or(i32::MAX),
            );
            let color = self.frame.pixel(point).unwrap_or(Rgb888::BLACK);
            image::Rgb([color.r(), color.g(), color.b()])
        })
    }

    /// Compares the frame against a golden PNG.
    ///
    /// `threshold` is the per-channel difference tolerated before a pixel
    /// counts as changed. With `UPDATE_GOLDEN` set, the golden file is
    /// (re)written instead.
    pub fn assert_matches_golden(&self, golden_path: impl AsRef<Path>, threshold: u8) -> Result<(), String> {
        let golden_path = golden_path.as_ref();

        if std::env::var("UPDATE_GOLDEN").is_ok() {
            if let Some(dir) = golden_path.parent() {
                std::fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
            }
            return self
                .screenshot(golden_path)
                .map_err(|e| format!("Failed to save golden '{}': {e}", golden_path.display()));
        }

        let golden = image::open(golden_path)
            .map_err(|e| {
                format!(
                    "Failed to open golden '{}': {e}\nRun with UPDATE_GOLDEN=1 to create it.",
                    golden_path.display()
                )
            })?
            .to_rgb8();
        let current = self.to_image();

        if current.dimensions() != golden.dimensions() {
            let (cw, ch) = current.dimensions();
            let (gw, gh) = golden.dimensions();
            return Err(format!("Dimension mismatch: frame is {cw}×{ch}, golden is {gw}×{gh}"));
        }

        let diff_pixels = current
            .pixels()
            .zip(golden.pixels())
            .filter(|(a, b)| a.0.iter().zip(b.0.iter()).any(|(x, y)| x.abs_diff(*y) > threshold))
            .count();
        if diff_pixels == 0 {
            Ok(())
        } else {
            Err(format!(
                "{diff_pixels} pixels differ from golden '{}'",
                golden_path.display()
            ))
        }
    }
}

fn hex(color: Rgb888) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
