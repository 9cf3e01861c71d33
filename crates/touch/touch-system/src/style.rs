//! Styling system for touch layouts.
//!
//! This module provides CSS-inspired styling primitives for flexbox-based layouts.
//! A [`Style`] is a plain `Copy` value: every node receives its complete style
//! bundle when it is created, so there is no ordering between individual
//! property setters.
//!
//! # Core Types
//!
//! - [`Dimension`] - Size values (Auto, Px, Percent)
//! - [`Edges`] - Edge insets for margins/padding (top, right, bottom, left)
//! - [`FlexDirection`] - Flexbox main axis direction
//! - [`Justify`] - Main axis alignment
//! - [`Align`] - Cross axis alignment
//! - [`Radius`] - Corner rounding
//! - [`Border`] - Border stroke and its draw order
//! - [`FontSize`] - Text scale
//! - [`Style`] - Complete styling configuration
//!
//! # Example
//!
//! ```
//! use touch_system::style::*;
//! use embedded_graphics::pixelcolor::Rgb888;
//!
//! let pill = Style::new()
//!     .width(Dimension::Percent(80.0))
//!     .flex_direction(FlexDirection::Row)
//!     .justify_content(Justify::SpaceBetween)
//!     .align_items(Align::Center)
//!     .background(Rgb888::new(0x66, 0x66, 0x66))
//!     .radius(Radius::Px(40));
//!
//! assert_eq!(pill.bg_opacity, Opacity::COVER);
//! assert!(pill.height.is_auto());
//! ```

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Size dimension with support for automatic sizing, pixels, and percentages.
///
/// # Examples
///
/// ```
/// use touch_system::style::Dimension;
///
/// let auto = Dimension::Auto;
/// let fixed = Dimension::Px(100);
/// let responsive = Dimension::Percent(50.0);
///
/// // Resolve to concrete pixel value
/// assert_eq!(auto.resolve(200), 0);
/// assert_eq!(fixed.resolve(200), 100);
/// assert_eq!(responsive.resolve(200), 100);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Dimension {
    /// Size follows the content.
    #[default]
    Auto,

    /// Fixed pixel size.
    Px(u32),

    /// Percentage of the parent's content box (0.0 to 100.0).
    Percent(f32),
}

impl Dimension {
    /// Resolves the dimension to a concrete pixel value.
    ///
    /// For `Auto`, returns 0 (caller must compute based on content).
    ///
    /// ```
    /// use touch_system::style::Dimension;
    ///
    /// assert_eq!(Dimension::Px(50).resolve(100), 50);
    /// assert_eq!(Dimension::Percent(80.0).resolve(480), 384);
    /// assert_eq!(Dimension::Auto.resolve(100), 0);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resolve(self, available_space: u32) -> u32 {
        match self {
            Dimension::Auto => 0,
            Dimension::Px(px) => px,
            Dimension::Percent(pct) => {
                let pct = pct.clamp(0.0, 100.0);
                (f64::from(available_space) * f64::from(pct) / 100.0) as u32
            }
        }
    }

    /// Returns `true` if this dimension is `Auto`.
    pub fn is_auto(self) -> bool {
        matches!(self, Dimension::Auto)
    }

    /// Returns `true` if this dimension is a fixed pixel value.
    pub fn is_fixed(self) -> bool {
        matches!(self, Dimension::Px(_))
    }

    /// Returns `true` if this dimension is a percentage.
    pub fn is_percent(self) -> bool {
        matches!(self, Dimension::Percent(_))
    }
}

/// Edge insets for margins and padding.
///
/// Follows CSS box model convention: top, right, bottom, left.
///
/// ```
/// use touch_system::style::Edges;
///
/// let hv = Edges::horizontal_vertical(24, 12);
/// assert_eq!(hv.left, 24);
/// assert_eq!(hv.top, 12);
/// assert_eq!(hv.horizontal(), 48);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Edges {
    /// Top edge inset in pixels.
    pub top: u32,

    /// Right edge inset in pixels.
    pub right: u32,

    /// Bottom edge inset in pixels.
    pub bottom: u32,

    /// Left edge inset in pixels.
    pub left: u32,
}

impl Edges {
    /// No inset on any side.
    pub const ZERO: Self = Self::all(0);

    /// Creates edges with all sides set to the same value.
    pub const fn all(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Creates edges with individual values for each side.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates edges with separate horizontal and vertical values.
    pub const fn horizontal_vertical(horizontal: u32, vertical: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Only the top and bottom edges.
    pub const fn vertical_only(value: u32) -> Self {
        Self::new(value, 0, value, 0)
    }

    /// Only the left edge.
    pub const fn left_only(value: u32) -> Self {
        Self::new(0, 0, 0, value)
    }

    /// Only the right edge.
    pub const fn right_only(value: u32) -> Self {
        Self::new(0, value, 0, 0)
    }

    /// Returns the total horizontal space (left + right).
    pub const fn horizontal(self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Returns the total vertical space (top + bottom).
    pub const fn vertical(self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

/// Flexbox direction defining the main axis.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FlexDirection {
    /// Horizontal layout, left to right.
    #[default]
    Row,

    /// Vertical layout, top to bottom.
    Column,
}

impl FlexDirection {
    /// Returns `true` if this is a row direction.
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row)
    }

    /// Returns `true` if this is a column direction.
    pub fn is_column(self) -> bool {
        matches!(self, FlexDirection::Column)
    }
}

/// Main axis alignment (justify-content in CSS).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Justify {
    /// Pack children at the start of the main axis.
    #[default]
    Start,

    /// Pack children at the end of the main axis.
    End,

    /// Center children along the main axis.
    Center,

    /// First child at start, last child at end, equal spacing between.
    SpaceBetween,

    /// Equal spacing on both sides of each child. Edge spacing is half of inter-child spacing.
    SpaceAround,

    /// All spacing (edge and inter-child) is equal.
    SpaceEvenly,
}

/// Cross axis alignment (align-items in CSS).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Align {
    /// Align children at the start of the cross axis.
    #[default]
    Start,

    /// Align children at the end of the cross axis.
    End,

    /// Center children along the cross axis.
    Center,

    /// Stretch auto-sized children to fill the cross axis.
    Stretch,
}

/// Opacity from fully transparent (0) to fully covering (255).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Opacity(pub u8);

impl Opacity {
    /// Nothing is drawn.
    pub const TRANSPARENT: Self = Self(0);
    /// Fully opaque.
    pub const COVER: Self = Self(255);

    /// Returns `true` if drawing with this opacity has no visible effect.
    pub const fn is_transparent(self) -> bool {
        self.0 == 0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::COVER
    }
}

/// Corner rounding of a node's box.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Radius {
    /// Square corners.
    #[default]
    None,
    /// Fixed corner radius in pixels, clamped to half the shorter side.
    Px(u32),
    /// Half the shorter side: circles for square boxes, pills otherwise.
    Circle,
}

impl Radius {
    /// Resolves the radius for a box of the given size.
    ///
    /// ```
    /// use touch_system::style::Radius;
    /// use embedded_graphics::prelude::Size;
    ///
    /// assert_eq!(Radius::Circle.resolve(Size::new(64, 64)), 32);
    /// assert_eq!(Radius::Px(40).resolve(Size::new(384, 60)), 30);
    /// ```
    pub fn resolve(self, size: embedded_graphics::prelude::Size) -> u32 {
        let half = size.width.min(size.height) / 2;
        match self {
            Radius::None => 0,
            Radius::Px(px) => px.min(half),
            Radius::Circle => half,
        }
    }
}

/// When a node's border is drawn relative to its content.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BorderOrder {
    /// Border first; image or text content may cover it.
    #[default]
    BeforeContent,
    /// Border after the content, so the content never occludes it.
    AfterContent,
}

/// Border stroke drawn inside the node's box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Border {
    /// Stroke width in pixels (0 = no border).
    pub width: u32,
    /// Stroke color.
    pub color: Rgb888,
    /// Stroke opacity.
    pub opacity: Opacity,
    /// Draw order relative to content.
    pub order: BorderOrder,
}

impl Border {
    /// No border.
    pub const NONE: Self = Self {
        width: 0,
        color: Rgb888::BLACK,
        opacity: Opacity::COVER,
        order: BorderOrder::BeforeContent,
    };

    /// Returns `true` if the border produces visible pixels.
    pub const fn is_visible(&self) -> bool {
        self.width > 0 && !self.opacity.is_transparent()
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::NONE
    }
}

/// Text scale used by label nodes.
///
/// Glyphs come from the embedded-graphics ASCII mono fonts; `Large` is the
/// 10x20 font drawn at twice the size.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FontSize {
    /// 6x10 font.
    Small,
    /// 10x20 font.
    #[default]
    Medium,
    /// 10x20 font, 2x scaled.
    Large,
}

impl FontSize {
    /// Height of one text line in pixels.
    pub fn line_height(self) -> u32 {
        match self {
            FontSize::Small => 10,
            FontSize::Medium => 20,
            FontSize::Large => 40,
        }
    }

    /// Advance width of one character in pixels.
    pub fn char_width(self) -> u32 {
        match self {
            FontSize::Small => 6,
            FontSize::Medium => 10,
            FontSize::Large => 20,
        }
    }

    /// Integer upscaling applied when drawing glyphs.
    pub fn scale(self) -> u32 {
        match self {
            FontSize::Large => 2,
            FontSize::Small | FontSize::Medium => 1,
        }
    }
}

/// Complete style bundle for a node.
///
/// Contains all properties needed for flexbox layout calculation and rendering.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    /// Width of the element's box.
    pub width: Dimension,

    /// Height of the element's box.
    pub height: Dimension,

    /// Margin (outer spacing).
    pub margin: Edges,

    /// Padding (inner spacing).
    pub padding: Edges,

    /// Flexbox direction (main axis) used for this node's children.
    pub flex_direction: FlexDirection,

    /// Main axis alignment of children.
    pub justify_content: Justify,

    /// Cross axis alignment of children.
    pub align_items: Align,

    /// Gap between children in pixels.
    pub gap: u32,

    /// Flex grow factor (share of leftover space in the parent).
    pub flex_grow: f32,

    /// Flex shrink factor (share of overflow absorbed in the parent).
    pub flex_shrink: f32,

    /// Background color (optional).
    pub background: Option<Rgb888>,

    /// Background opacity.
    pub bg_opacity: Opacity,

    /// Corner rounding.
    pub radius: Radius,

    /// Clip image content to the rounded corners.
    pub clip_corners: bool,

    /// Border stroke.
    pub border: Border,

    /// Text color for labels and tint for built-in glyph images.
    pub text_color: Rgb888,

    /// Font scale for labels.
    pub font: FontSize,
}

impl Style {
    /// Creates a new style with all default values: transparent, auto-sized,
    /// row flow, no margins.
    pub const fn new() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            flex_direction: FlexDirection::Row,
            justify_content: Justify::Start,
            align_items: Align::Start,
            gap: 0,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            background: None,
            bg_opacity: Opacity::COVER,
            radius: Radius::None,
            clip_corners: false,
            border: Border::NONE,
            text_color: Rgb888::WHITE,
            font: FontSize::Medium,
        }
    }

    /// Builder method to set width and height together.
    pub const fn size(mut self, width: Dimension, height: Dimension) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder method to set width.
    pub const fn width(mut self, width: Dimension) -> Self {
        self.width = width;
        self
    }

    /// Builder method to set height.
    pub const fn height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    /// Builder method to set margin.
    pub const fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Builder method to set padding.
    pub const fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Builder method to set flex direction.
    pub const fn flex_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = direction;
        self
    }

    /// Builder method to set justify content.
    pub const fn justify_content(mut self, justify: Justify) -> Self {
        self.justify_content = justify;
        self
    }

    /// Builder method to set align items.
    pub const fn align_items(mut self, align: Align) -> Self {
        self.align_items = align;
        self
    }

    /// Builder method to set gap.
    pub const fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Builder method to set the grow factor.
    pub const fn flex_grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    /// Builder method to set the shrink factor.
    pub const fn flex_shrink(mut self, shrink: f32) -> Self {
        self.flex_shrink = shrink;
        self
    }

    /// Builder method to set an opaque background color.
    pub const fn background(mut self, background: Rgb888) -> Self {
        self.background = Some(background);
        self.bg_opacity = Opacity::COVER;
        self
    }

    /// Builder method to set background opacity.
    pub const fn bg_opacity(mut self, opacity: Opacity) -> Self {
        self.bg_opacity = opacity;
        self
    }

    /// Builder method to set corner rounding.
    pub const fn radius(mut self, radius: Radius) -> Self {
        self.radius = radius;
        self
    }

    /// Builder method to clip image content to the rounded corners.
    pub const fn clip_corners(mut self, clip: bool) -> Self {
        self.clip_corners = clip;
        self
    }

    /// Builder method to set the border.
    pub const fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Builder method to set text color.
    pub const fn text_color(mut self, color: Rgb888) -> Self {
        self.text_color = color;
        self
    }

    /// Builder method to set font size.
    pub const fn font(mut self, font: FontSize) -> Self {
        self.font = font;
        self
    }

    /// Returns `true` if the background produces visible pixels.
    pub fn has_visible_background(&self) -> bool {
        self.background.is_some() && !self.bg_opacity.is_transparent()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}
