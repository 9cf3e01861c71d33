//! Software renderer that draws a laid out [`NodeTree`] into a [`Framebuffer`].
//!
//! # Draw order
//!
//! Nodes are painted in tree order (parents before children, siblings in
//! child order). Each node paints:
//!
//! 1. background (rounded rectangle, opacity blended)
//! 2. border, when [`BorderOrder::BeforeContent`]
//! 3. own content (label text or image)
//! 4. children
//! 5. border, when [`BorderOrder::AfterContent`]
//!
//! Every node is clipped to the visible part of its parent, so scrolled-out
//! rows and over-long labels never bleed past their container.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    ContainsPoint, Line, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle,
    RoundedRectangle, StrokeAlignment, Triangle,
};
use embedded_graphics::text::{Baseline, Text};

use crate::asset::{AssetResolver, BuiltinImage, ImageData, ImageSource};
use crate::framebuffer::Framebuffer;
use crate::layout::LayoutMap;
use crate::style::{BorderOrder, FontSize, Style};
use crate::tree::{NodeId, NodeKind, NodeTree};

/// Fill color of the missing-asset tile.
pub const PLACEHOLDER_FILL: Rgb888 = Rgb888::new(0x30, 0x30, 0x30);
/// Stroke color of the missing-asset cross.
pub const PLACEHOLDER_CROSS: Rgb888 = Rgb888::new(0x80, 0x80, 0x80);
/// Box the built-in cursor is drawn into.
pub const CURSOR_SIZE: Size = Size::new(12, 18);

/// Counters from one render pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Nodes that produced at least a clip-visible box.
    pub nodes_drawn: usize,
    /// Image nodes drawn as missing-asset placeholders.
    pub placeholders: usize,
}

/// Draws node trees into framebuffers.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    clear_color: Rgb888,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Renderer clearing to black.
    pub const fn new() -> Self {
        Self {
            clear_color: Rgb888::BLACK,
        }
    }

    /// Color the frame is cleared to before drawing.
    pub const fn clear_color(mut self, color: Rgb888) -> Self {
        self.clear_color = color;
        self
    }

    /// Clears `target` and paints the whole tree.
    pub fn render(
        &self,
        tree: &NodeTree,
        layout: &LayoutMap,
        target: &mut Framebuffer,
        assets: &mut dyn AssetResolver,
    ) -> RenderStats {
        target.fill(self.clear_color);
        let mut stats = RenderStats::default();
        let viewport = target.bounding_box();
        self.render_node(tree, layout, tree.root(), viewport, target, assets, &mut stats);
        tracing::trace!(
            nodes = stats.nodes_drawn,
            placeholders = stats.placeholders,
            "frame rendered"
        );
        stats
    }

    #[allow(clippy::too_many_arguments)]
    fn render_node(
        &self,
        tree: &NodeTree,
        layout: &LayoutMap,
        id: NodeId,
        clip: Rectangle,
        target: &mut Framebuffer,
        assets: &mut dyn AssetResolver,
        stats: &mut RenderStats,
    ) {
        let (Some(rect), Some(style), Some(kind)) = (layout.rect(id), tree.style(id), tree.kind(id))
        else {
            return;
        };
        let visible = rect.intersection(&clip);
        if visible.size.width == 0 || visible.size.height == 0 {
            return;
        }
        stats.nodes_drawn += 1;

        draw_background(target, rect, style, clip);
        if style.border.order == BorderOrder::BeforeContent {
            draw_border(target, rect, style, clip);
        }

        match kind {
            NodeKind::Container => {}
            NodeKind::Label { text } => draw_label(target, rect, style, text, visible),
            NodeKind::Image { source } => {
                if !draw_image(target, rect, style, source, visible, assets) {
                    stats.placeholders += 1;
                }
            }
        }

        for child in tree.children(id) {
            self.render_node(tree, layout, *child, visible, target, assets, stats);
        }

        if style.border.order == BorderOrder::AfterContent {
            draw_border(target, rect, style, clip);
        }
    }

    /// Draws the pointer cursor with its top-left corner at `position`.
    pub fn draw_cursor(
        &self,
        target: &mut Framebuffer,
        source: &ImageSource,
        position: Point,
        assets: &mut dyn AssetResolver,
    ) {
        let size = match source {
            ImageSource::Builtin(_) => CURSOR_SIZE,
            ImageSource::Path(_) => assets
                .resolve(source)
                .map_or(CURSOR_SIZE, |image| Size::new(image.width(), image.height())),
        };
        let rect = Rectangle::new(position, size);
        let viewport = target.bounding_box();
        draw_image(target, rect, &Style::new(), source, viewport, assets);
    }
}

/// Unwraps results of draw targets that cannot fail.
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

fn rounded(rect: Rectangle, style: &Style) -> RoundedRectangle {
    let r = style.radius.resolve(rect.size);
    RoundedRectangle::with_equal_corners(rect, Size::new(r, r))
}

fn draw_background(target: &mut Framebuffer, rect: Rectangle, style: &Style, clip: Rectangle) {
    let Some(color) = style.background else {
        return;
    };
    if !style.has_visible_background() {
        return;
    }
    let mut blend = Blend::new(target, style.bg_opacity.0);
    infallible(
        rounded(rect, style)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut blend.clipped(&clip)),
    );
}

fn draw_border(target: &mut Framebuffer, rect: Rectangle, style: &Style, clip: Rectangle) {
    let border = style.border;
    if !border.is_visible() {
        return;
    }
    let stroke = PrimitiveStyleBuilder::new()
        .stroke_color(border.color)
        .stroke_width(border.width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    let mut blend = Blend::new(target, border.opacity.0);
    infallible(
        rounded(rect, style)
            .into_styled(stroke)
            .draw(&mut blend.clipped(&clip)),
    );
}

fn mono_font(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => &FONT_6X10,
        FontSize::Medium | FontSize::Large => &FONT_10X20,
    }
}

fn draw_label(target: &mut Framebuffer, rect: Rectangle, style: &Style, text: &str, visible: Rectangle) {
    if text.is_empty() {
        return;
    }
    let text_style = MonoTextStyle::new(mono_font(style.font), style.text_color);
    let mut clipped = target.clipped(&visible);
    let scale = style.font.scale();
    if scale > 1 {
        let mut scaled = Scaled::new(&mut clipped, rect.top_left, scale);
        infallible(Text::with_baseline(text, Point::zero(), text_style, Baseline::Top).draw(&mut scaled));
    } else {
        infallible(Text::with_baseline(text, rect.top_left, text_style, Baseline::Top).draw(&mut clipped));
    }
}

/// Draws an image node's content. Returns `false` when a placeholder was drawn.
fn draw_image(
    target: &mut Framebuffer,
    rect: Rectangle,
    style: &Style,
    source: &ImageSource,
    visible: Rectangle,
    assets: &mut dyn AssetResolver,
) -> bool {
    let mask = style.clip_corners.then(|| rounded(rect, style));
    if let ImageSource::Path(_) = source {
        if let Some(image) = assets.resolve(source) {
            blit_image(target, rect, image, mask, visible);
            return true;
        }
    }

    let mut clipped = target.clipped(&visible);
    let mut masked = Masked::new(&mut clipped, mask);
    match source {
        ImageSource::Builtin(BuiltinImage::Forward) => {
            draw_forward(&mut masked, rect, style.text_color);
            true
        }
        ImageSource::Builtin(BuiltinImage::Cursor) => {
            draw_cursor_arrow(&mut masked, rect);
            true
        }
        ImageSource::Path(_) => {
            draw_placeholder(&mut masked, rect);
            false
        }
    }
}

/// Stretches `image` over `rect`, honoring per-pixel alpha.
fn blit_image(
    target: &mut Framebuffer,
    rect: Rectangle,
    image: &ImageData,
    mask: Option<RoundedRectangle>,
    visible: Rectangle,
) {
    let (width, height) = (rect.size.width, rect.size.height);
    for y in 0..height {
        for x in 0..width {
            let point = rect.top_left + Point::new(coord(x), coord(y));
            if !visible.contains(point) || !mask.map_or(true, |m| m.contains(point)) {
                continue;
            }
            if let Some((color, alpha)) = image.sample(x, y, width, height) {
                target.blend_pixel(point, color, alpha);
            }
        }
    }
}

fn coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Dark tile with a diagonal cross.
fn draw_placeholder<D>(target: &mut D, rect: Rectangle)
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    infallible(rect.into_styled(PrimitiveStyle::with_fill(PLACEHOLDER_FILL)).draw(target));
    let Some(bottom_right) = rect.bottom_right() else {
        return;
    };
    let cross = PrimitiveStyle::with_stroke(PLACEHOLDER_CROSS, 2);
    let top_right = Point::new(bottom_right.x, rect.top_left.y);
    let bottom_left = Point::new(rect.top_left.x, bottom_right.y);
    infallible(Line::new(rect.top_left, bottom_right).into_styled(cross).draw(target));
    infallible(Line::new(top_right, bottom_left).into_styled(cross).draw(target));
}

/// Right-pointing chevron centered in `rect`.
fn draw_forward<D>(target: &mut D, rect: Rectangle, color: Rgb888)
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    let w = coord(rect.size.width);
    let h = coord(rect.size.height);
    let stroke = (rect.size.width.min(rect.size.height) / 8).max(2);
    let points = [
        rect.top_left + Point::new(w * 3 / 8, h / 4),
        rect.top_left + Point::new(w * 5 / 8, h / 2),
        rect.top_left + Point::new(w * 3 / 8, h * 3 / 4),
    ];
    infallible(
        Polyline::new(&points)
            .into_styled(PrimitiveStyle::with_stroke(color, stroke))
            .draw(target),
    );
}

/// Classic arrow pointer: white fill, black outline.
fn draw_cursor_arrow<D>(target: &mut D, rect: Rectangle)
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    let w = coord(rect.size.width);
    let h = coord(rect.size.height);
    let arrow = Triangle::new(
        rect.top_left,
        rect.top_left + Point::new(0, h - 1),
        rect.top_left + Point::new(w - 1, h * 2 / 3),
    );
    let style = PrimitiveStyleBuilder::new()
        .fill_color(Rgb888::WHITE)
        .stroke_color(Rgb888::BLACK)
        .stroke_width(1)
        .build();
    infallible(arrow.into_styled(style).draw(target));
}

/// Draw target adapter that mixes every pixel over the framebuffer with a fixed opacity.
struct Blend<'a> {
    target: &'a mut Framebuffer,
    opacity: u8,
}

impl<'a> Blend<'a> {
    fn new(target: &'a mut Framebuffer, opacity: u8) -> Self {
        Self { target, opacity }
    }
}

impl DrawTarget for Blend<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.target.blend_pixel(point, color, self.opacity);
        }
        Ok(())
    }
}

impl OriginDimensions for Blend<'_> {
    fn size(&self) -> Size {
        self.target.size()
    }
}

/// Draw target adapter that drops pixels outside a rounded mask.
struct Masked<'a, T> {
    target: &'a mut T,
    mask: Option<RoundedRectangle>,
}

impl<'a, T> Masked<'a, T> {
    fn new(target: &'a mut T, mask: Option<RoundedRectangle>) -> Self {
        Self { target, mask }
    }
}

impl<T> DrawTarget for Masked<'_, T>
where
    T: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mask = self.mask;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(move |Pixel(point, _)| mask.map_or(true, |m| m.contains(*point))),
        )
    }
}

impl<T: Dimensions> Dimensions for Masked<'_, T> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

/// Draw target adapter that magnifies every incoming pixel into a `scale`×`scale` block.
///
/// Incoming coordinates are local to `origin`.
struct Scaled<'a, T> {
    target: &'a mut T,
    origin: Point,
    scale: u32,
}

impl<'a, T> Scaled<'a, T> {
    fn new(target: &'a mut T, origin: Point, scale: u32) -> Self {
        Self {
            target,
            origin,
            scale: scale.max(1),
        }
    }
}

impl<T> DrawTarget for Scaled<'_, T>
where
    T: DrawTarget<Color = Rgb888>,
{
    type Color = Rgb888;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let scale = coord(self.scale);
        let block = Size::new(self.scale, self.scale);
        for Pixel(point, color) in pixels {
            let base = self.origin + point * scale;
            self.target.fill_solid(&Rectangle::new(base, block), color)?;
        }
        Ok(())
    }
}

impl<T: Dimensions> Dimensions for Scaled<'_, T> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        Rectangle::new(Point::zero(), outer.size / self.scale)
    }
}
