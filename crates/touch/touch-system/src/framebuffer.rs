//! CPU framebuffer in 24-bit color.
//!
//! The renderer draws into a [`Framebuffer`]; display surfaces present it.
//! Unlike a write-only display, the framebuffer can be read back, which is
//! what opacity blending and pixel assertions in tests rely on.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;

/// Linear RGB pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Vec<Rgb888>,
    width: u32,
    height: u32,
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Framebuffer {
    /// Create new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb888::BLACK)
    }

    /// Create a framebuffer filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb888) -> Self {
        let count = (width as usize).saturating_mul(height as usize);
        Self {
            pixels: vec![color; count],
            width,
            height,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        self.index(x, y)
    }

    /// Get pixel at coordinates
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index_of(point).and_then(|idx| self.pixels.get(idx).copied())
    }

    /// Set pixel at coordinates; points outside the buffer are ignored.
    pub fn set_pixel(&mut self, point: Point, color: Rgb888) {
        if let Some(px) = self.index_of(point).and_then(|idx| self.pixels.get_mut(idx)) {
            *px = color;
        }
    }

    /// Mixes `color` over the existing pixel with the given opacity (0..=255).
    pub fn blend_pixel(&mut self, point: Point, color: Rgb888, opacity: u8) {
        match opacity {
            0 => {}
            255 => self.set_pixel(point, color),
            alpha => {
                if let Some(px) = self.index_of(point).and_then(|idx| self.pixels.get_mut(idx)) {
                    *px = mix(*px, color, alpha);
                }
            }
        }
    }

    /// Fill entire framebuffer with color.
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// Pixels packed as `0x00RRGGBB`, the layout window surfaces expect.
    pub fn to_xrgb(&self) -> Vec<u32> {
        self.pixels
            .iter()
            .map(|c| (u32::from(c.r()) << 16) | (u32::from(c.g()) << 8) | u32::from(c.b()))
            .collect()
    }

    /// Pixels packed as consecutive R, G, B bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r(), c.g(), c.b()])
            .collect()
    }

    /// Number of pixels equal to `color`.
    pub fn count_color(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|px| **px == color).count()
    }
}

/// Straight alpha blend of `top` over `bottom`.
pub fn mix(bottom: Rgb888, top: Rgb888, alpha: u8) -> Rgb888 {
    let channel = |b: u8, t: u8| {
        let a = u16::from(alpha);
        let value = (u16::from(t) * a + u16::from(b) * (255 - a) + 127) / 255;
        u8::try_from(value).unwrap_or(u8::MAX)
    };
    Rgb888::new(
        channel(bottom.r(), top.r()),
        channel(bottom.g(), top.g()),
        channel(bottom.b(), top.b()),
    )
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
