//! Image sources and the asset resolution boundary.
//!
//! Image nodes refer to their pixels through an [`ImageSource`]. Built-in
//! sources are drawn procedurally by the renderer; path sources go through an
//! [`AssetResolver`], which may fail to find them. A missing asset is never an
//! error for the tree: the renderer draws a placeholder instead.

use std::collections::HashMap;
use std::fmt;

use embedded_graphics::pixelcolor::Rgb888;
use thiserror::Error;

/// Images every build ships without a resource directory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinImage {
    /// Forward-navigation chevron (">").
    Forward,
    /// Mouse cursor arrow.
    Cursor,
}

impl BuiltinImage {
    /// Stable name used in logs and identifiers.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinImage::Forward => "forward",
            BuiltinImage::Cursor => "cursor",
        }
    }
}

/// Opaque reference to an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Resource identifier such as `/res/WLAN.png`.
    Path(String),
    /// Procedurally drawn image.
    Builtin(BuiltinImage),
}

impl ImageSource {
    /// Creates a path source.
    pub fn path(path: impl Into<String>) -> Self {
        ImageSource::Path(path.into())
    }

    /// Returns the path for path sources.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            ImageSource::Path(path) => Some(path),
            ImageSource::Builtin(_) => None,
        }
    }

    /// Returns `true` for procedurally drawn sources.
    pub fn is_builtin(&self) -> bool {
        matches!(self, ImageSource::Builtin(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => f.write_str(path),
            ImageSource::Builtin(image) => write!(f, "builtin:{}", image.name()),
        }
    }
}

/// Asset loading failures.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The identifier does not name a file under the resource root.
    #[error("asset {identifier} not found under {root}")]
    NotFound {
        /// Requested identifier.
        identifier: String,
        /// Directory that was searched.
        root: String,
    },

    /// The identifier is not a resource path.
    #[error("unsupported asset identifier {0}")]
    UnsupportedIdentifier(String),

    /// The file exists but could not be decoded.
    #[error("failed to decode {identifier}: {message}")]
    Decode {
        /// Requested identifier.
        identifier: String,
        /// Decoder message.
        message: String,
    },

    /// Raw pixel buffer length does not match the stated dimensions.
    #[error("pixel buffer of {actual} bytes does not match {width}x{height} RGBA")]
    BufferSize {
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
        /// Actual byte count.
        actual: usize,
    },
}

/// Decoded RGBA image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl ImageData {
    /// Wraps a tightly packed RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4));
        if expected != Some(rgba.len()) {
            return Err(AssetError::BufferSize {
                width,
                height,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// An opaque image filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgb888) -> Self {
        use embedded_graphics::pixelcolor::RgbColor;
        let count = (width as usize).saturating_mul(height as usize);
        let rgba = [color.r(), color.g(), color.b(), 0xff].repeat(count);
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color and alpha at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(Rgb888, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(offset..offset + 4)?;
        match *px {
            [r, g, b, a] => Some((Rgb888::new(r, g, b), a)),
            _ => None,
        }
    }

    /// Nearest-neighbor sample when the image is stretched to `target` size.
    pub fn sample(&self, x: u32, y: u32, target_width: u32, target_height: u32) -> Option<(Rgb888, u8)> {
        if target_width == 0 || target_height == 0 {
            return None;
        }
        let sx = u64::from(x) * u64::from(self.width) / u64::from(target_width);
        let sy = u64::from(y) * u64::from(self.height) / u64::from(target_height);
        self.pixel(u32::try_from(sx).ok()?, u32::try_from(sy).ok()?)
    }
}

/// Resolves image sources to decoded pixels.
///
/// Implementations may cache. Returning `None` means the asset is missing;
/// callers draw a placeholder and carry on.
pub trait AssetResolver {
    /// Looks up the pixels for `source`.
    fn resolve(&mut self, source: &ImageSource) -> Option<&ImageData>;
}

/// Resolver that knows no assets. Every path renders as a placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn resolve(&mut self, _source: &ImageSource) -> Option<&ImageData> {
        None
    }
}

/// In-memory resolver keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    images: HashMap<String, ImageData>,
}

impl MemoryAssets {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image under `path`, replacing any previous one.
    pub fn insert(&mut self, path: impl Into<String>, image: ImageData) {
        self.images.insert(path.into(), image);
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` when no images are registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetResolver for MemoryAssets {
    fn resolve(&mut self, source: &ImageSource) -> Option<&ImageData> {
        self.images.get(source.as_path()?)
    }
}

impl<R: AssetResolver + ?Sized> AssetResolver for &mut R {
    fn resolve(&mut self, source: &ImageSource) -> Option<&ImageData> {
        (**self).resolve(source)
    }
}
