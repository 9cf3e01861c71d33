//! Display surface abstraction

use core::time::Duration;

use embedded_graphics::prelude::Size;
use thiserror::Error;
use touch_system::framebuffer::Framebuffer;

/// Whether the surface still accepts frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    /// Keep ticking.
    Open,
    /// The user closed the window or the device went away.
    Closed,
}

/// Display surface errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Frame dimensions differ from the surface.
    #[error("frame is {frame_width}x{frame_height}, surface is {surface_width}x{surface_height}")]
    SizeMismatch {
        /// Frame width.
        frame_width: u32,
        /// Frame height.
        frame_height: u32,
        /// Surface width.
        surface_width: u32,
        /// Surface height.
        surface_height: u32,
    },
    /// The surface was closed.
    #[error("display surface is closed")]
    Closed,
    /// Windowing or presentation backend failure.
    #[error("display backend error: {0}")]
    Backend(String),
}

impl SurfaceError {
    /// Builds a [`SurfaceError::SizeMismatch`] from the two sizes.
    pub fn size_mismatch(frame: Size, surface: Size) -> Self {
        Self::SizeMismatch {
            frame_width: frame.width,
            frame_height: frame.height,
            surface_width: surface.width,
            surface_height: surface.height,
        }
    }
}

/// A fixed-resolution surface frames are presented on.
pub trait DisplaySurface {
    /// Native size in pixels.
    fn size(&self) -> Size;

    /// Shows `frame`. The frame must match [`size`](Self::size).
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError>;

    /// Processes pending platform events for at most `timeout`.
    fn pump(&mut self, timeout: Duration) -> SurfaceStatus;
}

/// Fails with [`SurfaceError::SizeMismatch`] unless `frame` matches `surface`.
pub fn check_frame_size(frame: &Framebuffer, surface: Size) -> Result<(), SurfaceError> {
    let frame_size = Size::new(frame.width(), frame.height());
    if frame_size == surface {
        Ok(())
    } else {
        Err(SurfaceError::size_mismatch(frame_size, surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_frame_size() {
        let frame = Framebuffer::new(480, 480);
        assert!(check_frame_size(&frame, Size::new(480, 480)).is_ok());
        assert_eq!(
            check_frame_size(&frame, Size::new(320, 240)),
            Err(SurfaceError::SizeMismatch {
                frame_width: 480,
                frame_height: 480,
                surface_width: 320,
                surface_height: 240,
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = SurfaceError::size_mismatch(Size::new(1, 2), Size::new(3, 4));
        assert_eq!(err.to_string(), "frame is 1x2, surface is 3x4");
        assert_eq!(SurfaceError::Closed.to_string(), "display surface is closed");
    }
}
