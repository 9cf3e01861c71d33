//! Touch Panel Emulator
//!
//! Desktop stand-in for a 480×480 touch panel.
//!
//! - Window management (winit + softbuffer), integer upscaling
//! - Pointer, wheel and keyboard devices fed from window events
//! - Filesystem image resolver for `/res/...` icons
//! - Headless mode for CI and PNG screenshots
//!
//! # Example
//!
//! ```no_run
//! use platform::DisplaySurface;
//! use touch_emulator::{Emulator, EmulatorConfig};
//! use touch_system::framebuffer::Framebuffer;
//!
//! # fn example() -> Result<(), touch_emulator::EmulatorError> {
//! let mut emulator = Emulator::new(480, 480, EmulatorConfig::DOUBLE)?;
//! let frame = Framebuffer::new(480, 480);
//! emulator.present(&frame)?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::print_stdout)]

pub mod assets;
pub mod config;
pub mod input;

#[cfg(not(feature = "headless"))]
mod window;

pub use assets::FsAssetResolver;
pub use config::EmulatorConfig;
pub use input::{EmulatorInput, InputQueue};

use std::path::Path;
use std::time::Duration;

use embedded_graphics::prelude::Size;
use platform::display::check_frame_size;
use platform::{DisplaySurface, InputEvent, InputKind, SurfaceError, SurfaceStatus};
use thiserror::Error;
use touch_system::framebuffer::Framebuffer;

/// Emulator failures.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// Window or presentation failure.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Screenshot encoding or file failure.
    #[error("screenshot failed: {0}")]
    Image(#[from] image::ImageError),

    /// The framebuffer could not be wrapped as an image.
    #[error("framebuffer of {width}x{height} could not be converted to an image")]
    Buffer {
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
    },
}

/// Desktop panel emulator.
///
/// Keeps a copy of the last presented frame, so headless runs can still be
/// inspected and screenshotted.
pub struct Emulator {
    frame: Framebuffer,
    queue: InputQueue,
    config: EmulatorConfig,
    #[cfg(not(feature = "headless"))]
    window: Option<window::Window>,
}

impl Emulator {
    /// Opens a window for a `width`×`height` panel.
    ///
    /// With the `headless` feature this is the same as [`Emulator::headless`].
    pub fn new(width: u32, height: u32, config: EmulatorConfig) -> Result<Self, EmulatorError> {
        #[cfg(not(feature = "headless"))]
        {
            let queue = InputQueue::new();
            let window = window::Window::new(
                width,
                height,
                &platform::config::app_title(),
                &config,
                queue.clone(),
            )?;
            Ok(Self {
                frame: Framebuffer::new(width, height),
                queue,
                config,
                window: Some(window),
            })
        }

        #[cfg(feature = "headless")]
        {
            let mut emulator = Self::headless(width, height);
            emulator.config = config;
            Ok(emulator)
        }
    }

    /// Create headless emulator (for testing/CI)
    pub fn headless(width: u32, height: u32) -> Self {
        tracing::debug!(width, height, "headless emulator");
        Self {
            frame: Framebuffer::new(width, height),
            queue: InputQueue::new(),
            config: EmulatorConfig::default(),
            #[cfg(not(feature = "headless"))]
            window: None,
        }
    }

    /// `true` when no window is attached.
    pub fn is_headless(&self) -> bool {
        #[cfg(not(feature = "headless"))]
        {
            self.window.is_none()
        }
        #[cfg(feature = "headless")]
        {
            true
        }
    }

    /// Presentation settings.
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Pointer device fed by mouse motion and the left button.
    pub fn pointer(&self) -> EmulatorInput {
        self.queue.device(InputKind::Pointer)
    }

    /// Wheel device fed by the mouse wheel or touchpad scroll.
    pub fn wheel(&self) -> EmulatorInput {
        self.queue.device(InputKind::Wheel)
    }

    /// Keyboard device.
    pub fn keyboard(&self) -> EmulatorInput {
        self.queue.device(InputKind::Keyboard)
    }

    /// Queues `event` as if it came from the window.
    pub fn inject(&self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Last presented frame.
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    /// Save screenshot to PNG (for testing)
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), EmulatorError> {
        let (width, height) = (self.frame.width(), self.frame.height());
        let img = image::RgbImage::from_raw(width, height, self.frame.to_rgb_bytes())
            .ok_or(EmulatorError::Buffer { width, height })?;
        img.save(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "screenshot saved");
        Ok(())
    }
}

impl DisplaySurface for Emulator {
    fn size(&self) -> Size {
        Size::new(self.frame.width(), self.frame.height())
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        check_frame_size(frame, self.size())?;
        self.frame.clone_from(frame);

        #[cfg(not(feature = "headless"))]
        if let Some(window) = self.window.as_mut() {
            window.present(&self.frame)?;
        }
        Ok(())
    }

    /// In windowed mode the OS event loop is pumped for `timeout`; headless
    /// runs just sleep.
    fn pump(&mut self, timeout: Duration) -> SurfaceStatus {
        #[cfg(not(feature = "headless"))]
        if let Some(window) = self.window.as_mut() {
            return window.pump_events(timeout);
        }

        if !timeout.is_zero() {
            std::thread::sleep(timeout);
        }
        SurfaceStatus::Open
    }
}
