//! Input device registration.
//!
//! An [`Indev`] wraps a device together with its bindings: whether its events
//! target the display, whether it drives the shared focus group, and which
//! cursor image follows it.

use touch_system::asset::ImageSource;

use crate::input::{InputDevice, InputEvent, InputKind};

/// A registered input device and its bindings.
pub struct Indev {
    device: Box<dyn InputDevice>,
    display_bound: bool,
    group_bound: bool,
    cursor: Option<ImageSource>,
}

impl core::fmt::Debug for Indev {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Indev")
            .field("kind", &self.device.kind())
            .field("display_bound", &self.display_bound)
            .field("group_bound", &self.group_bound)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl Indev {
    /// Registers `device` with no bindings.
    pub fn new(device: impl InputDevice + 'static) -> Self {
        Self {
            device: Box::new(device),
            display_bound: false,
            group_bound: false,
            cursor: None,
        }
    }

    /// Routes the device's events to the display.
    #[must_use]
    pub fn bind_display(mut self) -> Self {
        self.display_bound = true;
        self
    }

    /// Lets the device drive the shared focus group.
    #[must_use]
    pub fn bind_group(mut self) -> Self {
        self.group_bound = true;
        self
    }

    /// Draws `cursor` at the pointer position. Ignored for non-pointer devices.
    #[must_use]
    pub fn with_cursor(mut self, cursor: ImageSource) -> Self {
        if self.device.kind() == InputKind::Pointer {
            self.cursor = Some(cursor);
        } else {
            tracing::warn!(kind = self.device.kind().name(), "cursor ignored for non-pointer device");
        }
        self
    }

    /// Device kind.
    pub fn kind(&self) -> InputKind {
        self.device.kind()
    }

    /// Whether events reach the display.
    pub fn is_display_bound(&self) -> bool {
        self.display_bound
    }

    /// Whether the device drives the focus group.
    pub fn is_group_bound(&self) -> bool {
        self.group_bound
    }

    /// Cursor image, for pointer devices.
    pub fn cursor(&self) -> Option<&ImageSource> {
        self.cursor.as_ref()
    }

    /// Next event of a display-bound device. Unbound devices are still drained.
    pub fn poll(&mut self) -> Option<InputEvent> {
        loop {
            let event = self.device.poll_event()?;
            if self.display_bound {
                return Some(event);
            }
        }
    }
}
