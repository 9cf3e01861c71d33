//! Input device abstraction

use embedded_graphics::prelude::Point;

/// Kind of physical input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Touch or mouse pointer.
    Pointer,
    /// Scroll wheel or encoder.
    Wheel,
    /// Keypad or keyboard.
    Keyboard,
}

impl InputKind {
    /// Lowercase name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            InputKind::Pointer => "pointer",
            InputKind::Wheel => "wheel",
            InputKind::Keyboard => "keyboard",
        }
    }
}

/// Navigation keys understood by focus groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Confirm / activate.
    Enter,
    /// Cancel / back.
    Escape,
    /// Move focus forward.
    Next,
    /// Move focus backward.
    Prev,
}

/// Events produced by input devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer state in display coordinates.
    Pointer {
        /// Position on the display.
        position: Point,
        /// Whether the button or finger is down.
        pressed: bool,
    },
    /// Wheel steps (positive = towards the end of the content).
    Wheel(i32),
    /// Key transition.
    Key {
        /// Logical key.
        key: Key,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
}

impl InputEvent {
    /// Device kind that produces this event.
    pub const fn kind(&self) -> InputKind {
        match self {
            InputEvent::Pointer { .. } => InputKind::Pointer,
            InputEvent::Wheel(_) => InputKind::Wheel,
            InputEvent::Key { .. } => InputKind::Keyboard,
        }
    }
}

/// A source of input events, polled once per tick.
pub trait InputDevice {
    /// What kind of device this is.
    fn kind(&self) -> InputKind;

    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl<T: InputDevice + ?Sized> InputDevice for Box<T> {
    fn kind(&self) -> InputKind {
        (**self).kind()
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        (**self).poll_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind() {
        assert_eq!(InputEvent::Wheel(1).kind(), InputKind::Wheel);
        assert_eq!(
            InputEvent::Key {
                key: Key::Enter,
                pressed: true
            }
            .kind(),
            InputKind::Keyboard
        );
        assert_eq!(
            InputEvent::Pointer {
                position: Point::zero(),
                pressed: false
            }
            .kind(),
            InputKind::Pointer
        );
    }
}
