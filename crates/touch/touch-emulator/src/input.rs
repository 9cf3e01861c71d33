//! Pointer, wheel and keyboard input for the desktop emulator.
//!
//! - [`InputQueue`] is the producer side, fed by the window's event handler
//!   (or by [`Emulator::inject`](crate::Emulator::inject) in headless runs).
//! - [`EmulatorInput`] is the consumer side. One is created per device kind
//!   and it only yields events of that kind, so the pointer, wheel and
//!   keyboard devices can be polled independently.
//!
//! # Key mapping
//!
//! | Key(s)              | Key                 |
//! |---------------------|---------------------|
//! | ↑ ↓ ← →             | [`Key::Up`] etc.    |
//! | Enter, Space        | [`Key::Enter`]      |
//! | Esc, Backspace      | [`Key::Escape`]     |
//! | Tab                 | [`Key::Next`]       |
//! | Shift+Tab           | [`Key::Prev`]       |
//! | Scroll down         | `Wheel(+1)`         |
//! | Scroll up           | `Wheel(-1)`         |

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::prelude::Point;
use heapless::Deque;
use platform::{InputDevice, InputEvent, InputKind, Key};
use winit::keyboard::KeyCode;

/// Maximum number of unread events buffered per device kind.
///
/// New events are dropped while a queue is full.
pub const QUEUE_CAP: usize = 64;

#[derive(Default)]
struct Queues {
    pointer: Deque<InputEvent, QUEUE_CAP>,
    wheel: Deque<InputEvent, QUEUE_CAP>,
    keyboard: Deque<InputEvent, QUEUE_CAP>,
}

impl Queues {
    fn for_kind(&mut self, kind: InputKind) -> &mut Deque<InputEvent, QUEUE_CAP> {
        match kind {
            InputKind::Pointer => &mut self.pointer,
            InputKind::Wheel => &mut self.wheel,
            InputKind::Keyboard => &mut self.keyboard,
        }
    }
}

/// Producer half of the input pipe.
#[derive(Clone, Default)]
pub struct InputQueue {
    queues: Rc<RefCell<Queues>>,
}

impl InputQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event. Silently drops the event if its queue is full.
    pub fn push(&self, event: InputEvent) {
        let mut queues = self.queues.borrow_mut();
        if queues.for_kind(event.kind()).push_back(event).is_err() {
            tracing::debug!(kind = event.kind().name(), "input queue full, event dropped");
        }
    }

    /// Creates a consumer for events of `kind`.
    pub fn device(&self, kind: InputKind) -> EmulatorInput {
        EmulatorInput {
            kind,
            queues: Rc::clone(&self.queues),
        }
    }
}

/// Consumer half of the input pipe for one device kind.
///
/// Implements [`platform::InputDevice`], so the bootstrap registers it like
/// any other device.
pub struct EmulatorInput {
    kind: InputKind,
    queues: Rc<RefCell<Queues>>,
}

impl InputDevice for EmulatorInput {
    fn kind(&self) -> InputKind {
        self.kind
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queues.borrow_mut().for_kind(self.kind).pop_front()
    }
}

// ---------------------------------------------------------------------------
// Key / scroll / pointer mapping helpers
// ---------------------------------------------------------------------------

/// Map a physical key code and press/release state to an [`InputEvent`].
///
/// Returns `None` for keys that have no mapping.
pub fn map_key(code: KeyCode, pressed: bool, shift: bool) -> Option<InputEvent> {
    let key = match code {
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Key::Enter,
        KeyCode::Escape | KeyCode::Backspace => Key::Escape,
        KeyCode::Tab if shift => Key::Prev,
        KeyCode::Tab => Key::Next,
        _ => return None,
    };
    Some(InputEvent::Key { key, pressed })
}

/// Accumulate a scroll delta in lines and emit a [`Wheel`](InputEvent::Wheel)
/// event per whole step.
///
/// `delta` positive = scroll up / away from the user, which moves towards the
/// start of the content, so it yields negative wheel steps.
/// The fractional remainder is preserved in `acc` across calls.
#[allow(clippy::cast_possible_truncation)]
pub fn map_scroll(acc: &mut f64, delta: f64) -> Option<InputEvent> {
    *acc += delta;
    let steps = acc.trunc() as i32;
    if steps != 0 {
        *acc -= f64::from(steps);
        Some(InputEvent::Wheel(-steps))
    } else {
        None
    }
}

/// Converts a physical window position into display coordinates.
#[allow(clippy::cast_possible_truncation)]
pub fn map_pointer(x: f64, y: f64, scale: u32) -> Point {
    let scale = f64::from(scale.max(1));
    Point::new((x / scale).floor() as i32, (y / scale).floor() as i32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, pressed: bool) -> Option<InputEvent> {
        Some(InputEvent::Key { key, pressed })
    }

    #[test]
    fn map_key_arrows() {
        assert_eq!(map_key(KeyCode::ArrowUp, true, false), key(Key::Up, true));
        assert_eq!(map_key(KeyCode::ArrowDown, false, false), key(Key::Down, false));
        assert_eq!(map_key(KeyCode::ArrowLeft, true, false), key(Key::Left, true));
        assert_eq!(map_key(KeyCode::ArrowRight, true, false), key(Key::Right, true));
    }

    #[test]
    fn map_key_confirm_and_cancel() {
        assert_eq!(map_key(KeyCode::Enter, true, false), key(Key::Enter, true));
        assert_eq!(map_key(KeyCode::Space, true, false), key(Key::Enter, true));
        assert_eq!(map_key(KeyCode::Escape, true, false), key(Key::Escape, true));
        assert_eq!(map_key(KeyCode::Backspace, true, false), key(Key::Escape, true));
    }

    #[test]
    fn map_key_tab_respects_shift() {
        assert_eq!(map_key(KeyCode::Tab, true, false), key(Key::Next, true));
        assert_eq!(map_key(KeyCode::Tab, true, true), key(Key::Prev, true));
    }

    #[test]
    fn map_key_unmapped_returns_none() {
        assert_eq!(map_key(KeyCode::F1, true, false), None);
        assert_eq!(map_key(KeyCode::KeyM, true, false), None);
    }

    #[test]
    fn map_scroll_accumulates() {
        let mut acc = 0.0_f64;
        assert_eq!(map_scroll(&mut acc, -0.3), None);
        assert_eq!(map_scroll(&mut acc, -0.3), None);
        assert_eq!(map_scroll(&mut acc, -0.5), Some(InputEvent::Wheel(1)));
        // Remainder ~-0.1 is preserved
        assert!((acc + 0.1).abs() < 1e-9);
    }

    #[test]
    fn map_scroll_up_is_negative() {
        let mut acc = 0.0_f64;
        assert_eq!(map_scroll(&mut acc, 2.5), Some(InputEvent::Wheel(-2)));
        assert!((acc - 0.5).abs() < 1e-9);
    }

    #[test]
    fn map_pointer_divides_by_scale() {
        assert_eq!(map_pointer(200.0, 101.0, 2), Point::new(100, 50));
        assert_eq!(map_pointer(7.9, 3.2, 1), Point::new(7, 3));
        assert_eq!(map_pointer(7.0, 3.0, 0), Point::new(7, 3));
    }

    #[test]
    fn devices_only_see_their_own_kind() {
        let queue = InputQueue::new();
        let mut keyboard = queue.device(InputKind::Keyboard);
        let mut wheel = queue.device(InputKind::Wheel);

        queue.push(InputEvent::Wheel(3));
        queue.push(InputEvent::Key {
            key: Key::Down,
            pressed: true,
        });

        assert_eq!(keyboard.kind(), InputKind::Keyboard);
        assert_eq!(keyboard.poll_event(), key(Key::Down, true));
        assert_eq!(keyboard.poll_event(), None);
        assert_eq!(wheel.poll_event(), Some(InputEvent::Wheel(3)));
    }

    #[test]
    fn input_queue_capacity_limit() {
        let queue = InputQueue::new();
        let mut wheel = queue.device(InputKind::Wheel);
        for _ in 0..QUEUE_CAP + 10 {
            queue.push(InputEvent::Wheel(1));
        }
        let mut count = 0;
        while wheel.poll_event().is_some() {
            count += 1;
        }
        assert_eq!(count, QUEUE_CAP);
    }
}
