//! Mock implementations for testing
//!
//! In-memory display surface and scripted input devices for unit and
//! integration tests.

#![cfg(any(test, feature = "mocks"))]

use std::collections::VecDeque;
use std::time::Duration;

use embedded_graphics::prelude::Size;
use touch_system::framebuffer::Framebuffer;

use crate::display::{check_frame_size, DisplaySurface, SurfaceError, SurfaceStatus};
use crate::input::{InputDevice, InputEvent, InputKind};

/// Mock display surface that keeps the last presented frame.
#[derive(Debug)]
pub struct MockSurface {
    size: Size,
    present_count: usize,
    last_frame: Option<Framebuffer>,
    open_pumps: Option<usize>,
}

impl MockSurface {
    /// Create new mock surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            present_count: 0,
            last_frame: None,
            open_pumps: None,
        }
    }

    /// Reports [`SurfaceStatus::Closed`] after `pumps` calls to `pump`.
    #[must_use]
    pub fn close_after(mut self, pumps: usize) -> Self {
        self.open_pumps = Some(pumps);
        self
    }

    /// Number of presented frames.
    pub fn present_count(&self) -> usize {
        self.present_count
    }

    /// Last presented frame.
    pub fn last_frame(&self) -> Option<&Framebuffer> {
        self.last_frame.as_ref()
    }
}

impl DisplaySurface for MockSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        check_frame_size(frame, self.size)?;
        self.present_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn pump(&mut self, _timeout: Duration) -> SurfaceStatus {
        match &mut self.open_pumps {
            Some(0) => SurfaceStatus::Closed,
            Some(remaining) => {
                *remaining -= 1;
                SurfaceStatus::Open
            }
            None => SurfaceStatus::Open,
        }
    }
}

/// Input device replaying queued events.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    kind: InputKind,
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    /// Create an empty script for a device of `kind`.
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            events: VecDeque::new(),
        }
    }

    /// Script pre-loaded with `events`.
    pub fn with_events(kind: InputKind, events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            kind,
            events: events.into_iter().collect(),
        }
    }

    /// Queues `event` for a later poll.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }
}

impl InputDevice for ScriptedInput {
    fn kind(&self) -> InputKind {
        self.kind
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}
