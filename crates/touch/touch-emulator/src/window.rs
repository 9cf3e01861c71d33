//! Isolated window management layer
//!
//! Based on softbuffer pattern: https://github.com/rust-windowing/softbuffer
//! Follows "isolate the madness" principle - all platform-specific code here.
//!
//! The window never owns the event loop thread: the tick loop calls
//! [`Window::pump_events`] once per tick, which drains pending winit events
//! into the shared [`InputQueue`].

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use platform::{InputEvent, SurfaceError, SurfaceStatus};
use softbuffer::{Context, Surface};
use touch_system::framebuffer::Framebuffer;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as WinitWindow, WindowAttributes, WindowId};

use crate::config::EmulatorConfig;
use crate::input::{map_key, map_pointer, map_scroll, InputQueue};

/// Pixels of a high-resolution scroll that count as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

type WindowSurface = Surface<Arc<WinitWindow>, Arc<WinitWindow>>;

/// Window management (isolated from application logic)
pub struct Window {
    event_loop: EventLoop<()>,
    window: Arc<WinitWindow>,
    surface: WindowSurface,
    width: u32,
    height: u32,
    config: EmulatorConfig,
    handler: EventHandler,
}

/// Translates window events into input events.
struct EventHandler {
    queue: InputQueue,
    scale: u32,
    pointer: embedded_graphics::prelude::Point,
    pressed: bool,
    shift: bool,
    scroll_acc: f64,
    closed: bool,
}

impl EventHandler {
    fn push_pointer(&self) {
        self.queue.push(InputEvent::Pointer {
            position: self.pointer,
            pressed: self.pressed,
        });
    }
}

impl ApplicationHandler for EventHandler {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is already created before the tick loop starts
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.closed = true;
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if let Some(input) = map_key(code, pressed, self.shift) {
                        self.queue.push(input);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = map_pointer(position.x, position.y, self.scale);
                self.push_pointer();
            }
            WindowEvent::CursorLeft { .. } => {
                if self.pressed {
                    self.pressed = false;
                    self.push_pointer();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.pressed = state == ElementState::Pressed;
                self.push_pointer();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                    MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
                };
                if let Some(input) = map_scroll(&mut self.scroll_acc, lines) {
                    self.queue.push(input);
                }
            }
            _ => {}
        }
    }
}

/// Creates the winit window and its softbuffer surface inside `resumed`.
struct WindowCreator {
    window_attributes: Option<WindowAttributes>,
    created: Option<Result<(Arc<WinitWindow>, WindowSurface), SurfaceError>>,
}

impl ApplicationHandler for WindowCreator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window_attributes) = self.window_attributes.take() else {
            return;
        };
        self.created = Some(create_surface(event_loop, window_attributes));
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

fn backend(err: impl std::fmt::Display) -> SurfaceError {
    SurfaceError::Backend(err.to_string())
}

fn create_surface(
    event_loop: &ActiveEventLoop,
    window_attributes: WindowAttributes,
) -> Result<(Arc<WinitWindow>, WindowSurface), SurfaceError> {
    let window = Arc::new(event_loop.create_window(window_attributes).map_err(backend)?);
    let context = Context::new(Arc::clone(&window)).map_err(backend)?;
    let surface = Surface::new(&context, Arc::clone(&window)).map_err(backend)?;
    Ok((window, surface))
}

impl Window {
    /// Create a non-resizable window showing a `width`×`height` display at `config.scale`.
    pub fn new(
        width: u32,
        height: u32,
        title: &str,
        config: &EmulatorConfig,
        queue: InputQueue,
    ) -> Result<Self, SurfaceError> {
        let mut event_loop = EventLoop::new().map_err(backend)?;

        let (scaled_w, scaled_h) = config.window_size(width, height);
        let window_attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(scaled_w, scaled_h))
            .with_resizable(false);

        let mut creator = WindowCreator {
            window_attributes: Some(window_attributes),
            created: None,
        };

        // Pump the event loop once to create the window
        let _ = event_loop.pump_app_events(Some(Duration::from_millis(1)), &mut creator);

        let (window, mut surface) = creator
            .created
            .unwrap_or_else(|| Err(SurfaceError::Backend("window was not created".into())))?;

        // Resize surface once during initialization (never resize again)
        let (Some(surface_w), Some(surface_h)) = (NonZeroU32::new(scaled_w), NonZeroU32::new(scaled_h)) else {
            return Err(SurfaceError::Backend(format!(
                "invalid window size {scaled_w}x{scaled_h}"
            )));
        };
        surface.resize(surface_w, surface_h).map_err(backend)?;

        if config.hide_host_cursor {
            window.set_cursor_visible(false);
        }

        tracing::info!(width, height, scale = config.scale, "emulator window opened");

        Ok(Self {
            event_loop,
            window,
            surface,
            width,
            height,
            config: *config,
            handler: EventHandler {
                queue,
                scale: config.scale,
                pointer: embedded_graphics::prelude::Point::zero(),
                pressed: false,
                shift: false,
                scroll_acc: 0.0,
                closed: false,
            },
        })
    }

    /// Drain window events for at most `timeout`.
    pub fn pump_events(&mut self, timeout: Duration) -> SurfaceStatus {
        if self.handler.closed {
            return SurfaceStatus::Closed;
        }
        match self.event_loop.pump_app_events(Some(timeout), &mut self.handler) {
            PumpStatus::Exit(_) => self.handler.closed = true,
            PumpStatus::Continue => {}
        }
        if self.handler.closed {
            tracing::info!("emulator window closed");
            SurfaceStatus::Closed
        } else {
            SurfaceStatus::Open
        }
    }

    /// Present framebuffer to window with integer upscaling
    #[allow(clippy::indexing_slicing)]
    pub fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        if self.handler.closed {
            return Err(SurfaceError::Closed);
        }
        let pixels = frame.to_xrgb();
        let scale = self.config.scale.max(1) as usize;
        let width = self.width as usize;
        let height = self.height as usize;
        if pixels.len() != width * height {
            return Err(SurfaceError::size_mismatch(
                embedded_graphics::prelude::Size::new(frame.width(), frame.height()),
                embedded_graphics::prelude::Size::new(self.width, self.height),
            ));
        }

        let mut buffer = self.surface.buffer_mut().map_err(backend)?;
        if buffer.len() != pixels.len() * scale * scale {
            return Err(SurfaceError::Backend("surface buffer has unexpected size".into()));
        }

        if scale == 1 {
            // No upscaling: direct copy
            buffer.copy_from_slice(&pixels);
        } else {
            // Each source row becomes `scale` identical rows of `scale`-wide blocks.
            // SAFETY (bounds): buffer length was checked against width*height*scale² above.
            let window_width = width * scale;
            for y in 0..height {
                let src = &pixels[y * width..(y + 1) * width];
                let first = y * scale * window_width;
                for (x, pixel) in src.iter().enumerate() {
                    let start = first + x * scale;
                    buffer[start..start + scale].fill(*pixel);
                }
                for dy in 1..scale {
                    let dst = first + dy * window_width;
                    buffer.copy_within(first..first + window_width, dst);
                }
            }
        }

        buffer.present().map_err(backend)?;
        self.window.request_redraw();
        Ok(())
    }
}
