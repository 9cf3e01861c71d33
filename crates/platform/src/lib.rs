//! Hardware Abstraction Layer (HAL) for the settings panel
//!
//! Trait-based abstractions for the display surface and input devices, so
//! the screens and the tick loop run the same against a desktop window, a
//! headless buffer or test doubles.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (panel crate)
//!         ↓
//! Screens (settings-ui)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Backend (touch-emulator window / headless)
//! ```
//!
//! # Abstractions
//!
//! - [`DisplaySurface`] - frame presentation and event pumping
//! - [`InputDevice`] - pointer, wheel and keyboard input
//! - [`InputGroup`] - focus ring driven by keys
//! - [`Indev`] - device bindings (display, group, cursor)
//!
//! # Features
//!
//! - `mocks`: in-memory surface and scripted devices for tests
//!
//! # Example
//!
//! ```
//! use platform::InputGroup;
//!
//! let mut group = InputGroup::new();
//! group.add("wlan");
//! group.add("bluetooth");
//! assert_eq!(group.focus_next(), Some("bluetooth"));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod display;
pub mod group;
pub mod indev;
pub mod input;
pub mod mocks;

// Re-export main high-level traits
pub use display::{DisplaySurface, SurfaceError, SurfaceStatus};
pub use group::InputGroup;
pub use indev::Indev;
pub use input::{InputDevice, InputEvent, InputKind, Key};
