//! Settings panel application
//!
//! Wires the HAL, the settings screen and the periodic tick together.
//!
//! ```text
//! main ── cli ── config ──┐
//!   │                     ▼
//!   └── bootstrap::hal_init ──► runtime::App::new ──► runtime::run (10 ms ticks)
//! ```
//!
//! - [`bootstrap`]: display plus pointer, wheel and keyboard registration
//! - [`config`]: JSON panel configuration with command-line overrides
//! - [`runtime`]: input dispatch, relayout, render and present

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::print_stdout)]

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod runtime;

pub use bootstrap::{hal_init, Hal};
pub use cli::Cli;
pub use config::{ConfigError, PanelConfig, RowVariant};
pub use runtime::{run, App, RuntimeError};
