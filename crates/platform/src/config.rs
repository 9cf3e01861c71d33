//! Application configuration and constants
//!
//! Central values shared by the bootstrap, the emulator and the screens.
//! Reference them instead of hardcoding sizes or names.

/// The application name
pub const APP_NAME: &str = "Settings Panel";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Native display width in pixels.
pub const DISPLAY_WIDTH: u32 = 480;

/// Native display height in pixels.
pub const DISPLAY_HEIGHT: u32 = 480;

/// Period of the input/render tick in milliseconds.
pub const TICK_PERIOD_MS: u64 = 10;

/// Window title (name + version)
pub fn app_title() -> String {
    format!("{APP_NAME} v{APP_VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_contains_name_and_version() {
        let title = app_title();
        assert!(title.starts_with(APP_NAME));
        assert!(title.ends_with(APP_VERSION));
    }
}
