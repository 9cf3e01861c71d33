//! Emulator configuration

/// Configuration for emulator display presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Upscaling factor (1 = no scaling, 2 = 2x for visibility, etc.)
    pub scale: u32,
    /// Hide the host cursor over the window (an image cursor is drawn instead).
    pub hide_host_cursor: bool,
}

impl EmulatorConfig {
    /// No upscaling (1:1 pixel mapping), host cursor visible
    pub const NATIVE: Self = Self {
        scale: 1,
        hide_host_cursor: false,
    };

    /// 2x upscaling for high-DPI desktops
    pub const DOUBLE: Self = Self {
        scale: 2,
        hide_host_cursor: false,
    };

    /// Builder: upscaling factor, clamped to at least 1.
    #[must_use]
    pub const fn with_scale(mut self, scale: u32) -> Self {
        self.scale = if scale == 0 { 1 } else { scale };
        self
    }

    /// Builder: hide the host cursor.
    #[must_use]
    pub const fn hide_host_cursor(mut self, hide: bool) -> Self {
        self.hide_host_cursor = hide;
        self
    }

    /// Window size in physical pixels for a display of `width`×`height`.
    pub fn window_size(&self, width: u32, height: u32) -> (u32, u32) {
        (
            width.saturating_mul(self.scale.max(1)),
            height.saturating_mul(self.scale.max(1)),
        )
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self::NATIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size_scales() {
        assert_eq!(EmulatorConfig::DOUBLE.window_size(480, 480), (960, 960));
        assert_eq!(EmulatorConfig::NATIVE.window_size(480, 320), (480, 320));
    }

    #[test]
    fn test_zero_scale_is_clamped() {
        assert_eq!(EmulatorConfig::NATIVE.with_scale(0).scale, 1);
    }
}
