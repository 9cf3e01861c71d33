//! Panel configuration file.
//!
//! ```json
//! {
//!   "scale": 2,
//!   "caption": "Settings",
//!   "resource_dir": "res",
//!   "row_variant": "rich",
//!   "items": [{ "title": "WLAN" }, { "title": "Music", "icon": "/res/Headphones.png" }]
//! }
//! ```
//!
//! Every field is optional; missing ones take the reference values.

use std::path::{Path, PathBuf};

use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use serde::{Deserialize, Serialize};
use settings_ui::{ItemDescriptor, RowStyle, CAPTION, REFERENCE_TITLES};
use thiserror::Error;
use touch_system::asset::ImageSource;

use crate::cli::Cli;

/// Largest accepted upscaling factor.
pub const MAX_SCALE: u32 = 8;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid panel JSON.
    #[error("invalid panel config {path}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("invalid panel config: {0}")]
    Invalid(String),
}

/// Row style variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowVariant {
    /// Gray pill rows with ringed icons.
    #[default]
    Rich,
    /// Bare fixed-height rows.
    Plain,
}

impl RowVariant {
    /// Style bundle for this variant.
    pub fn style(self) -> RowStyle {
        match self {
            RowVariant::Rich => RowStyle::RICH,
            RowVariant::Plain => RowStyle::PLAIN,
        }
    }
}

/// One configured row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemConfig {
    /// Row title.
    pub title: String,
    /// Explicit icon path; templated from the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<&ItemConfig> for ItemDescriptor {
    fn from(item: &ItemConfig) -> Self {
        let descriptor = ItemDescriptor::new(item.title.clone());
        match &item.icon {
            Some(icon) => descriptor.with_icon(ImageSource::path(icon.clone())),
            None => descriptor,
        }
    }
}

/// Full panel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Window upscaling factor.
    pub scale: u32,
    /// Header caption.
    pub caption: String,
    /// Directory `/res/...` paths resolve against.
    pub resource_dir: PathBuf,
    /// Row style variant.
    pub row_variant: RowVariant,
    /// Rows in display order.
    pub items: Vec<ItemConfig>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            scale: 1,
            caption: CAPTION.to_owned(),
            resource_dir: PathBuf::from("res"),
            row_variant: RowVariant::Rich,
            items: REFERENCE_TITLES
                .iter()
                .map(|title| ItemConfig {
                    title: (*title).to_owned(),
                    icon: None,
                })
                .collect(),
        }
    }
}

impl PanelConfig {
    /// Parses a JSON config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), items = config.items.len(), "config loaded");
        Ok(config)
    }

    /// Config file (if any) with command-line overrides applied.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(dir) = &cli.res_dir {
            config.resource_dir.clone_from(dir);
        }
        if let Some(scale) = cli.scale {
            config.scale = scale;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if !(1..=MAX_SCALE).contains(&self.scale) {
            return Err(ConfigError::Invalid(format!(
                "scale {} is outside 1..={MAX_SCALE}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Item descriptors in display order.
    pub fn descriptors(&self) -> Vec<ItemDescriptor> {
        self.items.iter().map(ItemDescriptor::from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_reference_config() {
        let config = PanelConfig::from_json("{}").unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.items.len(), 16);
        assert_eq!((config.width, config.height), (480, 480));
    }

    #[test]
    fn test_partial_config() {
        let config = PanelConfig::from_json(
            r#"{ "row_variant": "plain", "items": [{ "title": "WLAN" }, { "title": "Music", "icon": "/res/Note.png" }] }"#,
        )
        .unwrap();
        assert_eq!(config.row_variant, RowVariant::Plain);
        assert_eq!(config.caption, "Settings");

        let descriptors = config.descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0], ItemDescriptor::new("WLAN"));
        assert_eq!(descriptors[1].icon, Some(ImageSource::path("/res/Note.png")));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(PanelConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = PanelConfig::default();
        config.scale = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.scale = 2;
        config.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.json");
        std::fs::write(&path, r#"{ "scale": 3, "resource_dir": "icons" }"#).unwrap();

        let cli = Cli {
            config: Some(path),
            res_dir: Some(PathBuf::from("/opt/res")),
            ..Cli::default()
        };
        let config = PanelConfig::resolve(&cli).unwrap();
        assert_eq!(config.scale, 3);
        assert_eq!(config.resource_dir, PathBuf::from("/opt/res"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = PanelConfig::load(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.json"));
    }
}
