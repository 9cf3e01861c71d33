//! Filesystem-backed image resolver.
//!
//! Identifiers of the form `/res/<file>` are looked up under a resource root
//! directory on the host. Decoded images are cached, and so are misses, so a
//! missing icon is reported once instead of every frame.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use touch_system::asset::{AssetError, AssetResolver, ImageData, ImageSource};

/// Identifier prefix mapped onto the resource root.
pub const RES_PREFIX: &str = "/res/";

/// Resolves `/res/...` image paths against a host directory.
#[derive(Debug)]
pub struct FsAssetResolver {
    root: PathBuf,
    cache: HashMap<String, Option<ImageData>>,
}

impl FsAssetResolver {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Resource root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of cached lookups, hits and misses both.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Host path for `identifier`.
    ///
    /// Rejects identifiers outside `/res/` and any that try to leave the root.
    pub fn host_path(&self, identifier: &str) -> Result<PathBuf, AssetError> {
        let relative = identifier
            .strip_prefix(RES_PREFIX)
            .ok_or_else(|| AssetError::UnsupportedIdentifier(identifier.to_owned()))?;
        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if relative.as_os_str().is_empty() || escapes {
            return Err(AssetError::UnsupportedIdentifier(identifier.to_owned()));
        }
        Ok(self.root.join(relative))
    }

    /// Loads and decodes `identifier` without touching the cache.
    pub fn load(&self, identifier: &str) -> Result<ImageData, AssetError> {
        let path = self.host_path(identifier)?;
        if !path.is_file() {
            return Err(AssetError::NotFound {
                identifier: identifier.to_owned(),
                root: self.root.display().to_string(),
            });
        }
        let decoded = image::open(&path).map_err(|err| AssetError::Decode {
            identifier: identifier.to_owned(),
            message: err.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        ImageData::from_rgba(width, height, rgba.into_raw())
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve(&mut self, source: &ImageSource) -> Option<&ImageData> {
        let identifier = source.as_path()?;
        if !self.cache.contains_key(identifier) {
            let loaded = match self.load(identifier) {
                Ok(image) => {
                    tracing::debug!(
                        identifier,
                        width = image.width(),
                        height = image.height(),
                        "image loaded"
                    );
                    Some(image)
                }
                Err(err) => {
                    tracing::warn!(identifier, error = %err, "image unavailable, drawing placeholder");
                    None
                }
            };
            self.cache.insert(identifier.to_owned(), loaded);
        }
        self.cache.get(identifier).and_then(Option::as_ref)
    }
}
