//! Item descriptors and the title → icon mapping.

use touch_system::asset::ImageSource;

/// Caption shown in the header.
pub const CAPTION: &str = "Settings";

/// Default icon path template. `{title}` is replaced by the sanitized title.
pub const DEFAULT_ICON_TEMPLATE: &str = "/res/{title}.png";

/// Titles of the reference settings list, in display order.
pub const REFERENCE_TITLES: [&str; 16] = [
    "WLAN",
    "Bluetooth",
    "PersonalHotspot",
    "Notifications",
    "DoNotDisturb",
    "General",
    "DisplayBrightness",
    "Accessibility",
    "Wallpaper",
    "PasswordsAccounts",
    "Battery",
    "Privacy",
    "Camera",
    "Keyboards",
    "Location",
    "Music",
];

/// One entry of the settings list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Row title. May be empty.
    pub title: String,
    /// Explicit icon. `None` derives the icon from the title.
    pub icon: Option<ImageSource>,
}

impl ItemDescriptor {
    /// Descriptor whose icon comes from the screen's icon mapping.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
        }
    }

    /// Overrides the mapped icon.
    #[must_use]
    pub fn with_icon(mut self, icon: ImageSource) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Icon for this row: the explicit one, else `mapping`'s.
    pub fn icon_source(&self, mapping: &dyn IconMapping) -> ImageSource {
        self.icon
            .clone()
            .unwrap_or_else(|| mapping.icon_for(&self.title))
    }
}

/// The reference list of sixteen settings entries.
pub fn reference_items() -> Vec<ItemDescriptor> {
    REFERENCE_TITLES.iter().map(|title| ItemDescriptor::new(*title)).collect()
}

/// Derives an icon identifier from a row title.
pub trait IconMapping {
    /// Icon for `title`.
    fn icon_for(&self, title: &str) -> ImageSource;
}

impl<F> IconMapping for F
where
    F: Fn(&str) -> ImageSource,
{
    fn icon_for(&self, title: &str) -> ImageSource {
        self(title)
    }
}

/// Substitutes the title into a path template.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`, so a title can never add
/// path separators or spaces to the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
}

impl PathTemplate {
    /// Template containing a `{title}` placeholder.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_TEMPLATE)
    }
}

impl IconMapping for PathTemplate {
    fn icon_for(&self, title: &str) -> ImageSource {
        ImageSource::path(self.template.replace("{title}", &sanitize(title)))
    }
}

fn sanitize(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use touch_system::asset::BuiltinImage;

    #[test]
    fn test_default_template() {
        let mapping = PathTemplate::default();
        assert_eq!(mapping.icon_for("WLAN"), ImageSource::path("/res/WLAN.png"));
    }

    #[test]
    fn test_template_sanitizes_title() {
        let mapping = PathTemplate::default();
        assert_eq!(
            mapping.icon_for("Passwords & Accounts"),
            ImageSource::path("/res/Passwords___Accounts.png")
        );
        assert_eq!(mapping.icon_for("a/b"), ImageSource::path("/res/a_b.png"));
        assert_eq!(mapping.icon_for(""), ImageSource::path("/res/.png"));
    }

    #[test]
    fn test_closure_mapping() {
        let mapping = |_: &str| ImageSource::Builtin(BuiltinImage::Forward);
        let item = ItemDescriptor::new("Camera");
        assert_eq!(item.icon_source(&mapping), ImageSource::Builtin(BuiltinImage::Forward));
    }

    #[test]
    fn test_explicit_icon_wins() {
        let item = ItemDescriptor::new("Camera").with_icon(ImageSource::path("/res/Photo.png"));
        assert_eq!(
            item.icon_source(&PathTemplate::default()),
            ImageSource::path("/res/Photo.png")
        );
    }

    #[test]
    fn test_reference_items_order() {
        let items = reference_items();
        assert_eq!(items.len(), 16);
        assert_eq!(items.first().map(|i| i.title.as_str()), Some("WLAN"));
        assert_eq!(items.last().map(|i| i.title.as_str()), Some("Music"));
        assert!(items.iter().all(|i| i.icon.is_none()));
    }
}
