//! Light/dark theme selection from the ambient theme attribute.

/// Root attribute the site's theming layer maintains.
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-md-color-scheme";

/// Attribute value that selects the dark palette.
pub const DEFAULT_DARK_SCHEME: &str = "slate";

/// Presentation palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light palette, used whenever the attribute is absent or unrecognized.
    #[default]
    Light,
    /// Dark palette.
    Dark,
}

impl Theme {
    /// Select a theme from the attribute value, if any.
    pub fn from_scheme(value: Option<&str>, dark_scheme: &str) -> Self {
        match value {
            Some(scheme) if scheme == dark_scheme => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Whether this is the dark palette.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}
