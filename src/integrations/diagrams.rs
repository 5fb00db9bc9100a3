//! Diagram re-initialization on navigation.
//!
//! Sites with instant navigation swap page content without a reload, so
//! the diagram renderer has to be re-initialized and re-run for every new
//! page, with a theme that follows the same root attribute as the gate.
//!
//! Diagram layout measures rendered elements. While the gate has the
//! document hidden those measurements are wrong, so a navigation that
//! arrives on a hidden document is held back and rendered by
//! [`DiagramSync::on_visible`] once the content is shown.

use crate::config::GateConfig;
use crate::page::{Page, Visibility};
use crate::render::theme::Theme;
use crate::GateError;
use std::sync::Arc;
use tracing::debug;

/// Selector for diagram source blocks.
pub const DIAGRAM_SELECTOR: &str = ".mermaid";

/// Renderer theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramTheme {
    /// The renderer's light theme.
    Default,
    /// The renderer's dark theme.
    Dark,
}

impl DiagramTheme {
    /// Name understood by the renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramTheme::Default => "default",
            DiagramTheme::Dark => "dark",
        }
    }
}

impl From<Theme> for DiagramTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => DiagramTheme::Default,
            Theme::Dark => DiagramTheme::Dark,
        }
    }
}

/// Settings passed to the renderer before each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSettings {
    /// Render automatically on load. Always off; runs are explicit.
    pub start_on_load: bool,
    /// Renderer theme.
    pub theme: DiagramTheme,
    /// Renderer security level.
    pub security_level: &'static str,
    /// Font family for diagram text.
    pub font_family: &'static str,
}

impl DiagramSettings {
    /// Settings for the given page theme.
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            start_on_load: false,
            theme: theme.into(),
            security_level: "loose",
            font_family: "inherit",
        }
    }
}

/// Diagram rendering library bound to the page.
pub trait DiagramRenderer: Send + Sync {
    /// Apply settings for the next run.
    fn initialize(&self, settings: &DiagramSettings) -> Result<(), GateError>;

    /// Render every node matching `selector`, returning how many were rendered.
    fn run(&self, selector: &str) -> Result<usize, GateError>;
}

impl<R: DiagramRenderer + ?Sized> DiagramRenderer for Arc<R> {
    fn initialize(&self, settings: &DiagramSettings) -> Result<(), GateError> {
        (**self).initialize(settings)
    }

    fn run(&self, selector: &str) -> Result<usize, GateError> {
        (**self).run(selector)
    }
}

/// Drives the renderer on navigation, holding runs while content is hidden.
pub struct DiagramSync<R> {
    renderer: R,
    theme_attribute: &'static str,
    dark_scheme: &'static str,
    deferred: bool,
}

impl<R: DiagramRenderer> DiagramSync<R> {
    /// Create a sync reading the theme from `theme_attribute`.
    pub fn new(renderer: R, theme_attribute: &'static str, dark_scheme: &'static str) -> Self {
        Self {
            renderer,
            theme_attribute,
            dark_scheme,
            deferred: false,
        }
    }

    /// Create a sync that follows the same theme attribute as a gate.
    pub fn for_gate(renderer: R, config: &GateConfig) -> Self {
        Self::new(renderer, config.theme_attribute, config.dark_scheme)
    }

    /// Handle a navigation. Returns the number of diagrams rendered, or
    /// `None` when the run was deferred because the document is hidden.
    pub fn on_navigation<P: Page + ?Sized>(&mut self, page: &P) -> Result<Option<usize>, GateError> {
        if page.visibility() == Visibility::Hidden {
            self.deferred = true;
            return Ok(None);
        }
        self.render(page).map(Some)
    }

    /// Run a deferred render once the document is visible.
    ///
    /// Returns `None` if nothing was pending or the document is still hidden.
    pub fn on_visible<P: Page + ?Sized>(&mut self, page: &P) -> Result<Option<usize>, GateError> {
        if !self.deferred || page.visibility() == Visibility::Hidden {
            return Ok(None);
        }
        self.render(page).map(Some)
    }

    /// Whether a render is waiting for the document to become visible.
    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    fn render<P: Page + ?Sized>(&mut self, page: &P) -> Result<usize, GateError> {
        let scheme = page.root_attribute(self.theme_attribute);
        let theme = Theme::from_scheme(scheme.as_deref(), self.dark_scheme);

        self.renderer.initialize(&DiagramSettings::for_theme(theme))?;
        let rendered = self.renderer.run(DIAGRAM_SELECTOR)?;
        self.deferred = false;

        debug!(
            rendered,
            theme = DiagramTheme::from(theme).as_str(),
            "Diagrams rendered"
        );
        Ok(rendered)
    }
}
