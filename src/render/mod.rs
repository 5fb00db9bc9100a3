//! Overlay markup, presentation rules, and theme selection.

pub mod overlay;
pub mod theme;
