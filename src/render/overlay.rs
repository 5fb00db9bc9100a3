//! Overlay prompt markup and presentation rules.
//!
//! The overlay is a full-page modal: it covers the viewport, sits above
//! everything else, and stays visible while the rest of the document is
//! hidden. It has no close control.

use crate::GateError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::theme::{DEFAULT_DARK_SCHEME, DEFAULT_THEME_ATTRIBUTE};

/// Element id of the overlay root.
pub const OVERLAY_ID: &str = "auth-overlay";
/// Element id of the password field.
pub const INPUT_ID: &str = "auth-pass";
/// Element id of the submit control.
pub const SUBMIT_ID: &str = "auth-submit";
/// Element id of the error indicator.
pub const ERROR_ID: &str = "auth-error";
/// Class applied to the overlay for failure feedback.
pub const SHAKE_CLASS: &str = "shake";

/// Wording shown in the prompt.
///
/// Every field has a default, so a site can override only what it needs:
///
/// ```
/// let copy = docgate::OverlayCopy::from_json(r#"{"heading": "Members only"}"#).unwrap();
/// assert_eq!(copy.heading, "Members only");
/// assert_eq!(copy.submit_label, "Unlock");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayCopy {
    /// Icon shown above the heading.
    pub icon: String,
    /// Heading text.
    pub heading: String,
    /// Instructional text.
    pub message: String,
    /// Password field placeholder.
    pub placeholder: String,
    /// Submit control label.
    pub submit_label: String,
    /// Error shown after a wrong password.
    pub error_text: String,
    /// Error shown when the password could not be checked at all.
    pub failure_text: String,
}

impl Default for OverlayCopy {
    fn default() -> Self {
        Self {
            icon: "🔒".to_string(),
            heading: "Access Restricted".to_string(),
            message: "Please enter the password to view the Google Earth Engine guide.".to_string(),
            placeholder: "Password".to_string(),
            submit_label: "Unlock".to_string(),
            error_text: "Incorrect password. Please try again.".to_string(),
            failure_text: "This browser cannot verify the password. Please try another browser."
                .to_string(),
        }
    }
}

impl OverlayCopy {
    /// Parse overlay copy from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, GateError> {
        serde_json::from_str(json).map_err(|e| GateError::CopyParse(e.to_string()))
    }

    /// Serialize the copy to JSON.
    pub fn to_json(&self) -> Result<String, GateError> {
        serde_json::to_string_pretty(self).map_err(|e| GateError::CopyParse(e.to_string()))
    }
}

/// Rendered overlay: markup for the body and rules for the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Overlay element markup, root id [`OVERLAY_ID`].
    pub markup: String,
    /// Stylesheet text.
    pub stylesheet: String,
}

impl Overlay {
    /// Render the overlay for the given copy and theme attribute.
    pub fn render(copy: &OverlayCopy, theme_attribute: &str, dark_scheme: &str) -> Self {
        Self {
            markup: render_markup(copy),
            stylesheet: stylesheet_for(theme_attribute, dark_scheme),
        }
    }
}

/// Stylesheet for the default `data-md-color-scheme="slate"` dark mode.
pub static DEFAULT_STYLESHEET: Lazy<String> =
    Lazy::new(|| render_stylesheet(DEFAULT_THEME_ATTRIBUTE, DEFAULT_DARK_SCHEME));

fn stylesheet_for(theme_attribute: &str, dark_scheme: &str) -> String {
    if theme_attribute == DEFAULT_THEME_ATTRIBUTE && dark_scheme == DEFAULT_DARK_SCHEME {
        DEFAULT_STYLESHEET.clone()
    } else {
        render_stylesheet(theme_attribute, dark_scheme)
    }
}

/// Render the overlay markup. All copy is HTML-escaped.
pub fn render_markup(copy: &OverlayCopy) -> String {
    format!(
        r#"<div id="{overlay}">
    <div class="auth-card">
        <div class="auth-icon">{icon}</div>
        <h1>{heading}</h1>
        <p>{message}</p>
        <div class="auth-form">
            <input type="password" id="{input}" placeholder="{placeholder}" autofocus>
            <button id="{submit}">{submit_label}</button>
            <div id="{error}" role="alert">{error_text}</div>
        </div>
    </div>
</div>"#,
        overlay = OVERLAY_ID,
        input = INPUT_ID,
        submit = SUBMIT_ID,
        error = ERROR_ID,
        icon = escape_html(&copy.icon),
        heading = escape_html(&copy.heading),
        message = escape_html(&copy.message),
        placeholder = escape_html(&copy.placeholder),
        submit_label = escape_html(&copy.submit_label),
        error_text = escape_html(&copy.error_text),
    )
}

const STYLESHEET_TEMPLATE: &str = r#"#auth-overlay {
    position: fixed;
    top: 0; left: 0; width: 100%; height: 100%;
    background: #f8fafc;
    display: flex; align-items: center; justify-content: center;
    z-index: 10000;
    transition: opacity 0.3s ease;
    visibility: visible !important;
}
@DARK@ #auth-overlay { background: #0f172a; }
#auth-overlay .auth-card {
    background: white;
    padding: 2.5rem;
    border-radius: 1rem;
    box-shadow: 0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1);
    text-align: center;
    max-width: 400px;
    width: 90%;
    border: 1px solid #e2e8f0;
}
@DARK@ #auth-overlay .auth-card {
    background: #1e293b;
    border-color: #334155;
    color: white;
}
#auth-overlay .auth-icon { font-size: 3rem; margin-bottom: 1rem; }
#auth-overlay h1 { font-size: 1.5rem; font-weight: 700; margin-bottom: 0.5rem; }
#auth-overlay p { color: #64748b; margin-bottom: 2rem; font-size: 0.95rem; }
#auth-overlay .auth-form { display: flex; flex-direction: column; gap: 1rem; }
#auth-overlay input {
    padding: 0.75rem 1rem;
    border: 1px solid #cbd5e1;
    border-radius: 0.5rem;
    font-size: 1rem;
    outline: none;
    transition: border-color 0.2s;
}
#auth-overlay input:focus { border-color: #4db6ac; }
#auth-overlay button {
    background: #4db6ac;
    color: white;
    border: none;
    padding: 0.75rem;
    border-radius: 0.5rem;
    font-weight: 600;
    cursor: pointer;
    transition: background 0.2s;
}
#auth-overlay button:hover { background: #3fa599; }
#auth-error { color: #ef4444; font-size: 0.85rem; display: none; }
#auth-overlay.shake { animation: auth-shake 0.5s; }
@keyframes auth-shake {
    0%, 100% { transform: translateX(0); }
    25% { transform: translateX(-10px); }
    75% { transform: translateX(10px); }
}
"#;

/// Render the stylesheet with dark rules keyed off `[theme_attribute="dark_scheme"]`.
pub fn render_stylesheet(theme_attribute: &str, dark_scheme: &str) -> String {
    let selector = format!("[{}=\"{}\"]", theme_attribute, dark_scheme);
    STYLESHEET_TEMPLATE.replace("@DARK@", &selector)
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
