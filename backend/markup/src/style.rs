//! Display-surface style variables derived from reading settings.

use bridger_core::{ColorScheme, Settings};

/// Custom properties a display surface applies to transformed content.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleVars {
    pub highlight_color: &'static str,
    pub highlight_style: &'static str,
    /// Underline width in px.
    pub highlight_width: f64,
    pub line_height: f64,
    /// Letter spacing in em.
    pub letter_spacing: f64,
}

impl StyleVars {
    pub fn from_settings(settings: &Settings, scheme: ColorScheme) -> Self {
        Self {
            highlight_color: settings.highlight_color.hex(scheme),
            highlight_style: settings.highlight_style.as_str(),
            highlight_width: settings.effective_highlight_thickness(),
            line_height: settings.effective_line_spacing(),
            letter_spacing: settings.effective_letter_spacing(),
        }
    }

    /// `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--bridger-highlight-color", self.highlight_color.to_string()),
            ("--bridger-highlight-style", self.highlight_style.to_string()),
            ("--bridger-highlight-width", format!("{}px", self.highlight_width)),
            ("--bridger-line-height", format!("{}", self.line_height)),
            ("--bridger-letter-spacing", format!("{}em", self.letter_spacing)),
        ]
    }

    /// Inline CSS declarations, e.g. for a `style` attribute.
    pub fn to_css(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
