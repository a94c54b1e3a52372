use std::fmt;

use serde::{Deserialize, Serialize};

/// Default line height multiplier for transformed content.
pub const DEFAULT_LINE_SPACING: f64 = 1.7;

/// Default highlight underline thickness, in pixels.
pub const DEFAULT_HIGHLIGHT_THICKNESS: f64 = 1.0;

/// Default extra letter spacing, in em.
pub const DEFAULT_LETTER_SPACING: f64 = 0.0;

/// Which rendition of a transformed selection is on display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Original,
    #[default]
    Transformed,
}

impl ViewMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Original => ViewMode::Transformed,
            ViewMode::Transformed => ViewMode::Original,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Original => write!(f, "original"),
            ViewMode::Transformed => write!(f, "transformed"),
        }
    }
}

/// Light or dark display surface; picks the palette entry for highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Long-word highlight colour. Unknown names fall back to gold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum HighlightColor {
    #[default]
    Gold,
    Sky,
    Teal,
    Rose,
    Lime,
    Slate,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 6] = [
        HighlightColor::Gold,
        HighlightColor::Sky,
        HighlightColor::Teal,
        HighlightColor::Rose,
        HighlightColor::Lime,
        HighlightColor::Slate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightColor::Gold => "gold",
            HighlightColor::Sky => "sky",
            HighlightColor::Teal => "teal",
            HighlightColor::Rose => "rose",
            HighlightColor::Lime => "lime",
            HighlightColor::Slate => "slate",
        }
    }

    /// Hex colour for the given scheme.
    pub fn hex(self, scheme: ColorScheme) -> &'static str {
        let (light, dark) = match self {
            HighlightColor::Gold => ("#c98616", "#f6c65b"),
            HighlightColor::Sky => ("#2563eb", "#7dd3fc"),
            HighlightColor::Teal => ("#0f766e", "#5eead4"),
            HighlightColor::Rose => ("#be123c", "#fda4af"),
            HighlightColor::Lime => ("#4d7c0f", "#bef264"),
            HighlightColor::Slate => ("#475569", "#cbd5f5"),
        };
        match scheme {
            ColorScheme::Light => light,
            ColorScheme::Dark => dark,
        }
    }

    /// Lenient lookup used for settings values; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl From<String> for HighlightColor {
    fn from(value: String) -> Self {
        Self::from_name(&value).unwrap_or_default()
    }
}

impl From<HighlightColor> for String {
    fn from(value: HighlightColor) -> Self {
        value.as_str().to_string()
    }
}

/// Underline style for highlighted long words. Unknown names fall back to solid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum HighlightStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    Wavy,
}

impl HighlightStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightStyle::Solid => "solid",
            HighlightStyle::Dashed => "dashed",
            HighlightStyle::Dotted => "dotted",
            HighlightStyle::Double => "double",
            HighlightStyle::Wavy => "wavy",
        }
    }
}

impl From<String> for HighlightStyle {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dashed" => HighlightStyle::Dashed,
            "dotted" => HighlightStyle::Dotted,
            "double" => HighlightStyle::Double,
            "wavy" => HighlightStyle::Wavy,
            _ => HighlightStyle::Solid,
        }
    }
}

impl From<HighlightStyle> for String {
    fn from(value: HighlightStyle) -> Self {
        value.as_str().to_string()
    }
}

/// User-facing reading settings, as supplied by the settings provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch; when off, selections are never transformed.
    pub enabled: bool,
    /// Transform selections as soon as they are made.
    pub auto_simplify: bool,
    pub highlight_long_words: bool,
    pub split_long_words: bool,
    pub highlight_color: HighlightColor,
    pub highlight_style: HighlightStyle,
    /// Underline thickness in pixels.
    pub highlight_thickness: f64,
    /// Line height multiplier.
    pub line_spacing: f64,
    /// Extra letter spacing in em.
    pub letter_spacing: f64,
    pub view_mode: ViewMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_simplify: true,
            highlight_long_words: false,
            split_long_words: false,
            highlight_color: HighlightColor::default(),
            highlight_style: HighlightStyle::default(),
            highlight_thickness: DEFAULT_HIGHLIGHT_THICKNESS,
            line_spacing: DEFAULT_LINE_SPACING,
            letter_spacing: DEFAULT_LETTER_SPACING,
            view_mode: ViewMode::default(),
        }
    }
}

impl Settings {
    /// Highlight thickness, or the default when the stored value is not a finite number.
    pub fn effective_highlight_thickness(&self) -> f64 {
        finite_or(self.highlight_thickness, DEFAULT_HIGHLIGHT_THICKNESS)
    }

    pub fn effective_line_spacing(&self) -> f64 {
        finite_or(self.line_spacing, DEFAULT_LINE_SPACING)
    }

    pub fn effective_letter_spacing(&self) -> f64 {
        finite_or(self.letter_spacing, DEFAULT_LETTER_SPACING)
    }

    /// Whether any long-word assist is switched on.
    pub fn long_word_assist(&self) -> bool {
        self.highlight_long_words || self.split_long_words
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Original.toggled(), ViewMode::Transformed);
        assert_eq!(ViewMode::Transformed.toggled().toggled(), ViewMode::Transformed);
    }

    #[test]
    fn test_highlight_color_palette() {
        assert_eq!(HighlightColor::Gold.hex(ColorScheme::Light), "#c98616");
        assert_eq!(HighlightColor::Teal.hex(ColorScheme::Dark), "#5eead4");
        assert_eq!(HighlightColor::from_name(" SKY "), Some(HighlightColor::Sky));
        assert_eq!(HighlightColor::from_name("amber"), None);
    }

    #[test]
    fn test_settings_deserialize_lenient() {
        let json = serde_json::json!({
            "highlightLongWords": true,
            "highlightColor": "purple",
            "highlightStyle": "wavy",
            "viewMode": "original"
        });
        let settings: Settings = serde_json::from_value(json).unwrap();
        assert!(settings.highlight_long_words);
        assert_eq!(settings.highlight_color, HighlightColor::Gold);
        assert_eq!(settings.highlight_style, HighlightStyle::Wavy);
        assert_eq!(settings.view_mode, ViewMode::Original);
        assert_eq!(settings.line_spacing, DEFAULT_LINE_SPACING);
    }

    #[test]
    fn test_effective_values_fall_back() {
        let settings = Settings {
            highlight_thickness: f64::NAN,
            line_spacing: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(settings.effective_highlight_thickness(), 1.0);
        assert_eq!(settings.effective_line_spacing(), 1.7);
        assert_eq!(settings.effective_letter_spacing(), 0.0);
    }
}
