//! Marker Intermediate Representation
//!
//! Sections → Paragraphs → inline nodes. Trees are built once by the
//! parser and never mutated afterwards; every re-render walks the same tree.

use serde::{Deserialize, Serialize};

/// Inline badge markers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Pause,
    Checkpoint,
}

impl BadgeKind {
    /// Label shown inside the badge.
    pub fn label(self) -> &'static str {
        match self {
            BadgeKind::Pause => "Pause",
            BadgeKind::Checkpoint => "Checkpoint",
        }
    }

    pub fn from_marker(name: &str) -> Option<Self> {
        match name {
            "PAUSE" => Some(BadgeKind::Pause),
            "CHECKPOINT" => Some(BadgeKind::Checkpoint),
            _ => None,
        }
    }
}

/// Colour classes recognised in `[COLOR:name]` spans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Amber,
    Teal,
    Rose,
    Sky,
    Lime,
    Slate,
}

impl ColorClass {
    /// Case-insensitive lookup in the allow-set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "amber" => Some(ColorClass::Amber),
            "teal" => Some(ColorClass::Teal),
            "rose" => Some(ColorClass::Rose),
            "sky" => Some(ColorClass::Sky),
            "lime" => Some(ColorClass::Lime),
            "slate" => Some(ColorClass::Slate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorClass::Amber => "amber",
            ColorClass::Teal => "teal",
            ColorClass::Rose => "rose",
            ColorClass::Sky => "sky",
            ColorClass::Lime => "lime",
            ColorClass::Slate => "slate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum InlineNode {
    /// Unmarked text. Embedded newlines are line breaks, not paragraph breaks.
    PlainRun(String),
    Badge(BadgeKind),
    KeyTerm(String),
    Syllable(String),
    /// `[COLOR:name]..[/COLOR]`. `color` is `None` when `name` is outside the
    /// allow-set; the span is then a plain emphasis container.
    ColorSpan {
        name: String,
        color: Option<ColorClass>,
        children: Vec<InlineNode>,
    },
}

impl InlineNode {
    /// Text carried by this node and its children, without marker syntax.
    pub fn text_content(&self) -> String {
        match self {
            InlineNode::PlainRun(text) | InlineNode::KeyTerm(text) | InlineNode::Syllable(text) => {
                text.clone()
            }
            InlineNode::Badge(kind) => kind.label().to_string(),
            InlineNode::ColorSpan { children, .. } => {
                children.iter().map(InlineNode::text_content).collect()
            }
        }
    }
}

/// One blank-line-delimited block of a section body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Paragraph {
    pub inlines: Vec<InlineNode>,
}

impl Paragraph {
    pub fn text_content(&self) -> String {
        self.inlines.iter().map(InlineNode::text_content).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: Option<String>,
    /// Raw body text the paragraphs were split from.
    pub body: String,
    pub paragraphs: Vec<Paragraph>,
}

/// A parsed model response: an ordered, non-empty list of sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }

    /// Paragraph texts joined by blank lines, section by section.
    pub fn text_content(&self) -> String {
        self.sections
            .iter()
            .flat_map(|s| s.paragraphs.iter().map(Paragraph::text_content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
