//! Renderer for the marker IR
//!
//! Converts a parsed [`Document`] into display nodes. Rendering is pure over
//! `(document, options)`, so callers re-run it on every settings change
//! instead of re-parsing.

use bridger_core::Settings;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ir::{BadgeKind, ColorClass, Document, InlineNode, Section};
use crate::segmenter::segment;

static LONG_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{8,}").unwrap());

/// Long-word assist switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub highlight_long_words: bool,
    pub split_long_words: bool,
}

impl RenderOptions {
    fn long_word_assist(&self) -> bool {
        self.highlight_long_words || self.split_long_words
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            highlight_long_words: settings.highlight_long_words,
            split_long_words: settings.split_long_words,
        }
    }
}

/// A piece of a long word: a letter chunk or the visual separator between chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordSegment {
    Text(String),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    Section {
        title: Option<String>,
        children: Vec<RenderNode>,
    },
    /// Gap between consecutive sections.
    SectionSpacer,
    /// One rendered paragraph.
    Chunk { children: Vec<RenderNode> },
    /// Gap between consecutive paragraphs of a section.
    Spacer,
    Text { text: String },
    LineBreak,
    Badge { kind: BadgeKind },
    KeyTerm { text: String },
    Syllable { text: String },
    ColorSpan {
        color: Option<ColorClass>,
        children: Vec<RenderNode>,
    },
    LongWord {
        highlighted: bool,
        segments: Vec<WordSegment>,
    },
}

impl RenderNode {
    /// Visible text, ignoring spacers and long-word separators.
    pub fn text_content(&self) -> String {
        match self {
            RenderNode::Section { title, children } => {
                let mut out = title.clone().unwrap_or_default();
                out.extend(children.iter().map(RenderNode::text_content));
                out
            }
            RenderNode::Chunk { children } | RenderNode::ColorSpan { children, .. } => {
                children.iter().map(RenderNode::text_content).collect()
            }
            RenderNode::Text { text } | RenderNode::KeyTerm { text } | RenderNode::Syllable { text } => {
                text.clone()
            }
            RenderNode::Badge { kind } => kind.label().to_string(),
            RenderNode::LineBreak => "\n".to_string(),
            RenderNode::LongWord { segments, .. } => segments
                .iter()
                .filter_map(|s| match s {
                    WordSegment::Text(t) => Some(t.as_str()),
                    WordSegment::Separator => None,
                })
                .collect(),
            RenderNode::SectionSpacer | RenderNode::Spacer => String::new(),
        }
    }
}

pub struct Renderer;

impl Renderer {
    /// Render a document. Calling this twice with the same inputs yields equal trees.
    pub fn render(document: &Document, options: &RenderOptions) -> Vec<RenderNode> {
        let count = document.sections.len();
        let mut nodes = Vec::with_capacity(count * 2);
        for (index, section) in document.sections.iter().enumerate() {
            nodes.push(render_section(section, options));
            if index + 1 < count {
                nodes.push(RenderNode::SectionSpacer);
            }
        }
        nodes
    }
}

fn render_section(section: &Section, options: &RenderOptions) -> RenderNode {
    let count = section.paragraphs.len();
    let mut children = Vec::with_capacity(count * 2);
    for (index, paragraph) in section.paragraphs.iter().enumerate() {
        children.push(RenderNode::Chunk {
            children: render_inlines(&paragraph.inlines, options),
        });
        if index + 1 < count {
            children.push(RenderNode::Spacer);
        }
    }
    RenderNode::Section {
        title: section.title.clone(),
        children,
    }
}

fn render_inlines(inlines: &[InlineNode], options: &RenderOptions) -> Vec<RenderNode> {
    let mut out = Vec::new();
    for inline in inlines {
        match inline {
            InlineNode::PlainRun(text) => render_plain(text, options, &mut out),
            InlineNode::Badge(kind) => out.push(RenderNode::Badge { kind: *kind }),
            // Annotations are protected: never highlighted or split.
            InlineNode::KeyTerm(text) => out.push(RenderNode::KeyTerm { text: text.clone() }),
            InlineNode::Syllable(text) => out.push(RenderNode::Syllable { text: text.clone() }),
            InlineNode::ColorSpan { color, children, .. } => out.push(RenderNode::ColorSpan {
                color: *color,
                children: render_inlines(children, options),
            }),
        }
    }
    out
}

fn render_plain(text: &str, options: &RenderOptions, out: &mut Vec<RenderNode>) {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push(RenderNode::LineBreak);
        }
        if options.long_word_assist() {
            render_long_words(line, options, out);
        } else {
            push_text(out, line);
        }
    }
}

fn render_long_words(line: &str, options: &RenderOptions, out: &mut Vec<RenderNode>) {
    let mut last = 0;
    for m in LONG_WORD_RE.find_iter(line) {
        push_text(out, &line[last..m.start()]);
        let word = m.as_str();
        let segments = if options.split_long_words {
            let mut segments = Vec::new();
            for (index, part) in segment(word).into_iter().enumerate() {
                if index > 0 {
                    segments.push(WordSegment::Separator);
                }
                segments.push(WordSegment::Text(part.to_string()));
            }
            segments
        } else {
            vec![WordSegment::Text(word.to_string())]
        };
        out.push(RenderNode::LongWord {
            highlighted: options.highlight_long_words,
            segments,
        });
        last = m.end();
    }
    push_text(out, &line[last..]);
}

fn push_text(out: &mut Vec<RenderNode>, text: &str) {
    if !text.is_empty() {
        out.push(RenderNode::Text {
            text: text.to_string(),
        });
    }
}
