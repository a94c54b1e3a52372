//! Terminal writer: plain text or ANSI-styled output for rendered nodes.

use bridger_core::{ColorScheme, HighlightColor, HighlightStyle, Settings};

use crate::ir::ColorClass;
use crate::renderer::{RenderNode, WordSegment};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";
const INVERSE: &str = "\x1b[7m";

/// Line spacing at or above which line breaks are doubled.
const DOUBLE_SPACING_THRESHOLD: f64 = 2.0;

pub struct TerminalWriter {
    ansi: bool,
    highlight_color: HighlightColor,
    highlight_style: HighlightStyle,
    double_spaced: bool,
}

impl TerminalWriter {
    /// Unstyled writer with single line spacing.
    pub fn plain() -> Self {
        Self {
            ansi: false,
            highlight_color: HighlightColor::default(),
            highlight_style: HighlightStyle::default(),
            double_spaced: false,
        }
    }

    pub fn from_settings(settings: &Settings, ansi: bool) -> Self {
        Self {
            ansi,
            highlight_color: settings.highlight_color,
            highlight_style: settings.highlight_style,
            double_spaced: settings.effective_line_spacing() >= DOUBLE_SPACING_THRESHOLD,
        }
    }

    pub fn write(&self, nodes: &[RenderNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.write_node(node, &mut out);
        }
        out
    }

    fn newline(&self, out: &mut String) {
        out.push('\n');
        if self.double_spaced {
            out.push('\n');
        }
    }

    fn styled(&self, out: &mut String, style: &str, text: &str) {
        if self.ansi {
            out.push_str(style);
            out.push_str(text);
            out.push_str(RESET);
        } else {
            out.push_str(text);
        }
    }

    fn write_node(&self, node: &RenderNode, out: &mut String) {
        match node {
            RenderNode::Section { title, children } => {
                if let Some(title) = title {
                    self.styled(out, BOLD, title);
                    self.newline(out);
                }
                for child in children {
                    self.write_node(child, out);
                }
            }
            RenderNode::Chunk { children } => {
                for child in children {
                    self.write_node(child, out);
                }
                out.push('\n');
            }
            RenderNode::Spacer | RenderNode::SectionSpacer => out.push('\n'),
            RenderNode::Text { text } => out.push_str(text),
            RenderNode::LineBreak => self.newline(out),
            RenderNode::Badge { kind } => {
                self.styled(out, INVERSE, &format!("[{}]", kind.label()));
            }
            RenderNode::KeyTerm { text } => self.styled(out, &format!("{BOLD}{UNDERLINE}"), text),
            RenderNode::Syllable { text } => self.styled(out, "\x1b[3m", text),
            RenderNode::ColorSpan { color, children } => {
                let mut inner = String::new();
                for child in children {
                    self.write_node(child, &mut inner);
                }
                let style = color.map(ansi_color).unwrap_or(BOLD);
                // Nested styles reset the span colour; re-apply it after each reset.
                if self.ansi {
                    out.push_str(style);
                    out.push_str(&inner.replace(RESET, &format!("{RESET}{style}")));
                    out.push_str(RESET);
                } else {
                    out.push_str(&inner);
                }
            }
            RenderNode::LongWord {
                highlighted,
                segments,
            } => {
                let word: String = segments
                    .iter()
                    .map(|s| match s {
                        WordSegment::Text(text) => text.as_str(),
                        WordSegment::Separator => "|",
                    })
                    .collect();
                if *highlighted {
                    // Terminals get the dark-scheme palette entry.
                    let style = format!(
                        "{}{}",
                        truecolor(self.highlight_color.hex(ColorScheme::Dark)),
                        underline(self.highlight_style)
                    );
                    self.styled(out, &style, &word);
                } else {
                    out.push_str(&word);
                }
            }
        }
    }
}

fn ansi_color(color: ColorClass) -> &'static str {
    match color {
        ColorClass::Amber => "\x1b[33m",
        ColorClass::Teal => "\x1b[36m",
        ColorClass::Rose => "\x1b[35m",
        ColorClass::Sky => "\x1b[34m",
        ColorClass::Lime => "\x1b[32m",
        ColorClass::Slate => "\x1b[90m",
    }
}

/// Extended underline styles (kitty/VTE `4:n`); plain underline for solid.
fn underline(style: HighlightStyle) -> &'static str {
    match style {
        HighlightStyle::Solid => UNDERLINE,
        HighlightStyle::Double => "\x1b[4:2m",
        HighlightStyle::Wavy => "\x1b[4:3m",
        HighlightStyle::Dotted => "\x1b[4:4m",
        HighlightStyle::Dashed => "\x1b[4:5m",
    }
}

fn truecolor(hex: &str) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(255)
    };
    format!("\x1b[38;2;{};{};{}m", channel(1..3), channel(3..5), channel(5..7))
}
