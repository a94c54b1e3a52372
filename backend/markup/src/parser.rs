//! Marker Parser
//!
//! Turns raw model output into a [`Document`]. Parsing is total: malformed or
//! unterminated markers stay behind as literal text and nothing ever fails.
//!
//! Precedence, outer to inner: sections, paragraphs, colour spans, then the
//! inline markers (badges, key terms, syllables).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::ir::{BadgeKind, ColorClass, Document, InlineNode, Paragraph, Section};

static SECTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[SECTION:([^\]]+)\]").unwrap());

static PARAGRAPH_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[COLOR:([A-Za-z0-9_-]+)\](.*?)\[/COLOR\]").unwrap());

static INLINE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(PAUSE|CHECKPOINT)\]|\[KEY:([^\]]+)\]|\[SYLLABLE:([^\]]+)\]").unwrap()
});

pub struct MarkerParser;

impl MarkerParser {
    /// Parse raw model output into sections, paragraphs and inline nodes.
    pub fn parse(raw: &str) -> Document {
        let sections: Vec<Section> = split_sections(raw)
            .into_iter()
            .map(|(title, body)| Section {
                title,
                body: body.to_string(),
                paragraphs: split_paragraphs(body)
                    .into_iter()
                    .map(|block| Paragraph {
                        inlines: parse_decorated(block),
                    })
                    .collect(),
            })
            .collect();

        let document = Document { sections };
        debug!(
            sections = document.sections.len(),
            paragraphs = document.paragraph_count(),
            "Parsed marker document"
        );
        document
    }
}

/// Split on `[SECTION:name]` markers.
///
/// Text before the first marker becomes an untitled section when it is not
/// blank. Without any marker the whole input is one untitled section.
pub fn split_sections(raw: &str) -> Vec<(Option<String>, &str)> {
    let markers: Vec<(usize, usize, &str)> = SECTION_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.start(), whole.end(), name.as_str()))
        })
        .collect();

    let Some(&(first_start, _, _)) = markers.first() else {
        return vec![(None, raw)];
    };

    let mut sections = Vec::with_capacity(markers.len() + 1);

    let preface = raw[..first_start].trim();
    if !preface.is_empty() {
        sections.push((None, preface));
    }

    for (i, &(_, body_start, name)) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(raw.len(), |next| next.0);
        let title = name.trim();
        let title = (!title.is_empty()).then(|| title.to_string());
        sections.push((title, &raw[body_start..body_end]));
    }

    sections
}

/// Split a section body on blank lines, trimming blocks and dropping empty ones.
pub fn split_paragraphs(body: &str) -> Vec<&str> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    PARAGRAPH_BREAK_RE
        .split(trimmed)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Extract `[COLOR:name]..[/COLOR]` spans, then inline markers everywhere else.
///
/// Colour spans do not nest: an inner `[COLOR:..]` is kept as literal text
/// inside the outer span, and the stray `[/COLOR]` after it stays literal too.
pub fn parse_decorated(text: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in COLOR_RE.captures_iter(text) {
        let (Some(whole), Some(name), Some(body)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        nodes.extend(parse_inline(&text[last..whole.start()]));

        let name = name.as_str().to_ascii_lowercase();
        nodes.push(InlineNode::ColorSpan {
            color: ColorClass::from_name(&name),
            name,
            children: parse_inline(body.as_str()),
        });
        last = whole.end();
    }

    nodes.extend(parse_inline(&text[last..]));
    nodes
}

/// Single left-to-right scan for badges, key terms and syllables.
pub fn parse_inline(text: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in INLINE_MARKER_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_plain(&mut nodes, &text[last..whole.start()]);

        if let Some(badge) = caps.get(1).and_then(|m| BadgeKind::from_marker(m.as_str())) {
            nodes.push(InlineNode::Badge(badge));
        } else if let Some(key) = caps.get(2) {
            nodes.push(InlineNode::KeyTerm(key.as_str().trim().to_string()));
        } else if let Some(syllable) = caps.get(3) {
            nodes.push(InlineNode::Syllable(syllable.as_str().trim().to_string()));
        }
        last = whole.end();
    }

    push_plain(&mut nodes, &text[last..]);
    nodes
}

fn push_plain(nodes: &mut Vec<InlineNode>, text: &str) {
    if !text.is_empty() {
        nodes.push(InlineNode::PlainRun(text.to_string()));
    }
}
