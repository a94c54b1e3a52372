//! HTML writer for rendered nodes, using the `bridger-*` class vocabulary.

use crate::renderer::{RenderNode, WordSegment};
use crate::style::StyleVars;

pub struct HtmlWriter;

impl HtmlWriter {
    /// Serialise nodes to an HTML fragment.
    pub fn to_html(nodes: &[RenderNode]) -> String {
        let mut out = String::new();
        write_nodes(nodes, &mut out);
        out
    }

    /// Serialise nodes inside a `bridger-transformed` container carrying the style variables.
    pub fn to_html_with_style(nodes: &[RenderNode], style: &StyleVars) -> String {
        let mut out = format!(
            "<span class=\"bridger-transformed\" style=\"{}\">",
            escape(&style.to_css())
        );
        write_nodes(nodes, &mut out);
        out.push_str("</span>");
        out
    }
}

fn write_nodes(nodes: &[RenderNode], out: &mut String) {
    for node in nodes {
        write_node(node, out);
    }
}

fn write_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Section { title, children } => {
            out.push_str("<div class=\"bridger-section\">");
            if let Some(title) = title {
                out.push_str("<div class=\"bridger-section-title\">");
                out.push_str(&escape(title));
                out.push_str("</div>");
            }
            write_nodes(children, out);
            out.push_str("</div>");
        }
        RenderNode::SectionSpacer => out.push_str("<div class=\"bridger-section-spacer\"></div>"),
        RenderNode::Chunk { children } => {
            out.push_str("<div class=\"bridger-chunk\">");
            write_nodes(children, out);
            out.push_str("</div>");
        }
        RenderNode::Spacer => out.push_str("<div class=\"bridger-spacer\"></div>"),
        RenderNode::Text { text } => out.push_str(&escape(text)),
        RenderNode::LineBreak => out.push_str("<br>"),
        RenderNode::Badge { kind } => {
            let class = match kind {
                crate::ir::BadgeKind::Pause => "bridger-pause bridger-badge",
                crate::ir::BadgeKind::Checkpoint => "bridger-checkpoint bridger-badge",
            };
            out.push_str(&format!("<span class=\"{class}\">{}</span>", kind.label()));
        }
        RenderNode::KeyTerm { text } => {
            out.push_str(&format!("<span class=\"bridger-key\">{}</span>", escape(text)));
        }
        RenderNode::Syllable { text } => {
            out.push_str(&format!(
                "<span class=\"bridger-syllable\">{}</span>",
                escape(text)
            ));
        }
        RenderNode::ColorSpan { color, children } => {
            match color {
                Some(color) => out.push_str(&format!(
                    "<span class=\"bridger-color bridger-color-{}\">",
                    color.as_str()
                )),
                None => out.push_str("<span class=\"bridger-color\">"),
            }
            write_nodes(children, out);
            out.push_str("</span>");
        }
        RenderNode::LongWord {
            highlighted,
            segments,
        } => {
            if *highlighted {
                out.push_str("<span class=\"bridger-longword bridger-longword-highlight\">");
            } else {
                out.push_str("<span class=\"bridger-longword\">");
            }
            for segment in segments {
                match segment {
                    WordSegment::Text(text) => out.push_str(&escape(text)),
                    WordSegment::Separator => {
                        out.push_str("<span class=\"bridger-syllable-sep\">|</span>")
                    }
                }
            }
            out.push_str("</span>");
        }
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkerParser;
    use crate::renderer::{RenderOptions, Renderer};

    fn html(raw: &str, options: RenderOptions) -> String {
        HtmlWriter::to_html(&Renderer::render(&MarkerParser::parse(raw), &options))
    }

    #[test]
    fn test_markers_to_classes() {
        let out = html(
            "[SECTION:Plan]\n[COLOR:teal]important[/COLOR] stuff [KEY:glossary] [PAUSE]",
            RenderOptions::default(),
        );
        assert_eq!(
            out,
            "<div class=\"bridger-section\"><div class=\"bridger-section-title\">Plan</div>\
             <div class=\"bridger-chunk\"><span class=\"bridger-color bridger-color-teal\">important</span> stuff \
             <span class=\"bridger-key\">glossary</span> <span class=\"bridger-pause bridger-badge\">Pause</span>\
             </div></div>"
        );
    }

    #[test]
    fn test_split_long_word_markup() {
        let out = html(
            "extraordinary",
            RenderOptions {
                highlight_long_words: true,
                split_long_words: true,
            },
        );
        assert!(out.contains(
            "<span class=\"bridger-longword bridger-longword-highlight\">extraor\
             <span class=\"bridger-syllable-sep\">|</span>din\
             <span class=\"bridger-syllable-sep\">|</span>ary</span>"
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let out = html("a < b & \"c\"\nd", RenderOptions::default());
        assert!(out.contains("a &lt; b &amp; &quot;c&quot;<br>d"));
    }

    #[test]
    fn test_unknown_color_has_no_color_class() {
        let out = html("[COLOR:purple]x[/COLOR]", RenderOptions::default());
        assert!(out.contains("<span class=\"bridger-color\">x</span>"));
    }
}
