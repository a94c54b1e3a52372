//! Marker-grammar rendering pipeline.
//!
//! Parses the inline markers a simplification model emits (`[SECTION:..]`,
//! `[COLOR:..]..[/COLOR]`, `[PAUSE]`, `[CHECKPOINT]`, `[KEY:..]`,
//! `[SYLLABLE:..]`) into an immutable document tree, and renders that tree
//! into display nodes for HTML or terminal surfaces.

pub mod grammar;
pub mod html;
pub mod ir;
pub mod parser;
pub mod renderer;
pub mod segmenter;
pub mod style;
pub mod terminal;

pub use html::HtmlWriter;
pub use ir::{BadgeKind, ColorClass, Document, InlineNode, Paragraph, Section};
pub use parser::MarkerParser;
pub use renderer::{RenderNode, RenderOptions, Renderer, WordSegment};
pub use segmenter::{is_long_word, segment, LONG_WORD_MIN_LEN};
pub use style::StyleVars;
pub use terminal::TerminalWriter;
