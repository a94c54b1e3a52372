//! Marker tokens shared by the model prompt and the parser.
//!
//! Changing any of these is a breaking change for both sides.

pub const SECTION_OPEN: &str = "[SECTION:";
pub const COLOR_OPEN: &str = "[COLOR:";
pub const COLOR_CLOSE: &str = "[/COLOR]";
pub const PAUSE: &str = "[PAUSE]";
pub const CHECKPOINT: &str = "[CHECKPOINT]";
pub const KEY_OPEN: &str = "[KEY:";
pub const SYLLABLE_OPEN: &str = "[SYLLABLE:";

/// Colour names the model may use inside `[COLOR:name]`.
pub const COLOR_NAMES: [&str; 6] = ["amber", "teal", "rose", "sky", "lime", "slate"];

/// Human-readable description of the grammar, embedded in the model prompt.
pub fn describe() -> String {
    [
        format!("{SECTION_OPEN}Title] starts a titled section."),
        format!(
            "{COLOR_OPEN}name]text{COLOR_CLOSE} emphasises text; name is one of {}.",
            COLOR_NAMES.join(", ")
        ),
        format!("{PAUSE} marks a natural place to rest."),
        format!("{CHECKPOINT} marks a point to check understanding."),
        format!("{KEY_OPEN}term] marks a key term."),
        format!("{SYLLABLE_OPEN}syl-la-ble] shows how to break up a hard word."),
    ]
    .join("\n")
}
