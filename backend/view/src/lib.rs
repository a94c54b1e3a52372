//! Per-selection view state for Bridger.
//!
//! Each transformed selection keeps its original text, the accepted model
//! output, the parsed document and a cached render. Display toggles and
//! settings changes re-render from the cached document; the parser runs
//! once per accepted result.

pub mod controller;
pub mod listener;
pub mod notice;
pub mod record;

pub use controller::ViewController;
pub use listener::spawn_settings_listener;
pub use notice::{Notice, NoticeLevel};
pub use record::{RecordState, Rendition, TransformRecord};
