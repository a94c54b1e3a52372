//! Structured logging for Bridger.
//!
//! Console output (human-readable or JSON), optional daily-rolling NDJSON
//! files, and transform lifecycle events under the `transform_events` target.

pub mod event_logger;
pub mod logger;

pub use event_logger::{TransformEvent, TransformEventEntry, TransformEventLogger};
pub use logger::init_logger;
