//! Transform Event Logger
//!
//! One structured record per step in a selection's lifecycle. Records carry
//! sizes and reasons, never the selected text itself.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformEvent {
    Requested { chars: usize },
    Accepted {
        overlap_ratio: f64,
        length_ratio: f64,
        latency_ms: u64,
    },
    Rejected { reason: String },
    Failed { error_msg: String },
    Toggled { view_mode: String },
    Rerendered,
}

#[derive(Debug, Serialize)]
pub struct TransformEventEntry {
    pub instance_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: TransformEvent,
}

pub struct TransformEventLogger;

impl TransformEventLogger {
    pub fn entry(instance_id: &str, event: TransformEvent) -> TransformEventEntry {
        TransformEventEntry {
            instance_id: instance_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// Emit the event as one JSON line on the `transform_events` target.
    pub fn log(instance_id: &str, event: TransformEvent) {
        let entry = Self::entry(instance_id, event);
        match serde_json::to_string(&entry) {
            Ok(line) => info!(target: "transform_events", event = %line, "Transform event"),
            Err(_) => info!(target: "transform_events", event = ?entry, "Transform event"),
        }
    }
}
