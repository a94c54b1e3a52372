//! View Controller
//!
//! Owns every live transform record. A selection is recorded as pending,
//! sent to the transformer without holding the lock, then gated, parsed
//! once and rendered. Toggles and settings changes only re-run the renderer
//! over the cached document.

use std::sync::Arc;
use std::time::Instant;

use bridger_core::{BridgerError, Settings, TextTransformer, ViewMode};
use bridger_logging::{TransformEvent, TransformEventLogger};
use bridger_markup::{MarkerParser, RenderOptions};
use bridger_planner::{GateVerdict, OverlapGate};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::notice::{self, Notice};
use crate::record::{RecordState, Rendition, TransformRecord};

struct ViewState {
    /// Last settings received from the settings provider.
    settings: Settings,
    /// Global view mode. Starts from the settings and then changes only
    /// through `toggle_all` or an explicit `viewMode` change in new settings.
    view_mode: ViewMode,
    records: Vec<TransformRecord>,
    parse_count: usize,
    render_count: usize,
    notices: Vec<Notice>,
}

impl ViewState {
    fn record_mut(&mut self, id: Uuid) -> Option<&mut TransformRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::from(&self.settings)
    }
}

/// Shared handle to the per-selection view state. Clones see the same records.
#[derive(Clone)]
pub struct ViewController {
    transformer: Arc<dyn TextTransformer>,
    gate: OverlapGate,
    state: Arc<RwLock<ViewState>>,
}

impl ViewController {
    pub fn new(transformer: Arc<dyn TextTransformer>, gate: OverlapGate, settings: Settings) -> Self {
        Self {
            transformer,
            gate,
            state: Arc::new(RwLock::new(ViewState {
                view_mode: settings.view_mode,
                settings,
                records: Vec::new(),
                parse_count: 0,
                render_count: 0,
                notices: Vec::new(),
            })),
        }
    }

    /// Transform a selection and record the outcome.
    ///
    /// Returns `None` when transforms are disabled or the trimmed selection
    /// is empty. Failures never propagate: the record falls back to the
    /// original text and a notice is queued.
    pub async fn transform_selection(&self, selection: &str) -> Option<Uuid> {
        let text = selection.trim();
        if text.is_empty() {
            return None;
        }

        let id = {
            let mut state = self.state.write().await;
            if !state.settings.enabled {
                debug!("Transforms disabled; ignoring selection");
                return None;
            }
            let record = TransformRecord::new(text);
            let id = record.id;
            state.records.push(record);
            state.notices.push(Notice::info(notice::PROCESSING));
            id
        };
        TransformEventLogger::log(
            &id.to_string(),
            TransformEvent::Requested {
                chars: text.chars().count(),
            },
        );

        let started = Instant::now();
        let result = self.transformer.transform(text).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let mut state = self.state.write().await;
        if state.record_mut(id).is_none() {
            debug!(instance_id = %id, "Record removed before the transform finished");
            return Some(id);
        }
        match result {
            Ok(output) => self.finish_with_output(&mut state, id, text, output, latency_ms),
            Err(err) => Self::finish_with_error(&mut state, id, &err),
        }
        Some(id)
    }

    fn finish_with_output(
        &self,
        state: &mut ViewState,
        id: Uuid,
        input: &str,
        output: String,
        latency_ms: u64,
    ) {
        let report = self.gate.evaluate(input, &output);
        if let GateVerdict::Reject(reason) = report.verdict {
            warn!(
                instance_id = %id,
                reason = reason.as_str(),
                overlap_ratio = report.overlap_ratio,
                length_ratio = report.length_ratio,
                "Model output rejected; keeping original"
            );
            if let Some(record) = state.record_mut(id) {
                record.fall_back();
            }
            state.notices.push(Notice::info(notice::KEPT_ORIGINAL));
            TransformEventLogger::log(
                &id.to_string(),
                TransformEvent::Rejected {
                    reason: reason.as_str().to_string(),
                },
            );
            return;
        }

        let document = MarkerParser::parse(&output);
        state.parse_count += 1;
        let options = state.render_options();
        let view_mode = state.view_mode;
        let mut rendered = false;
        if let Some(record) = state.record_mut(id) {
            record.accept(output, document);
            record.set_view(view_mode);
            if record.state() == RecordState::Transformed {
                rendered = record.ensure_rendered(&options);
            }
        }
        if rendered {
            state.render_count += 1;
        }
        info!(
            instance_id = %id,
            overlap_ratio = report.overlap_ratio,
            latency_ms,
            "Transform accepted"
        );
        TransformEventLogger::log(
            &id.to_string(),
            TransformEvent::Accepted {
                overlap_ratio: report.overlap_ratio,
                length_ratio: report.length_ratio,
                latency_ms,
            },
        );
    }

    fn finish_with_error(state: &mut ViewState, id: Uuid, err: &BridgerError) {
        warn!(instance_id = %id, error = %err, "Transform failed; showing original");
        if let Some(record) = state.record_mut(id) {
            record.fall_back();
        }
        let message = if err.is_cors_blocked() {
            notice::CORS_BLOCKED
        } else {
            notice::TRANSFORM_FAILED
        };
        state.notices.push(Notice::error(message));
        TransformEventLogger::log(
            &id.to_string(),
            TransformEvent::Failed {
                error_msg: err.to_string(),
            },
        );
    }

    /// Flip one record between original and transformed. Returns the new
    /// state, or `None` for an unknown id.
    pub async fn toggle(&self, id: Uuid) -> Option<RecordState> {
        let mut state = self.state.write().await;
        let options = state.render_options();
        let record = state.record_mut(id)?;
        if !record.toggle() {
            return Some(record.state());
        }
        let new_state = record.state();
        let rendered = new_state == RecordState::Transformed && record.ensure_rendered(&options);
        if rendered {
            state.render_count += 1;
        }
        TransformEventLogger::log(
            &id.to_string(),
            TransformEvent::Toggled {
                view_mode: format!("{new_state:?}").to_lowercase(),
            },
        );
        Some(new_state)
    }

    /// Flip the global view mode and apply it to every record.
    pub async fn toggle_all(&self) -> ViewMode {
        let mut state = self.state.write().await;
        let mode = state.view_mode.toggled();
        state.view_mode = mode;
        Self::apply_view_mode(&mut state, mode);
        info!(view_mode = %mode, "Toggled view for all selections");
        mode
    }

    fn apply_view_mode(state: &mut ViewState, mode: ViewMode) {
        let options = state.render_options();
        let mut renders = 0;
        for record in &mut state.records {
            if !record.set_view(mode) {
                continue;
            }
            if mode == ViewMode::Transformed && record.ensure_rendered(&options) {
                renders += 1;
            }
            TransformEventLogger::log(
                &record.id.to_string(),
                TransformEvent::Toggled {
                    view_mode: mode.to_string(),
                },
            );
        }
        state.render_count += renders;
    }

    /// Adopt new settings and re-render every record that has a document.
    /// Returns the number of records re-rendered.
    ///
    /// The global view mode follows `settings.view_mode` only when that value
    /// differs from the previously received settings; otherwise a mode set
    /// by `toggle_all` is kept.
    pub async fn apply_settings(&self, settings: Settings) -> usize {
        let mut state = self.state.write().await;
        let mode_changed = state.settings.view_mode != settings.view_mode;
        if mode_changed {
            state.view_mode = settings.view_mode;
        }
        let view_mode = state.view_mode;
        state.settings = settings;

        let options = state.render_options();
        let mut renders = 0;
        for record in &mut state.records {
            if mode_changed {
                record.set_view(view_mode);
            }
            if record.rerender(&options) {
                renders += 1;
                TransformEventLogger::log(&record.id.to_string(), TransformEvent::Rerendered);
            }
        }
        state.render_count += renders;
        debug!(records = renders, view_mode = %view_mode, "Re-rendered after settings change");
        renders
    }

    /// What to show for a record right now.
    pub async fn display(&self, id: Uuid) -> Option<Rendition> {
        let state = self.state.read().await;
        state.records.iter().find(|r| r.id == id).map(TransformRecord::rendition)
    }

    pub async fn record_state(&self, id: Uuid) -> Option<RecordState> {
        let state = self.state.read().await;
        state.records.iter().find(|r| r.id == id).map(TransformRecord::state)
    }

    pub async fn transformed_text(&self, id: Uuid) -> Option<String> {
        let state = self.state.read().await;
        state
            .records
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.transformed_text().map(str::to_string))
    }

    /// Drop a record whose host content went away.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        state.records.len() != before
    }

    /// Ids of live records, oldest first.
    pub async fn ids(&self) -> Vec<Uuid> {
        let state = self.state.read().await;
        state.records.iter().map(|r| r.id).collect()
    }

    /// Current settings, with the global view mode in effect.
    pub async fn settings(&self) -> Settings {
        let state = self.state.read().await;
        Settings {
            view_mode: state.view_mode,
            ..state.settings.clone()
        }
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.state.read().await.view_mode
    }

    /// Number of parser runs so far.
    pub async fn parse_count(&self) -> usize {
        self.state.read().await.parse_count
    }

    /// Number of renderer runs so far.
    pub async fn render_count(&self) -> usize {
        self.state.read().await.render_count
    }

    /// Take queued notices, oldest first.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().await.notices)
    }
}
