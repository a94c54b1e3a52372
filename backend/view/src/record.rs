//! Per-selection transform record.

use std::sync::Arc;

use bridger_core::ViewMode;
use bridger_markup::{Document, RenderNode, RenderOptions, Renderer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Lifecycle of a record. `Pending` moves to `Transformed` when a result is
/// accepted, or to `Original` when it is rejected or the call fails. After
/// that the record flips between the two only through toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    Pending,
    Transformed,
    Original,
}

/// What a display surface should show for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rendition {
    /// Awaiting the model; the original text stays in place.
    Pending { text: String },
    Original { text: String },
    Transformed { nodes: Vec<RenderNode> },
}

#[derive(Debug, Clone)]
pub struct TransformRecord {
    pub id: Uuid,
    pub original_text: String,
    pub created_at: DateTime<Utc>,
    transformed_text: Option<String>,
    document: Option<Arc<Document>>,
    state: RecordState,
    rendered: Option<(RenderOptions, Vec<RenderNode>)>,
}

impl TransformRecord {
    pub fn new(original_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_text: original_text.into(),
            created_at: Utc::now(),
            transformed_text: None,
            document: None,
            state: RecordState::Pending,
            rendered: None,
        }
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn transformed_text(&self) -> Option<&str> {
        self.transformed_text.as_deref()
    }

    pub fn document(&self) -> Option<&Arc<Document>> {
        self.document.as_ref()
    }

    /// Whether there is a transformed rendition to switch to.
    pub fn can_toggle(&self) -> bool {
        self.document.is_some() && self.state != RecordState::Pending
    }

    /// Store an accepted result, replacing any earlier one as a whole.
    pub fn accept(&mut self, text: String, document: Document) {
        self.transformed_text = Some(text);
        self.document = Some(Arc::new(document));
        self.rendered = None;
        self.state = RecordState::Transformed;
    }

    /// Fall back to the original text. An earlier accepted result is kept so
    /// the record can still be toggled back to it.
    pub fn fall_back(&mut self) {
        self.state = RecordState::Original;
    }

    /// Show `mode` if the record can. Returns `true` when the state changed.
    pub fn set_view(&mut self, mode: ViewMode) -> bool {
        if !self.can_toggle() {
            return false;
        }
        let next = match mode {
            ViewMode::Original => RecordState::Original,
            ViewMode::Transformed => RecordState::Transformed,
        };
        let changed = self.state != next;
        self.state = next;
        changed
    }

    /// Flip between original and transformed.
    pub fn toggle(&mut self) -> bool {
        match self.state {
            RecordState::Transformed => self.set_view(ViewMode::Original),
            RecordState::Original => self.set_view(ViewMode::Transformed),
            RecordState::Pending => false,
        }
    }

    /// Render the cached document with `options` unless the cache already
    /// holds a tree for them. Returns `true` when the renderer ran.
    pub fn ensure_rendered(&mut self, options: &RenderOptions) -> bool {
        let Some(document) = &self.document else {
            return false;
        };
        if matches!(&self.rendered, Some((cached, _)) if cached == options) {
            return false;
        }
        self.rendered = Some((*options, Renderer::render(document, options)));
        true
    }

    /// Re-run the renderer unconditionally. Returns `true` when there was a document.
    pub fn rerender(&mut self, options: &RenderOptions) -> bool {
        self.rendered = None;
        self.ensure_rendered(options)
    }

    /// Current rendition. A transformed record must have been rendered first.
    pub fn rendition(&self) -> Rendition {
        match (self.state, &self.rendered) {
            (RecordState::Pending, _) => Rendition::Pending {
                text: self.original_text.clone(),
            },
            (RecordState::Transformed, Some((_, nodes))) => Rendition::Transformed {
                nodes: nodes.clone(),
            },
            _ => Rendition::Original {
                text: self.original_text.clone(),
            },
        }
    }
}
