//! Live reading-settings store.
//!
//! Holds the current `Settings` and publishes every effective change to
//! subscribers over a `tokio::sync::watch` channel. Nothing here touches disk.

use anyhow::Result;
use bridger_core::Settings;
use tokio::sync::watch;
use tracing::debug;

use crate::defaults::sanitize_settings;
use crate::io::apply_settings_patch;

pub struct SettingsStore {
    tx: watch::Sender<Settings>,
}

impl SettingsStore {
    pub fn new(initial: Settings) -> Self {
        let (tx, _) = watch::channel(sanitize_settings(initial));
        Self { tx }
    }

    /// Receiver that sees the current value and every later change.
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Replace the settings. Returns `true` if anything changed.
    pub fn set(&self, settings: Settings) -> bool {
        let settings = sanitize_settings(settings);
        let changed = self.tx.send_if_modified(|current| {
            if *current == settings {
                return false;
            }
            *current = settings;
            true
        });
        if changed {
            debug!(receivers = self.tx.receiver_count(), "Settings changed");
        }
        changed
    }

    /// Apply a JSON Merge Patch such as `{"highlightLongWords": true}`.
    /// Returns `true` if anything changed.
    pub fn update(&self, patch: &serde_json::Value) -> Result<bool> {
        let patched = apply_settings_patch(&self.current(), patch)?;
        Ok(self.set(patched))
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridger_core::{HighlightStyle, ViewMode};

    #[tokio::test]
    async fn test_update_notifies_subscribers() {
        let store = SettingsStore::default();
        let mut rx = store.subscribe();

        let changed = store
            .update(&serde_json::json!({ "highlightLongWords": true }))
            .unwrap();
        assert!(changed);

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().highlight_long_words);
    }

    #[tokio::test]
    async fn test_identical_value_does_not_notify() {
        let store = SettingsStore::default();
        let rx = store.subscribe();

        assert!(!store.set(Settings::default()));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_set_sanitises_numbers() {
        let store = SettingsStore::default();
        store.set(Settings {
            line_spacing: f64::NAN,
            highlight_style: HighlightStyle::Dotted,
            view_mode: ViewMode::Original,
            ..Default::default()
        });
        let current = store.current();
        assert_eq!(current.line_spacing, bridger_core::types::DEFAULT_LINE_SPACING);
        assert_eq!(current.highlight_style, HighlightStyle::Dotted);
        assert_eq!(current.view_mode, ViewMode::Original);
    }

    #[test]
    fn test_bad_patch_leaves_settings_untouched() {
        let store = SettingsStore::default();
        assert!(store.update(&serde_json::json!({ "enabled": "yes" })).is_err());
        assert_eq!(store.current(), Settings::default());
    }
}
