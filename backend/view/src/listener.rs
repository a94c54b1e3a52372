//! Settings change listener.

use bridger_core::Settings;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::ViewController;

/// Re-render every live record each time the settings change. The task
/// ends when the sender side is dropped.
pub fn spawn_settings_listener(
    controller: ViewController,
    mut settings_rx: watch::Receiver<Settings>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while settings_rx.changed().await.is_ok() {
            let settings = settings_rx.borrow_and_update().clone();
            let renders = controller.apply_settings(settings).await;
            debug!(renders, "Applied settings change");
        }
        debug!("Settings channel closed; listener stopped");
    })
}
