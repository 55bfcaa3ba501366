//! Graceful shutdown handling.

use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawns a task that cancels `cancel` when Ctrl-C is received.
///
/// The task also ends once `cancel` fires for any other reason.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("Received Ctrl-C, stopping after the current sync");
                    cancel.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            },
            _ = cancel.cancelled() => {}
        }
    })
}

/// Cancels `cancel` and waits for the signal listener to exit.
pub async fn shutdown_gracefully(cancel: CancellationToken, listener: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(listener) = listener {
        let _ = listener.await;
    }
}
