use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::HandlerError;
use crate::server::wire::{ShutdownData, StatusData};
use crate::server::{AppState, ShutdownSignal, DAEMON_VERSION};

/// Report daemon version, start time, uptime, and configuration state.
pub fn status(state: &Arc<AppState>) -> Result<serde_json::Value, HandlerError> {
    let elapsed = Utc::now().signed_duration_since(state.started_at);
    let uptime = std::time::Duration::from_secs(u64::try_from(elapsed.num_seconds()).unwrap_or(0));

    Ok(serde_json::to_value(StatusData {
        version: DAEMON_VERSION.to_string(),
        started_at: state.started_at.to_rfc3339(),
        uptime: humantime::format_duration(uptime).to_string(),
        project_configured: state.settings.project_id.is_some(),
    })?)
}

/// Stop the daemon after the requested delay.
pub fn shutdown(
    state: &Arc<AppState>,
    delay_seconds: u64,
) -> Result<serde_json::Value, HandlerError> {
    info!("Shutdown requested with delay: {} seconds", delay_seconds);

    // Clone the sender for use in the spawned task
    let shutdown_tx = state.shutdown_tx.clone();

    // Spawn a task to handle the delayed shutdown
    // Always wait a small amount of time to ensure the response is sent before shutting down
    tokio::spawn(async move {
        if delay_seconds > 0 {
            tokio::time::sleep(tokio::time::Duration::from_secs(delay_seconds)).await;
        } else {
            // Small delay to ensure the response is fully sent before shutdown
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        }
        let _ = shutdown_tx.send(ShutdownSignal::Shutdown);
    });

    let message = if delay_seconds > 0 {
        format!("Daemon will shut down in {delay_seconds} seconds")
    } else {
        "Daemon shutting down".to_string()
    };

    Ok(serde_json::to_value(ShutdownData { message })?)
}
