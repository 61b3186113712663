//! Line-delimited JSON service surface: one request per line in, one
//! envelope per line out.

pub mod handlers;
pub mod wire;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::pages::MarkupEngine;
use crate::records::RecordKeySource;
use crate::settings::ModuleSettings;
use handlers::dispatch;
use wire::{Envelope, Request};

/// Daemon version (from Cargo.toml)
pub const DAEMON_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Signal type for daemon shutdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownSignal {
    None,
    Shutdown,
}

/// Shared state behind every connection.
pub struct AppState {
    pub settings: ModuleSettings,
    pub store: Arc<dyn RecordKeySource>,
    pub engine: MarkupEngine,
    pub started_at: DateTime<Utc>,
    pub shutdown_tx: Arc<watch::Sender<ShutdownSignal>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        settings: ModuleSettings,
        store: Arc<dyn RecordKeySource>,
        shutdown_tx: Arc<watch::Sender<ShutdownSignal>>,
    ) -> Self {
        Self {
            settings,
            store,
            engine: MarkupEngine::new(),
            started_at: Utc::now(),
            shutdown_tx,
        }
    }
}

const ENCODE_FAILURE_RESPONSE: &str = r#"{"ok":false,"error":"Failed to encode response"}"#;

/// Accept connections until a shutdown signal arrives.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    mut shutdown_rx: watch::Receiver<ShutdownSignal>,
) -> std::io::Result<()> {
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        debug!("Accepted connection from {peer}");
                        let state = state.clone();
                        tokio::spawn(async move {
                            handle_connection(stream, state).await;
                        });
                    }
                    Err(e) => warn!("Failed to accept connection: {e}"),
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                match *shutdown_rx.borrow() {
                    ShutdownSignal::Shutdown => {
                        info!("Received shutdown signal, stopping server...");
                        break;
                    }
                    ShutdownSignal::None => {}
                }
            }
        }
    }
    Ok(())
}

/// Serve one connection line by line. A malformed line yields an error
/// envelope and the connection keeps serving; a closed or broken socket ends
/// the task.
async fn handle_connection(stream: TcpStream, state: Arc<AppState>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                debug!("Connection read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let envelope = match serde_json::from_str::<Request>(&line) {
            Ok(request) => dispatch(&state, request).await,
            Err(e) => {
                warn!("Rejecting malformed request: {e}");
                Envelope::error(format!("Invalid request: {e}"))
            }
        };
        let mut response = serde_json::to_string(&envelope)
            .unwrap_or_else(|_| ENCODE_FAILURE_RESPONSE.to_string());
        response.push('\n');
        if let Err(e) = write_half.write_all(response.as_bytes()).await {
            debug!("Connection write failed: {e}");
            break;
        }
    }
}
