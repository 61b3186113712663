//! Request handlers behind the wire dispatch.

mod daemon;
mod next_record_id;
mod page_top;

use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use super::wire::{Envelope, Request};
use super::AppState;
use crate::pages::{MarkupError, PageError};
use crate::records::StoreError;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Page(#[from] PageError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Markup(#[from] MarkupError),
    #[error("No profile project is configured")]
    ProjectNotConfigured,
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Route one request to its handler and wrap the outcome in an envelope.
pub async fn dispatch(state: &Arc<AppState>, request: Request) -> Envelope {
    let result = match request {
        Request::PageTop {
            page,
            query,
            user,
            host,
        } => page_top::page_top(state, &page, query, user, host).await,
        Request::NextRecordId { group_id } => {
            next_record_id::next_record_id(state, group_id).await
        }
        Request::Status => daemon::status(state),
        Request::Shutdown { delay_seconds } => daemon::shutdown(state, delay_seconds),
    };

    match result {
        Ok(value) => Envelope::data(value),
        Err(e) => {
            warn!("Request failed: {e}");
            Envelope::error(e.to_string())
        }
    }
}
