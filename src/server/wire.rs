//! Wire types for the line-delimited JSON API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::allocator::RecordIdentifier;
use crate::pages::{HostContext, RenderPlan, UserContext};

/// One request per line, tagged by `op`.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Plan the page-top injections for a host page render.
    #[serde(rename_all = "camelCase")]
    PageTop {
        /// Host page path, as the host reports it.
        page: String,
        #[serde(default)]
        query: HashMap<String, String>,
        user: UserContext,
        host: HostContext,
    },
    /// Allocate the next record identifier in the profile project.
    #[serde(rename_all = "camelCase")]
    NextRecordId {
        /// Data-access-group of the caller, if restricted to one.
        #[serde(default)]
        group_id: Option<String>,
    },
    /// Daemon status.
    Status,
    /// Graceful stop after an optional delay.
    #[serde(rename_all = "camelCase")]
    Shutdown {
        #[serde(default)]
        delay_seconds: u64,
    },
}

/// Response envelope, one per request line.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    #[must_use]
    pub fn data(value: serde_json::Value) -> Self {
        Self {
            ok: true,
            data: Some(value),
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTopData {
    pub plan: RenderPlan,
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct NextRecordIdData {
    pub id: RecordIdentifier,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
    pub version: String,
    pub started_at: String,
    pub uptime: String,
    pub project_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ShutdownData {
    pub message: String,
}
