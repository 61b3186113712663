use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::records::ProjectId;
use crate::settings::ModuleSettings;

/// Where the host's data-entry form for the profile project lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntryTarget {
    /// First event id of the profile project.
    pub event_id: u64,
    /// First form name of the profile project.
    pub form: String,
}

/// Host-side facts a page render needs, resolved by the shim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContext {
    /// Host webroot URL, trailing slash included.
    pub webroot: String,
    /// Base URL of this module's bundled assets.
    pub module_base: String,
    /// Base URL of the host's stock images.
    pub image_base: String,
    /// Project the rendered page runs under, if any.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Data-entry target of the profile project, when the shim resolved one.
    #[serde(default)]
    pub data_entry: Option<DataEntryTarget>,
}

/// The requesting user, as resolved by the host's access control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub username: String,
    /// Data-access-group the user is restricted to, if any.
    #[serde(default)]
    pub group_id: Option<String>,
}

/// Everything a page-top plan is computed from.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub settings: ModuleSettings,
    pub host: HostContext,
    pub query: HashMap<String, String>,
    pub user: UserContext,
}
