use std::sync::Arc;
use tracing::info;

use super::HandlerError;
use crate::allocator::GroupScope;
use crate::records;
use crate::server::wire::NextRecordIdData;
use crate::server::AppState;

/// Allocate the next record identifier in the profile project, scoped to the
/// caller's data-access-group when one is given.
pub async fn next_record_id(
    state: &Arc<AppState>,
    group_id: Option<String>,
) -> Result<serde_json::Value, HandlerError> {
    let project = state
        .settings
        .project_id
        .ok_or(HandlerError::ProjectNotConfigured)?;
    let scope = group_id.and_then(GroupScope::new);
    let id = records::next_record_id(
        state.store.as_ref(),
        project,
        &state.settings.record_key_field,
        scope.as_ref(),
    )
    .await?;
    info!("Allocated next record id {id} for project {project}");
    Ok(serde_json::to_value(NextRecordIdData { id })?)
}
