use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::HandlerError;
use crate::pages::{plan_page_top, HostContext, RenderContext, UserContext};
use crate::server::wire::PageTopData;
use crate::server::AppState;

/// Plan the page-top injections for one host page render and render them.
pub async fn page_top(
    state: &Arc<AppState>,
    page: &str,
    query: HashMap<String, String>,
    user: UserContext,
    host: HostContext,
) -> Result<serde_json::Value, HandlerError> {
    debug!("Planning page top for {page}");
    let ctx = RenderContext {
        settings: state.settings.clone(),
        host,
        query,
        user,
    };
    let plan = plan_page_top(page, &ctx, state.store.as_ref(), &state.engine).await?;
    let html = plan.to_html(&state.engine)?;
    Ok(serde_json::to_value(PageTopData { plan, html })?)
}
