use serde_json::json;
use thiserror::Error;

use super::context::RenderContext;
use super::markup::{MarkupEngine, MarkupError};
use super::plan::{Directive, Fragment, RenderPlan};
use super::{route, Page};
use crate::allocator::GroupScope;
use crate::records::{next_record_id, RecordKeySource, StoreError};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
    #[error("Host context is missing the profile project's data-entry target")]
    MissingDataEntryTarget,
}

/// Query parameter carrying the username a new profile is being created for.
const USERNAME_PARAM: &str = "user_profile_username";

const CLIENT_BOOTSTRAP: &str = "var userProfile = {};";

/// Plan the page-top injections and directives for one page render.
///
/// Every page gets the client settings object bootstrap first; pages in the
/// routing table add their own fragments after it. Unrouted pages get the
/// bootstrap alone.
pub async fn plan_page_top(
    path: &str,
    ctx: &RenderContext,
    store: &dyn RecordKeySource,
    engine: &MarkupEngine,
) -> Result<RenderPlan, PageError> {
    let mut plan = RenderPlan::new();
    plan.push_fragment(Fragment::InlineScript {
        code: CLIENT_BOOTSTRAP.to_string(),
    });

    let Some(page) = route(path) else {
        return Ok(plan);
    };

    match page {
        Page::ModuleManager => plan_module_manager(ctx, &mut plan),
        Page::DataEntry => plan_data_entry(ctx, &mut plan),
        Page::UserList => plan_user_list(ctx, store, engine, &mut plan).await?,
    }

    Ok(plan)
}

/// Module-manager control center: configuration assets, plus the directive
/// keeping the module enabled everywhere. Served even with no profile
/// project configured.
fn plan_module_manager(ctx: &RenderContext, plan: &mut RenderPlan) {
    plan.push_directive(Directive::EnsureModuleEnabled);
    plan.push_fragment(Fragment::Script {
        src: asset_url(&ctx.host.module_base, "js/config.js"),
    });
    plan.push_fragment(Fragment::Stylesheet {
        href: asset_url(&ctx.host.module_base, "css/config.css"),
    });
    plan.push_fragment(Fragment::Setting {
        key: "modulePrefix".to_string(),
        value: json!(ctx.settings.module_prefix),
    });
}

/// Data-entry form: when the render was reached through a "create profile"
/// button, default the username field to the chosen user.
fn plan_data_entry(ctx: &RenderContext, plan: &mut RenderPlan) {
    let Some(project) = ctx.settings.project_id else {
        return;
    };
    // Only the profile project's own form gets the default.
    if ctx.host.project_id != Some(project) {
        return;
    }
    let Some(username) = ctx.query.get(USERNAME_PARAM).filter(|u| !u.is_empty()) else {
        return;
    };
    plan.push_directive(Directive::FieldDefault {
        field: ctx.settings.username_field.clone(),
        value: username.clone(),
    });
}

/// Browse-users screen: the add/edit button settings object, then the script
/// and stylesheet that wire the buttons into the user table.
async fn plan_user_list(
    ctx: &RenderContext,
    store: &dyn RecordKeySource,
    engine: &MarkupEngine,
    plan: &mut RenderPlan,
) -> Result<(), PageError> {
    let Some(project) = ctx.settings.project_id else {
        return Ok(());
    };
    let target = ctx
        .host
        .data_entry
        .as_ref()
        .ok_or(PageError::MissingDataEntryTarget)?;

    let scope = ctx.user.group_id.clone().and_then(GroupScope::new);
    let next_id = next_record_id(
        store,
        project,
        &ctx.settings.record_key_field,
        scope.as_ref(),
    )
    .await?;
    let profiles = store
        .profile_index(
            project,
            &ctx.settings.username_field,
            &ctx.settings.record_key_field,
        )
        .await?;

    let entry_url = format!(
        "{}?pid={}&event_id={}&page={}",
        asset_url(&ctx.host.webroot, "DataEntry/index.php"),
        project,
        target.event_id,
        target.form
    );

    let add_button = engine.profile_button(
        &asset_url(&ctx.host.image_base, "user_add3.png"),
        "Create user profile",
    )?;
    let edit_button = engine.profile_button(
        &asset_url(&ctx.host.image_base, "user_edit.png"),
        "Edit user profile",
    )?;

    plan.push_fragment(Fragment::Setting {
        key: "addEditButtons".to_string(),
        value: json!({
            "nextProfileId": next_id,
            "existingProfiles": profiles,
            "url": entry_url,
            "addButton": add_button,
            "editButton": edit_button,
        }),
    });
    plan.push_fragment(Fragment::Script {
        src: asset_url(&ctx.host.module_base, "js/add_edit_buttons.js"),
    });
    plan.push_fragment(Fragment::Stylesheet {
        href: asset_url(&ctx.host.module_base, "css/add_edit_buttons.css"),
    });

    Ok(())
}

/// Join a host base URL and a relative path.
fn asset_url(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
