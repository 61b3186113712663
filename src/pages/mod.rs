//! Page routing and page-top render planning for the host's screens.

mod context;
mod markup;
mod plan;
mod planner;

pub use context::{DataEntryTarget, HostContext, RenderContext, UserContext};
pub use markup::{MarkupEngine, MarkupError};
pub use plan::{Directive, Fragment, RenderPlan};
pub use planner::{plan_page_top, PageError};

/// Host pages this module decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ModuleManager,
    DataEntry,
    UserList,
}

impl Page {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::ModuleManager => "module-manager",
            Page::DataEntry => "data-entry",
            Page::UserList => "user-list",
        }
    }
}

/// Routing table from host page paths to the pages they name.
pub const ROUTES: &[(&str, Page)] = &[
    ("ExternalModules/manager/control_center.php", Page::ModuleManager),
    ("DataEntry/index.php", Page::DataEntry),
    ("ControlCenter/view_users.php", Page::UserList),
];

/// Resolve a host page path against the routing table.
///
/// The query string and any leading slash are ignored, and matching is on the
/// path suffix, so deployments under a subdirectory still route. Paths not in
/// the table belong to pages this module leaves alone.
#[must_use]
pub fn route(path: &str) -> Option<Page> {
    let path = path
        .split('?')
        .next()
        .unwrap_or(path)
        .trim_start_matches('/');
    ROUTES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map(|&(_, page)| page)
}
