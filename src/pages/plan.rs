use serde::Serialize;

use super::markup::{MarkupEngine, MarkupError};

/// One page-top injection the shim echoes into the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Fragment {
    /// External script tag.
    Script { src: String },
    /// External stylesheet tag.
    Stylesheet { href: String },
    /// Literal inline script.
    InlineScript { code: String },
    /// Assignment onto the page-global `userProfile` settings object.
    Setting {
        key: String,
        value: serde_json::Value,
    },
}

/// A host-side mutation the plan requests but does not perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Directive {
    /// Keep the module enabled host-wide.
    EnsureModuleEnabled,
    /// Default a form field to a value for this render.
    FieldDefault { field: String, value: String },
}

/// Ordered page-top injections plus host directives for one page render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderPlan {
    pub fragments: Vec<Fragment>,
    pub directives: Vec<Directive>,
}

impl RenderPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn push_directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Render the fragments, in order, to the markup the shim echoes.
    pub fn to_html(&self, engine: &MarkupEngine) -> Result<String, MarkupError> {
        let mut html = String::new();
        for fragment in &self.fragments {
            html.push_str(&engine.render_fragment(fragment)?);
        }
        Ok(html)
    }
}
