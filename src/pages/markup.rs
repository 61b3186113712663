use handlebars::Handlebars;
use serde_json::json;
use thiserror::Error;

use super::plan::Fragment;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Settings value error: {0}")]
    Json(#[from] serde_json::Error),
}

const SCRIPT_TAG: &str = r#"<script src="{{src}}"></script>"#;
const STYLESHEET_TAG: &str = r#"<link rel="stylesheet" href="{{href}}">"#;
const PROFILE_BUTTON: &str =
    r#"<button id="user-profile-btn" type="button"><img src="{{icon_url}}"><span>{{label}}</span></button>"#;

/// Renders plan fragments and widget markup. Attribute values pass through
/// the template engine's HTML escaping.
pub struct MarkupEngine {
    handlebars: Handlebars<'static>,
}

impl MarkupEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }

    /// Render one plan fragment to the markup the shim echoes.
    pub fn render_fragment(&self, fragment: &Fragment) -> Result<String, MarkupError> {
        match fragment {
            Fragment::Script { src } => Ok(self
                .handlebars
                .render_template(SCRIPT_TAG, &json!({ "src": src }))?),
            Fragment::Stylesheet { href } => Ok(self
                .handlebars
                .render_template(STYLESHEET_TAG, &json!({ "href": href }))?),
            Fragment::InlineScript { code } => Ok(format!("<script>{code}</script>")),
            Fragment::Setting { key, value } => {
                let json = script_safe_json(value)?;
                Ok(format!("<script>userProfile.{key} = {json};</script>"))
            }
        }
    }

    /// Render the markup for an add/edit profile button.
    pub fn profile_button(&self, icon_url: &str, label: &str) -> Result<String, MarkupError> {
        Ok(self.handlebars.render_template(
            PROFILE_BUTTON,
            &json!({ "icon_url": icon_url, "label": label }),
        )?)
    }
}

impl Default for MarkupEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a settings value for embedding in an inline script.
///
/// `<` is escaped so a `</script>` sequence inside a string value cannot
/// terminate the surrounding tag.
fn script_safe_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}
