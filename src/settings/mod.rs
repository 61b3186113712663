//! Module settings: which project stores user profiles and which fields the
//! module touches. Loaded once at startup and passed by value, never read
//! ambiently.

mod loader;
pub use loader::load_settings;

use crate::records::ProjectId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Static regex for validating host field names (compiled once on first use)
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
pub static FIELD_NAME_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[a-z][a-z0-9_]*$").expect("FIELD_NAME_REGEX is a valid regex literal")
});

fn default_username_field() -> String {
    "username".to_string()
}

fn default_record_key_field() -> String {
    "record_id".to_string()
}

fn default_module_prefix() -> String {
    "user_profile".to_string()
}

/// Module settings, deserialized from `settings.toml` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleSettings {
    /// The project that stores one record per user profile. When unset, the
    /// project-bound pages plan nothing beyond the bootstrap.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Field of the profile project that holds the profile's username.
    #[serde(default = "default_username_field")]
    pub username_field: String,
    /// Field that holds the record key.
    #[serde(default = "default_record_key_field")]
    pub record_key_field: String,
    /// Prefix under which the host registered this module.
    #[serde(default = "default_module_prefix")]
    pub module_prefix: String,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            project_id: None,
            username_field: default_username_field(),
            record_key_field: default_record_key_field(),
            module_prefix: default_module_prefix(),
        }
    }
}

/// Validate the settings and return an error message if invalid.
pub fn validate_settings(settings: &ModuleSettings) -> Result<(), String> {
    for (name, value) in [
        ("username_field", &settings.username_field),
        ("record_key_field", &settings.record_key_field),
        ("module_prefix", &settings.module_prefix),
    ] {
        if !FIELD_NAME_REGEX.is_match(value) {
            return Err(format!(
                "{name} '{value}' must start with a lowercase letter and contain only lowercase letters, digits, and underscores"
            ));
        }
    }
    Ok(())
}

/// Resolve the default data directory.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".profile-daemon"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ModuleSettings::default();
        assert_eq!(settings.project_id, None);
        assert_eq!(settings.username_field, "username");
        assert_eq!(settings.record_key_field, "record_id");
        assert_eq!(settings.module_prefix, "user_profile");
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_parse_full_settings() {
        let settings: ModuleSettings = toml::from_str(
            "project_id = 14\nusername_field = \"user_profile_username\"\nrecord_key_field = \"record_id\"\nmodule_prefix = \"redcap_user_profile\"\n",
        )
        .unwrap();
        assert_eq!(settings.project_id, Some(ProjectId(14)));
        assert_eq!(settings.username_field, "user_profile_username");
        assert_eq!(settings.module_prefix, "redcap_user_profile");
    }

    #[test]
    fn test_parse_applies_field_defaults() {
        let settings: ModuleSettings = toml::from_str("project_id = 3\n").unwrap();
        assert_eq!(settings.project_id, Some(ProjectId(3)));
        assert_eq!(settings.username_field, "username");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<ModuleSettings, _> = toml::from_str("projcet_id = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_field_names() {
        let mut settings = ModuleSettings {
            username_field: "User Name".to_string(),
            ..ModuleSettings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.contains("username_field"));

        settings.username_field = "1username".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.username_field = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_field_name_regex_shape() {
        assert!(FIELD_NAME_REGEX.is_match("user_profile_username"));
        assert!(FIELD_NAME_REGEX.is_match("a"));
        assert!(!FIELD_NAME_REGEX.is_match("_username"));
        assert!(!FIELD_NAME_REGEX.is_match("userName"));
    }
}
