use std::path::Path;
use tracing::debug;

use super::{validate_settings, ModuleSettings, SettingsError};

/// Load the module settings from a TOML file.
///
/// Returns `Ok(ModuleSettings::default())` if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError`] if the file exists but cannot be read, parsed,
/// or validated.
pub fn load_settings(path: &Path) -> Result<ModuleSettings, SettingsError> {
    if !path.exists() {
        debug!(
            "Module settings not found at {}; using defaults",
            path.display()
        );
        return Ok(ModuleSettings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: ModuleSettings = toml::from_str(&content)?;
    validate_settings(&settings).map_err(SettingsError::Invalid)?;
    debug!("Loaded module settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, ModuleSettings::default());
    }

    #[test]
    fn test_load_parses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "project_id = 14\nusername_field = \"netid\"\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.project_id.map(|p| p.0), Some(14));
        assert_eq!(settings.username_field, "netid");
    }

    #[test]
    fn test_load_rejects_invalid_field_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "username_field = \"Bad Name\"\n").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "project_id = [not toml").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }
}
