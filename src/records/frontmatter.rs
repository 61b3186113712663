use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("Invalid frontmatter format: {0}")]
    InvalidFormat(String),
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Parse the YAML frontmatter block of a record document.
///
/// Record files open with a `---` delimited YAML block; everything after the
/// closing delimiter is narrative body and is not inspected here.
pub fn parse_frontmatter(content: &str) -> Result<serde_yaml::Value, FrontmatterError> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.first() != Some(&"---") {
        return Err(FrontmatterError::InvalidFormat(
            "Content must start with '---'".to_string(),
        ));
    }

    let end_idx = lines
        .iter()
        .skip(1)
        .position(|&line| line == "---")
        .ok_or_else(|| {
            FrontmatterError::InvalidFormat("Missing closing '---' for frontmatter".to_string())
        })?;

    let frontmatter_yaml = lines.get(1..=end_idx).unwrap_or(&[]).join("\n");
    let value: serde_yaml::Value = serde_yaml::from_str(&frontmatter_yaml)?;

    Ok(value)
}

/// Read a frontmatter field as a record value string.
///
/// Strings come back verbatim; numbers are rendered in decimal, matching how
/// the host writes numeric record keys. Other YAML shapes are not field
/// values.
#[must_use]
pub fn field_as_string(frontmatter: &serde_yaml::Value, field: &str) -> Option<String> {
    match frontmatter.get(field)? {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter_basic() {
        let content = "---\nrecord_id: \"5-2\"\nusername: alice\n---\n\n# Alice\n\nProfile body.";
        let value = parse_frontmatter(content).unwrap();
        assert_eq!(field_as_string(&value, "record_id").as_deref(), Some("5-2"));
        assert_eq!(field_as_string(&value, "username").as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_frontmatter_missing_opening() {
        let content = "# No Frontmatter\n\nJust content.";
        assert!(parse_frontmatter(content).is_err());
    }

    #[test]
    fn test_parse_frontmatter_missing_closing() {
        let content = "---\nrecord_id: 1\n# Title";
        assert!(parse_frontmatter(content).is_err());
    }

    #[test]
    fn test_field_as_string_renders_numbers_in_decimal() {
        let value = parse_frontmatter("---\nrecord_id: 7\n---\n").unwrap();
        assert_eq!(field_as_string(&value, "record_id").as_deref(), Some("7"));
    }

    #[test]
    fn test_field_as_string_skips_structured_values() {
        let value = parse_frontmatter("---\nrecord_id:\n  nested: 1\n---\n").unwrap();
        assert_eq!(field_as_string(&value, "record_id"), None);
        assert_eq!(field_as_string(&value, "missing"), None);
    }
}
