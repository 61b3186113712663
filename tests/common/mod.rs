//! Common test utilities

use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write one record file into a project's records directory.
///
/// `frontmatter` is the YAML between the `---` delimiters, without them.
#[allow(dead_code)] // Test utility for integration tests
pub fn write_record(data_root: &Path, project: u64, file_stem: &str, frontmatter: &str) {
    let records_dir = data_root
        .join("projects")
        .join(project.to_string())
        .join("records");
    std::fs::create_dir_all(&records_dir).expect("Failed to create records directory");
    let content = format!("---\n{frontmatter}\n---\n\n# {file_stem}\n");
    std::fs::write(records_dir.join(format!("{file_stem}.md")), content)
        .expect("Failed to write record file");
}

/// Write a profile record carrying a username and a record key.
#[allow(dead_code)] // Test utility for integration tests
pub fn write_profile_record(data_root: &Path, project: u64, username: &str, record_key: &str) {
    let frontmatter = format!("record_id: \"{record_key}\"\nusername: \"{username}\"");
    write_record(data_root, project, record_key, &frontmatter);
}
