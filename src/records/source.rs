use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::frontmatter::{field_as_string, parse_frontmatter};
use super::{ProjectId, StoreError};
use crate::allocator::{allocate_next, GroupScope, RecordIdentifier};

/// Read-only record lookups against the host's data store.
///
/// Abstracting the store keeps allocation and page planning testable without
/// a live host database.
#[async_trait]
pub trait RecordKeySource: Send + Sync {
    /// Fetch every existing record key of a project, unfiltered.
    ///
    /// `key_field` names the field holding the record key.
    async fn fetch_existing_keys(
        &self,
        project: ProjectId,
        key_field: &str,
    ) -> Result<HashSet<String>, StoreError>;

    /// Map each profile username to its record key.
    ///
    /// Records without a username or key are left out.
    async fn profile_index(
        &self,
        project: ProjectId,
        username_field: &str,
        key_field: &str,
    ) -> Result<BTreeMap<String, String>, StoreError>;
}

/// Check if a filename is a record markdown file.
#[must_use]
pub fn is_record_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Record store backed by a directory tree of Markdown files.
///
/// Records live at `<root>/projects/<project-id>/records/*.md`, each with a
/// YAML frontmatter block carrying its field values.
pub struct DirRecordSource {
    data_root: PathBuf,
}

impl DirRecordSource {
    #[must_use]
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    fn records_path(&self, project: ProjectId) -> PathBuf {
        self.data_root
            .join("projects")
            .join(project.to_string())
            .join("records")
    }

    /// Scan a project's records directory and collect each record's
    /// frontmatter. Unreadable or malformed entries are skipped; a missing
    /// directory is an empty project.
    async fn scan_frontmatter(
        &self,
        project: ProjectId,
    ) -> Result<Vec<serde_yaml::Value>, StoreError> {
        let records_path = self.records_path(project);
        if !records_path.exists() {
            return Ok(Vec::new());
        }

        let mut values = Vec::new();
        let mut entries = fs::read_dir(&records_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let name = match entry.file_name().to_str() {
                Some(n) => n.to_string(),
                None => continue,
            };
            if !file_type.is_file() || !is_record_file(&name) {
                continue;
            }
            let content = match fs::read_to_string(entry.path()).await {
                Ok(c) => c,
                Err(_) => continue,
            };
            match parse_frontmatter(&content) {
                Ok(value) => values.push(value),
                Err(_) => continue,
            }
        }
        Ok(values)
    }
}

#[async_trait]
impl RecordKeySource for DirRecordSource {
    async fn fetch_existing_keys(
        &self,
        project: ProjectId,
        key_field: &str,
    ) -> Result<HashSet<String>, StoreError> {
        let mut keys = HashSet::new();
        for frontmatter in self.scan_frontmatter(project).await? {
            if let Some(key) = field_as_string(&frontmatter, key_field) {
                keys.insert(key);
            }
        }
        Ok(keys)
    }

    async fn profile_index(
        &self,
        project: ProjectId,
        username_field: &str,
        key_field: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        let mut index = BTreeMap::new();
        for frontmatter in self.scan_frontmatter(project).await? {
            let username = match field_as_string(&frontmatter, username_field) {
                Some(u) if !u.is_empty() => u,
                _ => continue,
            };
            let key = match field_as_string(&frontmatter, key_field) {
                Some(k) => k,
                None => continue,
            };
            index.insert(username, key);
        }
        Ok(index)
    }
}

/// Fetch a project's record keys and allocate the next identifier.
///
/// The key set is read fresh on every call; nothing is cached or reserved.
pub async fn next_record_id(
    source: &dyn RecordKeySource,
    project: ProjectId,
    key_field: &str,
    scope: Option<&GroupScope>,
) -> Result<RecordIdentifier, StoreError> {
    let keys = source.fetch_existing_keys(project, key_field).await?;
    Ok(allocate_next(&keys, scope))
}
