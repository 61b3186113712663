//! Read-only access to a project's record store.

mod frontmatter;
mod source;

pub use frontmatter::{field_as_string, parse_frontmatter, FrontmatterError};
pub use source::{is_record_file, next_record_id, DirRecordSource, RecordKeySource};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Numeric identifier of a host project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read record store: {0}")]
    Io(#[from] std::io::Error),
}
