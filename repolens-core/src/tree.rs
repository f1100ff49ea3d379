//! Tree-listing data model

use serde::{Deserialize, Serialize};

/// Kind of a tree-listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A fetchable file (git blob)
    File,
    /// A directory (git tree) — structural only, never fetched
    Dir,
}

/// One entry of a repository tree listing: path, kind, declared size.
///
/// Produced once per request from the upstream listing and never mutated.
/// Paths are slash-separated and relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub path: String,
    pub kind: NodeKind,
    /// Declared blob size in bytes; directories and some listings omit it
    pub size: Option<u64>,
}

impl TreeNode {
    pub fn file(path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File,
            size,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Dir,
            size: None,
        }
    }

    /// Number of directory separators above this entry (root files are depth 0)
    pub fn depth(&self) -> usize {
        self.path.matches('/').count()
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[idx + 1..]),
            _ => None,
        }
    }
}
