//! Context data model
//!
//! Resolved references and the assembled, ordered context that every output
//! format renders from.

use std::path::{Path, PathBuf};

/// A reference resolved to a concrete path under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The reference as the user typed it (trimmed)
    pub reference: String,

    /// First segment of the reference
    pub codebase: String,

    /// Directory where README traversal stops (inclusive)
    pub codebase_root: PathBuf,

    /// Absolute path the reference resolved to
    pub path: PathBuf,
}

impl ResolvedPath {
    pub fn new(
        reference: impl Into<String>,
        codebase: impl Into<String>,
        codebase_root: impl Into<PathBuf>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reference: reference.into(),
            codebase: codebase.into(),
            codebase_root: codebase_root.into(),
            path: path.into(),
        }
    }

    /// Directory from which README traversal starts
    pub fn start_dir(&self) -> &Path {
        if self.path.is_file() {
            self.path.parent().unwrap_or(&self.path)
        } else {
            &self.path
        }
    }
}

/// Which section of the output an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Readme,
    Body,
}

/// One file in the assembled context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub kind: EntryKind,
    pub path: PathBuf,
    pub content: String,
}

impl ContextEntry {
    pub fn readme(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Readme,
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn body(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Body,
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn is_readme(&self) -> bool {
        self.kind == EntryKind::Readme
    }
}

/// Ordered context: README entries first, then body entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledContext {
    entries: Vec<ContextEntry>,
    readme_count: usize,
}

impl AssembledContext {
    /// Build from the two sections; the README section always comes first
    pub fn from_sections(readmes: Vec<ContextEntry>, body: Vec<ContextEntry>) -> Self {
        let readme_count = readmes.len();
        let mut entries = readmes;
        entries.extend(body);
        Self {
            entries,
            readme_count,
        }
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    pub fn readmes(&self) -> &[ContextEntry] {
        &self.entries[..self.readme_count]
    }

    pub fn body(&self) -> &[ContextEntry] {
        &self.entries[self.readme_count..]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total content size in bytes
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.content.len()).sum()
    }
}
