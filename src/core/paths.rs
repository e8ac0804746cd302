//! Path utilities
//!
//! Reference segment handling, README name matching, and root containment checks.

use std::path::{Component, Path};

/// File name recognized as a README (matched case-insensitively)
pub const README_NAME: &str = "README.md";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Check whether a file name is a README
pub fn is_readme_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(README_NAME)
}

/// Check whether a path points at a README (by file name only)
pub fn is_readme(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(is_readme_name)
        .unwrap_or(false)
}

/// Number of normal components in a path, used to order READMEs root-to-leaf
pub fn depth(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

/// Split a reference into its non-empty '/' separated segments
pub fn segments(reference: &str) -> Vec<&str> {
    reference
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Check that a path lies under root by its components
///
/// Symlinks are not followed, so a checkout linked into the root counts as
/// inside it.
pub fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}
