//! Extension allow-list

use std::collections::BTreeSet;
use std::path::Path;

use crate::core::paths::is_readme;

/// Set of allowed file extensions, each stored with its leading '.'
///
/// An empty filter admits every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Build a filter; `py` and `.py` are equivalent, matching is case-insensitive
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty() && e != ".")
            .map(|e| {
                if e.starts_with('.') {
                    e
                } else {
                    format!(".{}", e)
                }
            })
            .collect();
        Self { extensions }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// True when the filter is empty or the file's last dot-suffix is allowed
    pub fn should_include(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        extension_of(path)
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Like `should_include`, but README files always pass
    pub fn admits(&self, path: &Path) -> bool {
        is_readme(path) || self.should_include(path)
    }
}

/// Last dot-delimited suffix of the file name, including the dot
fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|i| &name[i..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_admits_everything() {
        let filter = ExtensionFilter::default();
        assert!(filter.is_empty());
        assert!(filter.should_include(Path::new("a/b.js")));
        assert!(filter.should_include(Path::new("Makefile")));
    }

    #[test]
    fn test_extension_membership() {
        let filter = ExtensionFilter::new([".py"]);
        assert!(filter.should_include(Path::new("/src/x/agent.py")));
        assert!(!filter.should_include(Path::new("/src/x/config.js")));
        assert!(!filter.should_include(Path::new("/src/x/Makefile")));
    }

    #[test]
    fn test_last_suffix_only() {
        let filter = ExtensionFilter::new([".gz"]);
        assert!(filter.should_include(Path::new("dump.tar.gz")));

        let filter = ExtensionFilter::new([".tar"]);
        assert!(!filter.should_include(Path::new("dump.tar.gz")));
    }

    #[test]
    fn test_normalizes_leading_dot_and_case() {
        let filter = ExtensionFilter::new(["py", " .RS "]);
        assert_eq!(filter.extensions().collect::<Vec<_>>(), vec![".py", ".rs"]);
        assert!(filter.should_include(Path::new("main.PY")));
    }

    #[test]
    fn test_readmes_always_admitted() {
        let filter = ExtensionFilter::new([".py"]);
        assert!(!filter.should_include(Path::new("/src/x/README.md")));
        assert!(filter.admits(Path::new("/src/x/README.md")));
        assert!(!filter.admits(Path::new("/src/x/NOTES.md")));
    }
}
