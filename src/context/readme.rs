//! README hierarchy collection
//!
//! Walks from each resolved path up to its codebase root and records every
//! README found on the way. Membership is tracked in a set, emission order in
//! per-codebase sequences, so a README reached from several references is
//! listed once.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::model::ResolvedPath;
use crate::core::paths::{depth, is_readme_name, is_within_root, README_NAME};

#[derive(Debug, Clone)]
struct ReadmeGroup {
    codebase_root: PathBuf,
    readmes: Vec<PathBuf>,
}

/// De-duplicated README paths grouped by codebase
#[derive(Debug, Clone, Default)]
pub struct ReadmeSet {
    seen: HashSet<PathBuf>,
    groups: Vec<ReadmeGroup>,
}

impl ReadmeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a README under its codebase; returns false if already present
    pub fn insert(&mut self, codebase_root: &Path, readme: PathBuf) -> bool {
        if !self.seen.insert(readme.clone()) {
            return false;
        }

        let index = self.add_codebase(codebase_root);
        self.groups[index].readmes.push(readme);
        true
    }

    /// Reserve a codebase's slot in the emission order; returns its index
    pub fn add_codebase(&mut self, codebase_root: &Path) -> usize {
        if let Some(index) = self
            .groups
            .iter()
            .position(|g| g.codebase_root == codebase_root)
        {
            return index;
        }
        self.groups.push(ReadmeGroup {
            codebase_root: codebase_root.to_path_buf(),
            readmes: Vec::new(),
        });
        self.groups.len() - 1
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Codebases in first-seen order; within each, shallowest README first
    ///
    /// READMEs at equal depth keep their discovery order.
    pub fn ordered(&self) -> Vec<PathBuf> {
        self.groups
            .iter()
            .flat_map(|group| {
                let mut readmes = group.readmes.clone();
                readmes.sort_by_key(|p| depth(p));
                readmes
            })
            .collect()
    }
}

/// Find the README in a directory, preferring the exact `README.md` spelling
pub fn find_readme(dir: &Path) -> Option<PathBuf> {
    let exact = dir.join(README_NAME);
    if exact.is_file() {
        return Some(exact);
    }

    let entries = fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_str().map(is_readme_name).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// Directories from `stop` down to `start`, both inclusive
///
/// Empty when `start` is not inside `stop`.
fn ancestor_chain(start: &Path, stop: &Path) -> Vec<PathBuf> {
    if !start.starts_with(stop) {
        return Vec::new();
    }

    let mut chain: Vec<PathBuf> = Vec::new();
    for dir in start.ancestors() {
        chain.push(dir.to_path_buf());
        if dir == stop {
            break;
        }
    }
    chain.reverse();
    chain
}

/// Collect READMEs along each resolved path's ancestor chain
pub fn collect_readmes(resolved: &[ResolvedPath], root: &Path) -> ReadmeSet {
    let mut set = ReadmeSet::new();

    for r in resolved {
        if !is_within_root(&r.codebase_root, root) {
            warn!(
                reference = %r.reference,
                codebase_root = %r.codebase_root.display(),
                "codebase root outside of root, skipping README lookup"
            );
            continue;
        }

        set.add_codebase(&r.codebase_root);
        for dir in ancestor_chain(r.start_dir(), &r.codebase_root) {
            if let Some(readme) = find_readme(&dir) {
                if set.insert(&r.codebase_root, readme.clone()) {
                    debug!(
                        codebase = %r.codebase,
                        readme = %readme.display(),
                        "found README"
                    );
                }
            }
        }
    }

    if set.is_empty() {
        debug!("no READMEs on any reference path");
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::resolve::resolve_all;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn refs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ancestor_chain() {
        let chain = ancestor_chain(Path::new("/src/a/b/c"), Path::new("/src/a"));
        assert_eq!(
            chain,
            vec![
                PathBuf::from("/src/a"),
                PathBuf::from("/src/a/b"),
                PathBuf::from("/src/a/b/c"),
            ]
        );
        assert!(ancestor_chain(Path::new("/src/x"), Path::new("/src/a")).is_empty());
        assert_eq!(
            ancestor_chain(Path::new("/src/a"), Path::new("/src/a")),
            vec![PathBuf::from("/src/a")]
        );
    }

    #[test]
    fn test_hierarchy_root_to_leaf() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "manabot/README.md", "# Root docs");
        write(root, "manabot/manabot/env/README.md", "# Env docs");
        write(root, "manabot/manabot/env/data/sample.txt", "data");

        let resolved = resolve_all(&refs(&["manabot/env/data"]), root).unwrap();
        let set = collect_readmes(&resolved, root);

        assert_eq!(
            set.ordered(),
            vec![
                root.join("manabot/README.md"),
                root.join("manabot/manabot/env/README.md"),
            ]
        );
    }

    #[test]
    fn test_shared_readme_listed_once() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "manabot/README.md", "# Root");
        write(root, "manabot/manabot/env/a.py", "");
        write(root, "manabot/manabot/agent/b.py", "");
        write(root, "manabot/manabot/agent/README.md", "# Agent");

        let resolved = resolve_all(&refs(&["manabot/env", "manabot/agent"]), root).unwrap();
        let set = collect_readmes(&resolved, root);

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.ordered(),
            vec![
                root.join("manabot/README.md"),
                root.join("manabot/manabot/agent/README.md"),
            ]
        );
    }

    #[test]
    fn test_never_leaves_codebase() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "README.md", "# Root of everything");
        write(root, "other/README.md", "# Sibling");
        write(root, "manabot/env/a.py", "");

        let resolved = resolve_all(&refs(&["manabot/env"]), root).unwrap();
        let set = collect_readmes(&resolved, root);
        assert!(set.is_empty());
    }

    #[test]
    fn test_codebases_in_reference_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "zeta/README.md", "# Z");
        write(root, "alpha/README.md", "# A");
        write(root, "alpha/src/lib.rs", "");

        let resolved = resolve_all(&refs(&["zeta", "alpha/src"]), root).unwrap();
        let set = collect_readmes(&resolved, root);
        assert_eq!(
            set.ordered(),
            vec![root.join("zeta/README.md"), root.join("alpha/README.md")]
        );
    }

    #[test]
    fn test_file_reference_starts_at_parent() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "manabot/README.md", "# Root");
        write(root, "manabot/tests/README.md", "# Tests");
        write(root, "manabot/tests/unit.py", "");

        let resolved = resolve_all(&refs(&["manabot/tests/unit.py"]), root).unwrap();
        let set = collect_readmes(&resolved, root);
        assert_eq!(
            set.ordered(),
            vec![
                root.join("manabot/README.md"),
                root.join("manabot/tests/README.md"),
            ]
        );
    }

    #[test]
    fn test_root_file_checks_root_readme() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "README.md", "# All code");
        write(root, "notes.md", "notes");

        let resolved = resolve_all(&refs(&["notes.md"]), root).unwrap();
        let set = collect_readmes(&resolved, root);
        assert_eq!(set.ordered(), vec![root.join("README.md")]);
    }

    #[test]
    fn test_find_readme_case_insensitive() {
        let temp = tempdir().unwrap();
        write(temp.path(), "readme.md", "# lower");

        let found = find_readme(temp.path()).unwrap();
        assert!(is_readme_name(found.file_name().unwrap().to_str().unwrap()));
        assert!(find_readme(&temp.path().join("missing")).is_none());
    }

    #[test]
    fn test_insert_dedups() {
        let mut set = ReadmeSet::new();
        let cb = Path::new("/src/a");
        assert!(set.insert(cb, PathBuf::from("/src/a/x/README.md")));
        assert!(set.insert(cb, PathBuf::from("/src/a/README.md")));
        assert!(!set.insert(cb, PathBuf::from("/src/a/README.md")));

        assert!(set.contains(Path::new("/src/a/README.md")));
        assert_eq!(
            set.ordered(),
            vec![
                PathBuf::from("/src/a/README.md"),
                PathBuf::from("/src/a/x/README.md"),
            ]
        );
    }
}
