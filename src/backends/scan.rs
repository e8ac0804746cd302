//! File collection backend
//!
//! Uses the ignore crate for traversal and the file reader for content. The
//! assembler only sees the `FileCollector` trait.

use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::context::filter::ExtensionFilter;
use crate::core::file_reader::{read_file_with_config, FileRead, FileReadConfig};

/// A file and its text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Lists text files under a set of paths
pub trait FileCollector {
    /// Files under `paths` admitted by `filter`, in stable order, each at most once
    fn list_files(&self, paths: &[PathBuf], filter: &ExtensionFilter) -> Vec<CollectedFile>;
}

/// Options for the directory walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Include hidden files/directories (dotfiles)
    pub hidden: bool,
    /// Respect .gitignore/.ignore rules
    pub ignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            hidden: false,
            ignore: true,
        }
    }
}

/// Filesystem collector backed by `ignore::WalkBuilder`
#[derive(Debug, Clone, Default)]
pub struct WalkCollector {
    options: WalkOptions,
    read_config: FileReadConfig,
}

impl WalkCollector {
    pub fn new(options: WalkOptions, read_config: FileReadConfig) -> Self {
        Self {
            options,
            read_config,
        }
    }

    /// Walk one path, returning matching file paths sorted
    fn scan_path(&self, path: &Path, filter: &ExtensionFilter) -> Vec<PathBuf> {
        let ignore = self.options.ignore;
        let mut builder = WalkBuilder::new(path);
        builder
            .hidden(!self.options.hidden)
            .ignore(ignore)
            .git_ignore(ignore)
            .git_global(ignore)
            .git_exclude(ignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "walk error");
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let file = entry.into_path();
            if filter.admits(&file) {
                files.push(file);
            }
        }

        files.sort();
        files
    }
}

impl FileCollector for WalkCollector {
    fn list_files(&self, paths: &[PathBuf], filter: &ExtensionFilter) -> Vec<CollectedFile> {
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut collected = Vec::new();

        for path in paths {
            for file in self.scan_path(path, filter) {
                if !seen.insert(file.clone()) {
                    continue;
                }

                match read_file_with_config(&file, &self.read_config) {
                    FileRead::Text {
                        content,
                        truncated,
                        lossy,
                    } => {
                        if truncated {
                            warn!(
                                path = %file.display(),
                                limit = self.read_config.max_file_size,
                                "file truncated"
                            );
                        }
                        if lossy {
                            debug!(path = %file.display(), "lossy UTF-8 conversion applied");
                        }
                        collected.push(CollectedFile {
                            path: file,
                            content,
                        });
                    }
                    FileRead::Skipped(reason) => {
                        warn!(path = %file.display(), %reason, "skipping file");
                    }
                }
            }
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(files: &[CollectedFile], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = tempdir().unwrap();
        let files = WalkCollector::default()
            .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::default());
        assert!(files.is_empty());
    }

    #[test]
    fn test_lists_files_in_stable_order() {
        let temp = tempdir().unwrap();
        write(temp.path(), "b.txt", b"b");
        write(temp.path(), "a.txt", b"a");
        write(temp.path(), "sub/zz.md", b"z");

        let files = WalkCollector::default()
            .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::default());
        assert_eq!(names(&files, temp.path()), vec!["a.txt", "b.txt", "sub/zz.md"]);
        assert_eq!(files[0].content, "a");
    }

    #[test]
    fn test_filter_applies_but_readmes_pass() {
        let temp = tempdir().unwrap();
        write(temp.path(), "main.py", b"print()");
        write(temp.path(), "config.js", b"const x = 1;");
        write(temp.path(), "docs/README.md", b"# Docs");

        let files = WalkCollector::default()
            .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::new([".py"]));
        assert_eq!(names(&files, temp.path()), vec!["docs/README.md", "main.py"]);
    }

    #[test]
    fn test_skips_hidden_and_binary() {
        let temp = tempdir().unwrap();
        write(temp.path(), ".env", b"SECRET=1");
        write(temp.path(), ".git/config", b"[core]");
        write(temp.path(), "blob.bin", &[0, 1, 2, 3]);
        write(temp.path(), "main.py", b"x = 1");

        let files = WalkCollector::default()
            .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::default());
        assert_eq!(names(&files, temp.path()), vec!["main.py"]);

        let with_hidden = WalkCollector::new(
            WalkOptions {
                hidden: true,
                ignore: true,
            },
            FileReadConfig::default(),
        )
        .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::default());
        assert!(names(&with_hidden, temp.path()).contains(&".env".to_string()));
    }

    #[test]
    fn test_respects_gitignore_outside_repo() {
        let temp = tempdir().unwrap();
        write(temp.path(), ".gitignore", b"build/\n*.log\n");
        write(temp.path(), "build/out.txt", b"artifact");
        write(temp.path(), "run.log", b"log");
        write(temp.path(), "main.py", b"x = 1");

        let files = WalkCollector::default()
            .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::default());
        assert_eq!(names(&files, temp.path()), vec!["main.py"]);

        let no_ignore = WalkCollector::new(
            WalkOptions {
                hidden: false,
                ignore: false,
            },
            FileReadConfig::default(),
        )
        .list_files(&[temp.path().to_path_buf()], &ExtensionFilter::default());
        assert_eq!(no_ignore.len(), 3);
    }

    #[test]
    fn test_single_file_and_overlap_dedup() {
        let temp = tempdir().unwrap();
        write(temp.path(), "pkg/a.py", b"a");
        write(temp.path(), "pkg/b.py", b"b");

        let files = WalkCollector::default().list_files(
            &[temp.path().join("pkg/b.py"), temp.path().join("pkg")],
            &ExtensionFilter::default(),
        );
        assert_eq!(names(&files, temp.path()), vec!["pkg/b.py", "pkg/a.py"]);
    }
}
