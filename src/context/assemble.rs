//! Context assembly
//!
//! Steps:
//! 1. Resolve every reference (fail on the first that does not resolve)
//! 2. Collect ancestor READMEs for the resolved paths
//! 3. Collect body files through the `FileCollector`, promoting nested READMEs
//! 4. Emit the README section first, then the body

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::backends::scan::{CollectedFile, FileCollector};
use crate::context::filter::ExtensionFilter;
use crate::context::readme::{collect_readmes, find_readme};
use crate::context::resolve::resolve_all;
use crate::core::error::ContextError;
use crate::core::model::{AssembledContext, ContextEntry, ResolvedPath};
use crate::core::paths::is_readme;

/// Codebase root of the first resolved path containing `file`
fn owning_codebase<'a>(resolved: &'a [ResolvedPath], file: &Path) -> Option<&'a Path> {
    resolved
        .iter()
        .find(|r| file.starts_with(&r.path))
        .map(|r| r.codebase_root.as_path())
}

/// True when `file` is the README its directory would report
///
/// A directory holding both `README.md` and `readme.md` promotes one of them.
fn is_directory_readme(file: &Path) -> bool {
    is_readme(file)
        && file
            .parent()
            .and_then(find_readme)
            .is_some_and(|chosen| chosen.as_path() == file)
}

/// Assemble context for the given references
pub fn assemble<C: FileCollector + ?Sized>(
    references: &[String],
    filter: &ExtensionFilter,
    root: &Path,
    collector: &C,
) -> Result<AssembledContext, ContextError> {
    let resolved = resolve_all(references, root)?;
    let mut readmes = collect_readmes(&resolved, root);
    debug!(
        references = resolved.len(),
        readmes = readmes.len(),
        "resolved references"
    );

    let paths: Vec<PathBuf> = resolved.iter().map(|r| r.path.clone()).collect();
    let mut readme_content: HashMap<PathBuf, String> = HashMap::new();
    let mut body = Vec::new();

    for CollectedFile { path, content } in collector.list_files(&paths, filter) {
        if readmes.contains(&path) {
            readme_content.insert(path, content);
            continue;
        }

        if is_directory_readme(&path) {
            if let Some(codebase_root) = owning_codebase(&resolved, &path) {
                debug!(readme = %path.display(), "promoting nested README");
                readmes.insert(codebase_root, path.clone());
                readme_content.insert(path, content);
                continue;
            }
        }

        body.push(ContextEntry::body(path, content));
    }

    let ordered = readmes.ordered();
    let missing: Vec<PathBuf> = ordered
        .iter()
        .filter(|p| !readme_content.contains_key(*p))
        .cloned()
        .collect();
    if !missing.is_empty() {
        for CollectedFile { path, content } in
            collector.list_files(&missing, &ExtensionFilter::default())
        {
            readme_content.insert(path, content);
        }
    }

    let mut readme_entries = Vec::with_capacity(ordered.len());
    for path in ordered {
        match readme_content.remove(&path) {
            Some(content) => readme_entries.push(ContextEntry::readme(path, content)),
            None => warn!(readme = %path.display(), "README could not be read, skipping"),
        }
    }

    Ok(AssembledContext::from_sections(readme_entries, body))
}
