//! Reference resolution
//!
//! Turns short references like `manabot/env` into paths under the root.
//! Candidates are checked in a fixed order, first hit wins:
//!
//! 1. `root/<reference>` when it is a file
//! 2. `root/<codebase>` when the reference is just a codebase name
//! 3. `root/<codebase>/tests/...` for test references (never auto-prefixed)
//! 4. `root/<codebase>/<rest>` (direct)
//! 5. `root/<codebase>/<codebase>/<rest>` (auto-prefixed)

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::error::ContextError;
use crate::core::model::ResolvedPath;
use crate::core::paths::segments;

const TESTS_DIR: &str = "tests";

/// Split raw arguments on ',' into trimmed, non-empty references
pub fn parse_references<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .flat_map(|arg| {
            arg.as_ref()
                .split(',')
                .map(|r| r.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|r| !r.is_empty())
        .collect()
}

fn join_all(base: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(base.to_path_buf(), |p, s| p.join(s))
}

/// Resolve one reference against the root
pub fn resolve(reference: &str, root: &Path) -> Result<ResolvedPath, ContextError> {
    let reference = reference.trim();
    let segs = segments(reference);

    let Some((&codebase, rest)) = segs.split_first() else {
        return Err(ContextError::EmptyReference);
    };

    if segs.contains(&"..") {
        return Err(ContextError::invalid(
            reference,
            "'..' segments would leave the root",
        ));
    }

    let found = |codebase_root: PathBuf,
                 path: PathBuf,
                 rule: &str|
     -> Result<ResolvedPath, ContextError> {
        debug!(reference, path = %path.display(), rule, "resolved reference");
        Ok(ResolvedPath::new(reference, codebase, codebase_root, path))
    };

    let codebase_root = root.join(codebase);

    // A file named directly by the reference, e.g. a bare file at the root
    let whole = join_all(root, &segs);
    if whole.is_file() {
        let stop = if rest.is_empty() {
            root.to_path_buf()
        } else {
            codebase_root
        };
        return found(stop, whole, "file");
    }

    if rest.is_empty() {
        if codebase_root.is_dir() {
            return found(codebase_root.clone(), codebase_root, "codebase");
        }
        return Err(ContextError::not_found(reference, vec![codebase_root]));
    }

    if rest[0] == TESTS_DIR {
        let tests = join_all(&codebase_root, rest);
        if tests.exists() {
            return found(codebase_root, tests, "tests");
        }
        return Err(ContextError::not_found(reference, vec![tests]));
    }

    let direct = join_all(&codebase_root, rest);
    if direct.exists() {
        return found(codebase_root, direct, "direct");
    }

    let mut tried = vec![direct];
    if rest[0] != codebase {
        let prefixed = join_all(&codebase_root.join(codebase), rest);
        if prefixed.exists() {
            return found(codebase_root, prefixed, "auto-prefix");
        }
        tried.push(prefixed);
    }

    Err(ContextError::not_found(reference, tried))
}

/// Resolve references in order, failing on the first unresolved one
///
/// Duplicate resolved paths are dropped, keeping the first occurrence.
pub fn resolve_all(
    references: &[String],
    root: &Path,
) -> Result<Vec<ResolvedPath>, ContextError> {
    if references.is_empty() {
        return Err(ContextError::EmptyReference);
    }

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut resolved = Vec::with_capacity(references.len());

    for reference in references {
        let path = resolve(reference, root)?;
        if seen.insert(path.path.clone()) {
            resolved.push(path);
        } else {
            debug!(reference = %reference, "duplicate reference skipped");
        }
    }

    Ok(resolved)
}
