//! Run configuration
//!
//! The root comes from `--root`, then `CODE_CONTEXT_ROOT`, then `~/src`, and
//! is canonicalized once per invocation.

use std::path::{Path, PathBuf};

use crate::backends::scan::WalkOptions;
use crate::backends::sink::Destination;
use crate::context::filter::ExtensionFilter;
use crate::core::error::ContextError;
use crate::core::file_reader::FileReadConfig;
use crate::core::render::OutputFormat;
use crate::core::tokenizer::TokenModel;

/// Environment variable overriding the default root
pub const ROOT_ENV: &str = "CODE_CONTEXT_ROOT";

/// Default root: `~/src`
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("src")
}

/// Canonicalize the configured root, falling back to the default
pub fn resolve_root(configured: Option<&Path>) -> Result<PathBuf, ContextError> {
    let root = configured
        .map(Path::to_path_buf)
        .unwrap_or_else(default_root);

    match root.canonicalize() {
        Ok(canonical) if canonical.is_dir() => Ok(canonical),
        _ => Err(ContextError::RootNotFound { root }),
    }
}

/// Everything one invocation needs, built once from the command line
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub root: PathBuf,
    pub references: Vec<String>,
    pub filter: ExtensionFilter,
    pub format: OutputFormat,
    pub destination: Destination,
    pub walk: WalkOptions,
    pub read: FileReadConfig,
    pub list_only: bool,
    pub stats: bool,
    pub token_model: TokenModel,
}
