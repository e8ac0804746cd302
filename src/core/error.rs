//! Error taxonomy and exit codes

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for unexpected failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for usage errors (matches clap's own parse failures)
pub const EXIT_USAGE: i32 = 2;

/// Exit code when a reference cannot be resolved
pub const EXIT_NOT_FOUND: i32 = 3;

/// Exit code when the assembled context cannot be delivered
pub const EXIT_DELIVERY: i32 = 4;

/// Errors raised while assembling or delivering context
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no codebase references given")]
    EmptyReference,

    #[error("invalid reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("root directory {} does not exist or is not a directory", .root.display())]
    RootNotFound { root: PathBuf },

    #[error("reference '{reference}' not found (tried {})", display_paths(.tried))]
    NotFound {
        reference: String,
        tried: Vec<PathBuf>,
    },

    #[error("clipboard unavailable: {reason}")]
    UnsupportedPlatform { reason: String },

    #[error("failed to write output to {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContextError {
    pub fn not_found(reference: impl Into<String>, tried: Vec<PathBuf>) -> Self {
        Self::NotFound {
            reference: reference.into(),
            tried,
        }
    }

    pub fn invalid(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            target: target.into(),
            source,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ContextError::EmptyReference
            | ContextError::InvalidReference { .. }
            | ContextError::RootNotFound { .. } => EXIT_USAGE,
            ContextError::NotFound { .. } => EXIT_NOT_FOUND,
            ContextError::UnsupportedPlatform { .. } | ContextError::Io { .. } => EXIT_DELIVERY,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the exit code for an error bubbling out of `cli::run`
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ContextError>())
        .map(ContextError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
