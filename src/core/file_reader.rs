//! File content reading
//!
//! Provides consistent handling for:
//! - Non-UTF-8 files (lossy conversion)
//! - Oversized files (truncation at a char boundary)
//! - Binary files (skipped)

use std::fs;
use std::io::Read;
use std::path::Path;

/// Default maximum content size in bytes (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 1024 * 1024;

/// Number of leading bytes inspected for NUL bytes
const BINARY_SNIFF_LEN: usize = 8192;

/// Configuration for file reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReadConfig {
    /// Content beyond this many bytes is truncated
    pub max_file_size: usize,
}

impl Default for FileReadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Why a file produced no content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Binary,
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Binary => write!(f, "binary file"),
            SkipReason::Unreadable(e) => write!(f, "cannot read file: {}", e),
        }
    }
}

/// Result of reading a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRead {
    Text {
        content: String,
        truncated: bool,
        lossy: bool,
    },
    Skipped(SkipReason),
}

/// Read a file with the given configuration
pub fn read_file_with_config(path: &Path, config: &FileReadConfig) -> FileRead {
    let bytes = match read_file_bytes(path, config.max_file_size) {
        Ok(b) => b,
        Err(e) => return FileRead::Skipped(SkipReason::Unreadable(e.to_string())),
    };

    let sniff = std::cmp::min(BINARY_SNIFF_LEN, bytes.len());
    if bytes[..sniff].contains(&0) {
        return FileRead::Skipped(SkipReason::Binary);
    }

    let mut bytes = bytes;
    let truncated = bytes.len() > config.max_file_size;
    if truncated {
        bytes.truncate(config.max_file_size);
    }

    let (text, lossy) = match String::from_utf8(bytes) {
        Ok(s) => (s, false),
        // Cut landed inside a multi-byte char: drop the partial tail
        Err(e) if truncated && e.utf8_error().error_len().is_none() => {
            let valid = e.utf8_error().valid_up_to();
            let mut bytes = e.into_bytes();
            bytes.truncate(valid);
            match String::from_utf8(bytes) {
                Ok(s) => (s, false),
                Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
            }
        }
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    };

    FileRead::Text {
        content: truncate_at_char_boundary(&text, config.max_file_size),
        truncated,
        lossy,
    }
}

/// Read at most `limit + 1` bytes so truncation can be detected
fn read_file_bytes(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut buffer = Vec::new();
    file.take((limit as u64).saturating_add(1))
        .read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Truncate string at a valid UTF-8 character boundary
fn truncate_at_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    s[..end].to_string()
}
