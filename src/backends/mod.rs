//! Backends module - Filesystem and output integrations
//!
//! Provides:
//! - scan: File collection with the ignore crate
//! - sink: Clipboard, file and stdout delivery

pub mod scan;
pub mod sink;
