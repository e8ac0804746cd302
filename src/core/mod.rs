//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Context data model (ResolvedPath, AssembledContext)
//! - Error taxonomy and exit codes
//! - Run configuration and root discovery
//! - Rendering to structured or raw text
//! - Path helpers and file reading
//! - Token counting for LLM context budgeting

pub mod config;
pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
pub mod util;
