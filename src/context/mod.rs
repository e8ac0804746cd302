//! Context module - Turns codebase references into an ordered context
//!
//! Provides:
//! - resolve: reference to path resolution (direct, auto-prefixed, tests)
//! - readme: README hierarchy collection
//! - filter: extension allow-list
//! - assemble: README section + body assembly
//! - stats: size and token summary

pub mod assemble;
pub mod filter;
pub mod readme;
pub mod resolve;
pub mod stats;
