//! code-context - Codebase context assembly for LLM prompts
//!
//! code-context provides:
//! - Short codebase references resolved under a configurable root
//! - README hierarchy collection (most general README first)
//! - Extension filtering with gitignore-aware file collection
//! - Structured (document-tagged) or raw output to clipboard, file or stdout

use clap::Parser;
use colored::Colorize;

mod backends;
mod cli;
mod context;
mod core;

fn main() {
    let cli = cli::Cli::parse();

    if let Err(err) = cli::run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(crate::core::error::exit_code_for(&err));
    }
}
