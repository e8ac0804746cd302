//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::backends::scan::{WalkCollector, WalkOptions};
use crate::backends::sink::{deliver, Destination};
use crate::context::assemble::assemble;
use crate::context::filter::ExtensionFilter;
use crate::context::resolve::parse_references;
use crate::context::stats::ContextStats;
use crate::core::config::{resolve_root, ContextConfig, ROOT_ENV};
use crate::core::error::ContextError;
use crate::core::file_reader::{FileReadConfig, DEFAULT_MAX_FILE_SIZE};
use crate::core::render::{OutputFormat, Renderer};
use crate::core::tokenizer::TokenModel;

/// code-context - gather codebase files and their READMEs into LLM-ready context.
#[derive(Parser, Debug)]
#[command(name = "code-context")]
#[command(
    author,
    version,
    about,
    long_about = r#"code-context resolves short codebase references under a root directory
(default: ~/src, override with CODE_CONTEXT_ROOT or --root), gathers the files
they point at plus every README.md between each path and its codebase root,
and renders the result for pasting into an LLM prompt.

References:
- manabot            the whole codebase at ROOT/manabot
- manabot/env        ROOT/manabot/env, or ROOT/manabot/manabot/env if that is
                     where the package lives
- manabot/tests/x    always ROOT/manabot/tests/x

README files come first (most general first), then the remaining files.

Examples:
    code-context manabot
    code-context manabot/env,managym/tests -e .py
    code-context manabot -r -o context.txt
    code-context manabot/env --clipboard --stats
"#
)]
pub struct Cli {
    /// Codebase references (comma-separated or repeated).
    #[arg(
        value_name = "REFERENCES",
        required = true,
        num_args = 1..,
        long_help = "One or more codebase references. Each argument may hold several\n\
references separated by commas, e.g. \"manabot,managym/tests\".\n\n\
The first segment names the codebase directory under ROOT."
    )]
    pub references: Vec<String>,

    /// File extension to include (repeatable, e.g. -e .py -e .rs).
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        action = ArgAction::Append,
        long_help = "Only include files whose last extension matches. Repeat to allow\n\
several. A leading dot is optional. README files are always included."
    )]
    pub extensions: Vec<String>,

    /// Output raw text instead of structured documents.
    #[arg(short, long)]
    pub raw: bool,

    /// Copy the output to the clipboard.
    #[arg(
        short = 'c',
        long,
        visible_short_alias = 'p',
        visible_alias = "pbcopy",
        conflicts_with = "output",
        long_help = "Copy the output to the clipboard (pbcopy, wl-copy, xclip, xsel or clip.exe).\n\n\
Without --clipboard or --output, the clipboard is used when stdout is a terminal\n\
and a clipboard tool is installed; otherwise output goes to stdout."
    )]
    pub clipboard: bool,

    /// Write output to a file ('-' for stdout).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Root directory containing all codebases.
    #[arg(
        long,
        env = ROOT_ENV,
        value_name = "ROOT",
        long_help = "Root directory containing all codebases. Defaults to ~/src.\n\n\
Can also be set with the CODE_CONTEXT_ROOT environment variable."
    )]
    pub root: Option<PathBuf>,

    /// Include hidden files/directories (dotfiles).
    #[arg(long)]
    pub hidden: bool,

    /// Disable .gitignore and other ignore rules.
    #[arg(long)]
    pub no_ignore: bool,

    /// Maximum bytes of content per file (larger files are truncated).
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: usize,

    /// Only list the paths that would be included.
    #[arg(long)]
    pub list: bool,

    /// Show context statistics on stderr.
    #[arg(long)]
    pub stats: bool,

    /// Token model for --stats (cl100k/o200k/heuristic).
    #[arg(
        long,
        value_name = "MODEL",
        default_value = "cl100k",
        value_parser = parse_token_model
    )]
    pub token_model: TokenModel,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_token_model(s: &str) -> std::result::Result<TokenModel, String> {
    s.parse()
}

/// Wire verbosity flags to the tracing log level; RUST_LOG directives still apply
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

impl Cli {
    /// Build the run configuration, resolving the root once
    pub fn into_config(self) -> Result<ContextConfig, ContextError> {
        let references = parse_references(&self.references);
        if references.is_empty() {
            return Err(ContextError::EmptyReference);
        }

        let root = resolve_root(self.root.as_deref())?;
        let format = if self.raw {
            OutputFormat::Raw
        } else {
            OutputFormat::Structured
        };

        Ok(ContextConfig {
            root,
            references,
            filter: ExtensionFilter::new(&self.extensions),
            format,
            destination: Destination::choose(self.output, self.clipboard),
            walk: WalkOptions {
                hidden: self.hidden,
                ignore: !self.no_ignore,
            },
            read: FileReadConfig {
                max_file_size: self.max_file_size,
            },
            list_only: self.list,
            stats: self.stats,
            token_model: self.token_model,
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        colored::control::set_override(false);
    }
    let quiet = cli.quiet;

    let config = cli.into_config()?;
    debug!(root = %config.root.display(), references = ?config.references, "starting");
    if !config.filter.is_empty() {
        let extensions: Vec<&str> = config.filter.extensions().collect();
        debug!(?extensions, "filtering by extension");
    }

    let collector = WalkCollector::new(config.walk, config.read);
    let context = assemble(
        &config.references,
        &config.filter,
        &config.root,
        &collector,
    )
    .context("failed to assemble context")?;

    if context.is_empty() {
        warn!("no files matched the given references");
    }

    let renderer = Renderer::new(config.format);
    let text = if config.list_only {
        renderer.render_list(&context)
    } else {
        renderer.render(&context)
    };

    if config.stats {
        ContextStats::measure(&context, &text, config.token_model).print();
    }

    deliver(&text, &config.destination)?;

    if config.destination == Destination::Clipboard && !quiet {
        eprintln!(
            "{} {} READMEs and {} files to clipboard",
            "Copied".green(),
            context.readmes().len(),
            context.body().len()
        );
    }

    Ok(())
}
