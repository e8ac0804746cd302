//! Output delivery: clipboard or stream
//!
//! Clipboard support shells out to the platform's copy tool.

use std::fs;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::core::error::ContextError;
use crate::core::util::command_exists;

/// Where the rendered context goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Pick a destination from CLI choices
    ///
    /// `-o -` means stdout. Without `-o` or `-c`, the clipboard is used only
    /// when stdout is an interactive terminal and a copy tool exists.
    pub fn choose(output: Option<PathBuf>, clipboard: bool) -> Self {
        match output {
            Some(path) if path.as_os_str() == "-" => Destination::Stdout,
            Some(path) => Destination::File(path),
            None if clipboard => Destination::Clipboard,
            None if std::io::stdout().is_terminal() && clipboard_tool().is_some() => {
                Destination::Clipboard
            }
            None => Destination::Stdout,
        }
    }
}

/// A clipboard copy command and its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const CLIPBOARD_TOOLS: &[ClipboardTool] = &[
    ClipboardTool {
        program: "pbcopy",
        args: &[],
    },
    ClipboardTool {
        program: "wl-copy",
        args: &[],
    },
    ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
    ClipboardTool {
        program: "clip.exe",
        args: &[],
    },
];

/// First clipboard tool found on PATH
pub fn clipboard_tool() -> Option<ClipboardTool> {
    CLIPBOARD_TOOLS
        .iter()
        .copied()
        .find(|tool| command_exists(tool.program))
}

/// Deliver text to the destination
pub fn deliver(text: &str, destination: &Destination) -> Result<(), ContextError> {
    match destination {
        Destination::Clipboard => copy_to_clipboard(text),
        Destination::Stdout => {
            let stdout = std::io::stdout();
            write_stream(text, &mut stdout.lock(), "stdout")
        }
        Destination::File(path) => {
            let target = path.display().to_string();
            let mut file = fs::File::create(path).map_err(|e| ContextError::io(&target, e))?;
            write_stream(text, &mut file, &target)
        }
    }
}

/// Write the full text plus a trailing newline, then flush
pub fn write_stream<W: Write>(text: &str, writer: &mut W, target: &str) -> Result<(), ContextError> {
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.write_all(b"\n"))
        .and_then(|_| writer.flush())
        .map_err(|e| ContextError::io(target, e))
}

fn copy_to_clipboard(text: &str) -> Result<(), ContextError> {
    let tool = clipboard_tool().ok_or_else(|| ContextError::UnsupportedPlatform {
        reason: format!(
            "no clipboard tool found (tried {})",
            CLIPBOARD_TOOLS
                .iter()
                .map(|t| t.program)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })?;
    pipe_to_command(text, tool)
}

fn pipe_to_command(text: &str, tool: ClipboardTool) -> Result<(), ContextError> {
    debug!(program = tool.program, bytes = text.len(), "copying to clipboard");

    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ContextError::io(tool.program, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            let _ = child.wait();
            return Err(ContextError::io(tool.program, e));
        }
    }

    let status = child
        .wait()
        .map_err(|e| ContextError::io(tool.program, e))?;
    if !status.success() {
        warn!(program = tool.program, %status, "clipboard tool failed");
        return Err(ContextError::io(
            tool.program,
            std::io::Error::other(format!("exited with {}", status)),
        ));
    }

    Ok(())
}
