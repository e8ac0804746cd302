//! Renderer module
//!
//! Renders an AssembledContext as structured documents or raw text. Both
//! formats follow the context's order exactly; nothing is re-sorted here.

use crate::core::model::{AssembledContext, ContextEntry};
use crate::core::paths::normalize_path;

pub const RAW_SEPARATOR: &str = "---";
pub const RAW_README_START: &str = "### README START ###";
pub const RAW_README_END: &str = "### README END ###";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<document>`-tagged output with path metadata
    #[default]
    Structured,
    /// Path header lines and separators only
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" | "xml" => Ok(OutputFormat::Structured),
            "raw" | "text" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Renderer for assembled context
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a context to a string
    pub fn render(&self, context: &AssembledContext) -> String {
        match self.format {
            OutputFormat::Structured => render_structured(context),
            OutputFormat::Raw => render_raw(context),
        }
    }

    /// Render only the ordered path list
    pub fn render_list(&self, context: &AssembledContext) -> String {
        context
            .entries()
            .iter()
            .map(|e| normalize_path(&e.path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_structured(context: &AssembledContext) -> String {
    let mut lines: Vec<String> = vec!["<documents>".to_string()];
    let mut index = 0usize;

    if !context.readmes().is_empty() {
        lines.push("<readmes>".to_string());
        for entry in context.readmes() {
            index += 1;
            push_document(&mut lines, index, entry);
        }
        lines.push("</readmes>".to_string());
    }

    for entry in context.body() {
        index += 1;
        push_document(&mut lines, index, entry);
    }

    lines.push("</documents>".to_string());
    lines.join("\n")
}

fn push_document(lines: &mut Vec<String>, index: usize, entry: &ContextEntry) {
    lines.push(format!("<document index=\"{}\">", index));
    lines.push(format!("<source>{}</source>", normalize_path(&entry.path)));
    if entry.is_readme() {
        lines.push("<type>readme</type>".to_string());
        lines.push("<instructions>".to_string());
        lines.push(entry.content.clone());
        lines.push("</instructions>".to_string());
    } else {
        lines.push("<document_content>".to_string());
        lines.push(entry.content.clone());
        lines.push("</document_content>".to_string());
    }
    lines.push("</document>".to_string());
}

fn render_raw(context: &AssembledContext) -> String {
    let mut lines: Vec<String> = Vec::new();

    for entry in context.entries() {
        lines.push(normalize_path(&entry.path));
        lines.push(RAW_SEPARATOR.to_string());
        if entry.is_readme() {
            lines.push(RAW_README_START.to_string());
        }
        lines.push(entry.content.clone());
        if entry.is_readme() {
            lines.push(RAW_README_END.to_string());
        }
        lines.push(String::new());
        lines.push(RAW_SEPARATOR.to_string());
    }

    lines.join("\n")
}
