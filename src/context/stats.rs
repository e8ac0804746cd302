//! Context statistics (README/file counts, size, token estimate)

use colored::Colorize;

use crate::core::model::AssembledContext;
use crate::core::tokenizer::{count_tokens, TokenModel};
use crate::core::util::format_bytes;

/// Summary of an assembled context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStats {
    pub readmes: usize,
    pub files: usize,
    pub bytes: usize,
    pub tokens: usize,
    pub token_model: TokenModel,
}

impl ContextStats {
    /// Measure the context; tokens are counted over the rendered text
    pub fn measure(context: &AssembledContext, rendered: &str, token_model: TokenModel) -> Self {
        Self {
            readmes: context.readmes().len(),
            files: context.body().len(),
            bytes: context.total_bytes(),
            tokens: count_tokens(rendered, token_model),
            token_model,
        }
    }

    /// Print to stderr so the delivered output stays clean
    pub fn print(&self) {
        eprintln!("{}", "Context Statistics:".bold());
        eprintln!("   READMEs: {}", self.readmes);
        eprintln!("   Files: {}", self.files);
        eprintln!("   Size: {}", format_bytes(self.bytes));
        eprintln!(
            "   Estimated tokens: {} ({})",
            self.tokens.to_string().cyan(),
            self.token_model
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ContextEntry;

    #[test]
    fn test_measure() {
        let ctx = AssembledContext::from_sections(
            vec![ContextEntry::readme("/src/a/README.md", "# A")],
            vec![
                ContextEntry::body("/src/a/x.py", "abcd"),
                ContextEntry::body("/src/a/y.py", "abcd"),
            ],
        );

        let stats = ContextStats::measure(&ctx, "abcdefgh", TokenModel::Heuristic);
        assert_eq!(stats.readmes, 1);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes, 11);
        assert_eq!(stats.tokens, 2);
    }
}
