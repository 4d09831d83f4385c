//! Markdown parsers: the direct state machine and the tokenizer-backed builder.

use serde::{Deserialize, Serialize};

use crate::syntax::Node;
use crate::tokenizer::tokenize;

pub mod ast_builder;
pub mod block_parser;
pub mod inline_parser;

pub use ast_builder::AstBuilder;
pub use block_parser::BlockParser;
pub use inline_parser::parse_inline;

/// Which parser turns source text into a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Line-based state machine straight from text.
    #[default]
    Direct,
    /// Tokenize first, then build the tree from the token stream.
    Tokenized,
}

/// Parses markdown into a `DOCUMENT`-rooted tree with the direct parser.
///
/// No plugins run here; see [`crate::Pipeline`] for the hooked pipeline.
///
/// # Examples
///
/// ```rust
/// use markpipe::parser::parse;
///
/// let doc = parse("# Heading\n\nParagraph text.");
/// assert_eq!(doc.children.len(), 2);
/// ```
pub fn parse(input: &str) -> Node {
    parse_with_mode(input, ParseMode::Direct)
}

pub fn parse_with_mode(input: &str, mode: ParseMode) -> Node {
    let normalized_input = input.replace("\r\n", "\n");
    match mode {
        ParseMode::Direct => BlockParser::new(&normalized_input).parse(),
        ParseMode::Tokenized => {
            let tokens = tokenize(&normalized_input);
            AstBuilder::new(&tokens).build()
        }
    }
}
