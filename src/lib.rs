pub mod config;
pub mod parser;
pub mod pipeline;
pub mod plugin;
pub mod renderer;
pub mod syntax;
pub mod tokenizer;

pub use config::Config;
pub use config::ConfigBuilder;
pub use config::PluginToggles;
pub use parser::ParseMode;
pub use pipeline::Pipeline;
pub use plugin::{Plugin, PluginKind, PluginManager};
pub use renderer::{OutputFormat, RenderOptions, RenderOutput, RenderProcessor};
pub use syntax::utils::{
    extract_headings, extract_images, extract_links, plain_text, reading_time,
};
pub use syntax::{Node, SyntaxKind};
pub use tokenizer::{Token, TokenKind, tokenize};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses a markdown string into a document tree.
///
/// Runs the builtin plugins' `BEFORE_PARSE` and `AFTER_PARSE` hooks, so
/// tables, task items, heading ids, and footnotes are already resolved.
///
/// # Examples
///
/// ```rust
/// use markpipe::{SyntaxKind, parse};
///
/// let doc = parse("# Heading\n\nParagraph text.");
/// assert_eq!(doc.kind, SyntaxKind::DOCUMENT);
/// assert_eq!(doc.children[0].attr_str("id"), Some("heading"));
/// ```
pub fn parse(input: &str) -> Node {
    Pipeline::default().parse(input)
}

/// Parses and renders a markdown string.
///
/// # Examples
///
/// ```rust
/// let html = markpipe::render("*hi*", None).into_html();
/// assert_eq!(html, "<p><em>hi</em></p>");
/// ```
///
/// # Arguments
///
/// * `input` - Markdown source
/// * `config` - Optional configuration (defaults to default config)
pub fn render(input: &str, config: Option<Config>) -> RenderOutput {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    Pipeline::new(config.unwrap_or_default()).process(input)
}
