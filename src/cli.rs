use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "markpipe")]
#[command(author, version)]
#[command(about = "A pluggable Markdown pipeline: parse, transform, render")]
#[command(
    long_about = "Markpipe parses Markdown into a document tree, runs it through plugin hooks \
    (tables, task lists, a table of contents, footnotes), and renders HTML, a generic element \
    tree as JSON, or plain text."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file to HTML on stdout
    markpipe render document.md

    # Render from stdin
    cat document.md | markpipe render

    # Render plain text without plugins
    markpipe render --format text --no-plugins document.md

    # Inspect the document tree
    markpipe parse document.md

    # Inspect the token stream
    markpipe tokens document.md

    # Headings, links and reading time
    markpipe outline document.md

CONFIGURATION:

Markpipe looks for configuration files in this order:
  1. Explicit --config path
  2. markpipe.toml or .markpipe.toml in the input's directory and its parents
  3. $XDG_CONFIG_HOME/markpipe/config.toml, then the platform config directory
  4. Built-in defaults

Example .markpipe.toml:

    format = \"html\"
    sanitize = true
    link_target = \"_blank\"

    [plugins]
    toc = false
")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, markpipe will \
        search for .markpipe.toml or markpipe.toml in the input's directory and its parents, \
        then fall back to the user configuration directory."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// HTML string
    Html,
    /// Element tree as JSON
    Tree,
    /// Plain text
    Text,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Line-based state machine
    Direct,
    /// Tokenize, then build the tree
    Tokenized,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a Markdown document
    #[command(
        long_about = "Run the full pipeline over a Markdown document and print the result. \
        Options given here override the configuration file."
    )]
    #[command(after_help = "\
EXAMPLES:

    # HTML to stdout
    markpipe render document.md

    # Element tree as JSON
    markpipe render --format tree document.md

    # Keep raw HTML and unsafe URLs
    markpipe render --no-sanitize document.md

    # Links open in the same tab
    markpipe render --link-target '' document.md")]
    Render {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        #[arg(long, value_enum)]
        #[arg(help = "Output format")]
        format: Option<FormatArg>,

        #[arg(long)]
        #[arg(help = "Do not escape text or filter URLs")]
        no_sanitize: bool,

        #[arg(long)]
        #[arg(help = "Link target attribute (empty to omit)")]
        link_target: Option<String>,

        #[arg(long)]
        #[arg(help = "Disable all builtin plugins")]
        no_plugins: bool,
    },
    /// Parse and display the document tree as JSON
    #[command(
        long_about = "Parse a document and print its tree as JSON, after the parse hooks of the \
        enabled plugins have run. Useful for debugging plugins and the parser."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Parse a file and show the tree
    markpipe parse document.md

    # Use the tokenizer-backed parser
    echo '# Heading' | markpipe parse --mode tokenized")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        #[arg(long, value_enum)]
        #[arg(help = "Parser to use")]
        mode: Option<ModeArg>,

        #[arg(long)]
        #[arg(help = "Skip plugin hooks")]
        no_plugins: bool,
    },
    /// Display the token stream as JSON
    Tokens {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
    /// Display headings, links, images and reading time as JSON
    #[command(
        long_about = "Parse a document with the enabled plugins and print its outline: \
        headings with anchor ids, links, images, word count and an estimated reading time."
    )]
    Outline {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        #[arg(long, default_value_t = 200)]
        #[arg(help = "Reading speed used for the time estimate")]
        words_per_minute: usize,
    },
    /// List the builtin plugins
    Plugins,
}
