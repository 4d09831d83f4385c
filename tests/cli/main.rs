//! CLI integration tests for markpipe.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (render, parse, tokens, outline, plugins)
//! - Stdin/stdout handling
//! - Config discovery
//! - Error handling

mod common;
mod parse;
mod render;
