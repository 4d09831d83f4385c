//! End-to-end pipeline tests: parse hooks, builtin plugins, and rendering.

mod builtins;
mod hooks;
mod rendering;

use markpipe::{Config, RenderOutput};

pub fn html(input: &str) -> String {
    markpipe::render(input, None).into_html()
}

pub fn render_with(input: &str, config: Config) -> RenderOutput {
    markpipe::render(input, Some(config))
}
