//! Rendering of the document tree into HTML, a generic element tree, or plain text.
//!
//! [`RenderProcessor`] picks a strategy from [`RenderOptions::format`]. Every
//! node is first offered to a [`NodeOverride`] (the plugin manager's
//! `RENDER_NODE` chain in the full pipeline); the first override that answers
//! replaces the default rendering of that node and its subtree.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::syntax::Node;

pub mod html;
mod sanitize;
pub mod text;
pub mod tree;

pub use html::HtmlRenderer;
pub use sanitize::{escape_html, sanitize_url};
pub use text::TextRenderer;
pub use tree::{Element, ElementNode, TreeRenderer};

/// Target representation of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Html,
    /// Generic retained-mode element tree.
    Tree,
    Text,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Tree => "tree",
            OutputFormat::Text => "text",
        }
    }
}

/// Unrecognized names fall back to HTML.
impl From<&str> for OutputFormat {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => OutputFormat::Html,
            "tree" | "react" | "element" => OutputFormat::Tree,
            "text" | "plain" => OutputFormat::Text,
            other => {
                log::debug!("Unknown output format {other:?}, falling back to html");
                OutputFormat::Html
            }
        }
    }
}

impl From<String> for OutputFormat {
    fn from(value: String) -> Self {
        OutputFormat::from(value.as_str())
    }
}

impl From<OutputFormat> for String {
    fn from(value: OutputFormat) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "output", rename_all = "lowercase")]
pub enum RenderOutput {
    Html(String),
    Tree(ElementNode),
    Text(String),
}

impl RenderOutput {
    pub fn format(&self) -> OutputFormat {
        match self {
            RenderOutput::Html(_) => OutputFormat::Html,
            RenderOutput::Tree(_) => OutputFormat::Tree,
            RenderOutput::Text(_) => OutputFormat::Text,
        }
    }

    /// String outputs as-is; element trees are printed as HTML.
    pub fn into_html(self) -> String {
        match self {
            RenderOutput::Html(s) | RenderOutput::Text(s) => s,
            RenderOutput::Tree(node) => node.to_html(),
        }
    }

    /// HTML strings become raw nodes, text becomes a text node.
    pub fn into_tree(self) -> ElementNode {
        match self {
            RenderOutput::Html(s) => ElementNode::Raw(s),
            RenderOutput::Text(s) => ElementNode::Text(s),
            RenderOutput::Tree(node) => node,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RenderOutput::Html(s) | RenderOutput::Text(s) => s,
            RenderOutput::Tree(node) => node.text_content(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RenderOutput::Html(s) | RenderOutput::Text(s) => Some(s),
            RenderOutput::Tree(_) => None,
        }
    }
}

impl fmt::Display for RenderOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderOutput::Html(s) | RenderOutput::Text(s) => f.write_str(s),
            RenderOutput::Tree(node) => f.write_str(&node.to_html()),
        }
    }
}

/// What a component receives: the default element parts plus the source node.
#[derive(Debug, Clone)]
pub struct ComponentProps {
    pub tag: String,
    pub props: BTreeMap<String, String>,
    pub children: Vec<ElementNode>,
    pub node: Node,
}

pub type Component = Rc<dyn Fn(ComponentProps) -> ElementNode>;

/// Element-tree components keyed by the default tag they replace (`h1`, `a`, `code`, ...).
#[derive(Clone, Default)]
pub struct Components {
    by_tag: HashMap<String, Component>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: &str, component: impl Fn(ComponentProps) -> ElementNode + 'static) {
        self.by_tag.insert(tag.to_string(), Rc::new(component));
    }

    pub fn with(mut self, tag: &str, component: impl Fn(ComponentProps) -> ElementNode + 'static) -> Self {
        self.insert(tag, component);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&Component> {
        self.by_tag.get(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.by_tag.keys().collect();
        tags.sort();
        f.debug_struct("Components").field("tags", &tags).finish()
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Escape text and drop script-capable URLs.
    pub sanitize: bool,
    /// `target` attribute for links; `None` omits it.
    pub link_target: Option<String>,
    /// Used only by the element-tree renderer.
    pub components: Components,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            sanitize: true,
            link_target: Some("_blank".to_string()),
            components: Components::default(),
        }
    }
}

impl RenderOptions {
    /// Applies URL filtering when sanitizing is on.
    pub(crate) fn url(&self, url: &str) -> String {
        if self.sanitize {
            sanitize_url(url)
        } else {
            url.to_string()
        }
    }

    /// The link target for `href`; in-page anchors never get one.
    pub(crate) fn target_for(&self, href: &str) -> Option<&str> {
        if href.starts_with('#') {
            return None;
        }
        self.link_target.as_deref().filter(|t| !t.is_empty())
    }
}

/// Per-node rendering override consulted before the default rendering.
pub trait NodeOverride {
    fn render_node(&self, node: &Node) -> Option<RenderOutput>;
}

/// Never overrides anything.
pub struct NoOverride;

impl NodeOverride for NoOverride {
    fn render_node(&self, _node: &Node) -> Option<RenderOutput> {
        None
    }
}

/// Adapts a closure into a [`NodeOverride`].
pub struct FnOverride<F>(pub F);

impl<F> NodeOverride for FnOverride<F>
where
    F: Fn(&Node) -> Option<RenderOutput>,
{
    fn render_node(&self, node: &Node) -> Option<RenderOutput> {
        (self.0)(node)
    }
}

/// Dispatches a document to the renderer selected by its options.
#[derive(Debug, Clone, Default)]
pub struct RenderProcessor {
    options: RenderOptions,
}

impl RenderProcessor {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replaces the options; the next render uses the new strategy.
    pub fn update_options(&mut self, options: RenderOptions) {
        log::debug!("Render options updated: format={}", options.format);
        self.options = options;
    }

    pub fn render(&self, node: &Node) -> RenderOutput {
        self.render_with(node, &NoOverride)
    }

    pub fn render_with(&self, node: &Node, overrides: &dyn NodeOverride) -> RenderOutput {
        log::debug!("Rendering {:?} as {}", node.kind, self.options.format);
        match self.options.format {
            OutputFormat::Html => {
                RenderOutput::Html(HtmlRenderer::new(&self.options, overrides).render(node))
            }
            OutputFormat::Tree => {
                RenderOutput::Tree(TreeRenderer::new(&self.options, overrides).render(node))
            }
            OutputFormat::Text => {
                RenderOutput::Text(TextRenderer::new(overrides).render(node))
            }
        }
    }
}
