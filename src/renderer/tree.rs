//! Generic retained-mode element tree renderer.
//!
//! The output mirrors what a virtual-DOM library would receive: tagged
//! elements with string props, text leaves, raw HTML leaves, and fragments.
//! Components registered in [`RenderOptions::components`] replace the
//! outermost element produced for a node, keyed by that element's tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::syntax::{Node, SyntaxKind};

use super::html::heading_id;
use super::sanitize::escape_html;
use super::{ComponentProps, NodeOverride, RenderOptions};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];
const BOOLEAN_PROPS: &[&str] = &["checked", "disabled"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, key: &str, value: impl Into<String>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: Vec<ElementNode>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ElementNode {
    Element(Element),
    Text(String),
    /// Pre-rendered HTML, printed verbatim.
    Raw(String),
    Fragment(Vec<ElementNode>),
}

impl From<Element> for ElementNode {
    fn from(element: Element) -> Self {
        ElementNode::Element(element)
    }
}

impl ElementNode {
    pub fn text(value: impl Into<String>) -> Self {
        ElementNode::Text(value.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ElementNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Prints the tree as HTML. Text and prop values are escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ElementNode::Text(text) => out.push_str(&escape_html(text)),
            ElementNode::Raw(html) => out.push_str(html),
            ElementNode::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            ElementNode::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (key, value) in &element.props {
                    out.push(' ');
                    out.push_str(key);
                    if !BOOLEAN_PROPS.contains(&key.as_str()) {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text leaves (raw HTML included verbatim).
    pub fn text_content(&self) -> String {
        match self {
            ElementNode::Text(text) | ElementNode::Raw(text) => text.clone(),
            ElementNode::Fragment(children) => children.iter().map(|c| c.text_content()).collect(),
            ElementNode::Element(element) => element
                .children
                .iter()
                .map(|c| c.text_content())
                .collect(),
        }
    }
}

pub struct TreeRenderer<'a> {
    options: &'a RenderOptions,
    overrides: &'a dyn NodeOverride,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(options: &'a RenderOptions, overrides: &'a dyn NodeOverride) -> Self {
        Self { options, overrides }
    }

    pub fn render(&self, node: &Node) -> ElementNode {
        if let Some(output) = self.overrides.render_node(node) {
            return output.into_tree();
        }

        match node.kind {
            SyntaxKind::DOCUMENT => ElementNode::Fragment(self.children(node)),
            SyntaxKind::TEXT => ElementNode::text(node.content_str()),
            SyntaxKind::HEADING => {
                let level = node.level.unwrap_or(1);
                let element = Element::new(format!("h{level}"))
                    .prop("id", heading_id(node))
                    .children(self.inner(node));
                self.finish(node, element)
            }
            SyntaxKind::PARAGRAPH => self.simple(node, "p"),
            SyntaxKind::BLOCKQUOTE => self.simple(node, "blockquote"),
            SyntaxKind::EMPHASIS => self.simple(node, "em"),
            SyntaxKind::STRONG => self.simple(node, "strong"),
            SyntaxKind::TABLE_ROW => self.simple(node, "tr"),
            SyntaxKind::LIST => {
                let tag = if node.attr_flag("ordered") { "ol" } else { "ul" };
                let mut element = Element::new(tag).children(self.children(node));
                if node.attr_flag("toc") {
                    element = element.prop("className", "toc");
                }
                self.finish(node, element)
            }
            SyntaxKind::LIST_ITEM => {
                let mut element = Element::new("li");
                if node.attr_flag("task") {
                    let mut checkbox = Element::new("input")
                        .prop("type", "checkbox")
                        .prop("disabled", "");
                    if node.attr_flag("checked") {
                        checkbox = checkbox.prop("checked", "");
                    }
                    element = element
                        .prop("className", "task-list-item")
                        .child(checkbox.into())
                        .child(ElementNode::text(" "));
                }
                let element = element.children(self.inner(node));
                self.finish(node, element)
            }
            SyntaxKind::CODE_BLOCK => {
                let lang = node.attr_str("lang").unwrap_or("");
                let mut code = Element::new("code");
                if !lang.is_empty() {
                    code = code.prop("className", format!("language-{lang}"));
                }
                let code = code.child(ElementNode::text(node.content_str()));
                let element = Element::new("pre").child(code.into());
                self.finish(node, element)
            }
            SyntaxKind::INLINE_CODE => {
                let element = Element::new("code").child(ElementNode::text(node.content_str()));
                self.finish(node, element)
            }
            SyntaxKind::LINK => {
                let href = self.options.url(node.attr_str("href").unwrap_or(""));
                let mut element = Element::new("a");
                if let Some(target) = self.options.target_for(&href) {
                    element = element.prop("target", target);
                    if target == "_blank" {
                        element = element.prop("rel", "noopener noreferrer");
                    }
                }
                let element = element.prop("href", href).children(self.inner(node));
                self.finish(node, element)
            }
            SyntaxKind::IMAGE => {
                let src = self.options.url(node.attr_str("src").unwrap_or(""));
                let mut element = Element::new("img")
                    .prop("src", src)
                    .prop("alt", node.attr_str("alt").unwrap_or(""));
                if let Some(title) = node.attr_str("title") {
                    element = element.prop("title", title);
                }
                self.finish(node, element)
            }
            SyntaxKind::HORIZONTAL_RULE => self.finish(node, Element::new("hr")),
            SyntaxKind::TABLE => {
                let (head, body): (Vec<&Node>, Vec<&Node>) = node
                    .children
                    .iter()
                    .partition(|row| row.children.first().is_some_and(|c| c.attr_flag("header")));
                let mut element = Element::new("table");
                if !head.is_empty() {
                    let rows = head.into_iter().map(|r| self.render(r)).collect();
                    element = element.child(Element::new("thead").children(rows).into());
                }
                if !body.is_empty() {
                    let rows = body.into_iter().map(|r| self.render(r)).collect();
                    element = element.child(Element::new("tbody").children(rows).into());
                }
                self.finish(node, element)
            }
            SyntaxKind::TABLE_CELL => {
                let tag = if node.attr_flag("header") { "th" } else { "td" };
                let mut element = Element::new(tag);
                if let Some(align @ ("center" | "right")) = node.attr_str("align") {
                    element = element.prop("style", format!("text-align: {align}"));
                }
                let element = element.children(self.inner(node));
                self.finish(node, element)
            }
            SyntaxKind::CUSTOM_BLOCK => match node.attr_str("type") {
                Some("footnotes") => {
                    let list = Element::new("ol").children(self.children(node));
                    let element = Element::new("section")
                        .prop("className", "footnotes")
                        .child(list.into());
                    self.finish(node, element)
                }
                Some("footnote") => {
                    let element = Element::new("li")
                        .prop("id", format!("fn-{}", node.attr_str("id").unwrap_or("")))
                        .children(self.inner(node));
                    self.finish(node, element)
                }
                _ => {
                    let element = Element::new("div")
                        .prop("className", "custom-block")
                        .children(self.inner(node));
                    self.finish(node, element)
                }
            },
            SyntaxKind::CUSTOM_INLINE => match node.attr_str("type") {
                Some("footnote-ref") => {
                    let id = node.attr_str("id").unwrap_or("");
                    let anchor = Element::new("a")
                        .prop("href", format!("#fn-{id}"))
                        .child(ElementNode::text(id));
                    let element = Element::new("sup")
                        .prop("className", "footnote-ref")
                        .child(anchor.into());
                    self.finish(node, element)
                }
                _ => {
                    let element = Element::new("span")
                        .prop("className", "custom-inline")
                        .children(self.inner(node));
                    self.finish(node, element)
                }
            },
        }
    }

    fn simple(&self, node: &Node, tag: &str) -> ElementNode {
        let element = Element::new(tag).children(self.inner(node));
        self.finish(node, element)
    }

    /// Hands the default element to a matching component, if any.
    fn finish(&self, node: &Node, element: Element) -> ElementNode {
        match self.options.components.get(&element.tag) {
            Some(component) => component(ComponentProps {
                tag: element.tag,
                props: element.props,
                children: element.children,
                node: node.clone(),
            }),
            None => element.into(),
        }
    }

    fn inner(&self, node: &Node) -> Vec<ElementNode> {
        if node.children.is_empty() {
            let content = node.content_str();
            if content.is_empty() {
                Vec::new()
            } else {
                vec![ElementNode::text(content)]
            }
        } else {
            self.children(node)
        }
    }

    fn children(&self, node: &Node) -> Vec<ElementNode> {
        node.children.iter().map(|c| self.render(c)).collect()
    }
}
