//! Footnote references (`text[^1]`) and definitions (`[^1]: note`).

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::parse_inline;
use crate::plugin::{Plugin, PluginKind};
use crate::syntax::{Node, SyntaxKind};

use super::{FOOTNOTE_ID, isolate_lines};

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\^([A-Za-z0-9_]+)\]:\s*(.*)$").expect("valid definition regex")
});
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\^([A-Za-z0-9_]+)\]").expect("valid reference regex"));

pub fn footnote() -> Plugin {
    Plugin::new(FOOTNOTE_ID, PluginKind::Syntax)
        .with_priority(4)
        .before_parse(|text, _| {
            Ok(Some(isolate_lines(text, |l| DEFINITION.is_match(l), false)))
        })
        .after_parse(|doc, _| {
            let mut doc = doc.clone();
            let mut definitions = Vec::new();
            take_definitions(&mut doc, &mut definitions);
            link_references(&mut doc);
            if !definitions.is_empty() {
                log::debug!("Collected {} footnote definitions", definitions.len());
                doc.children.push(footnote_section(definitions));
            }
            Ok(Some(doc))
        })
}

/// Removes definition paragraphs at any depth, collecting `(id, text)` in
/// first-seen order. A repeated id keeps its position and takes the later text.
fn take_definitions(node: &mut Node, definitions: &mut Vec<(String, String)>) {
    node.children.retain_mut(|child| {
        if child.kind == SyntaxKind::PARAGRAPH
            && let Some(caps) = DEFINITION.captures(child.content_str().trim())
        {
            let (id, text) = (caps[1].to_string(), caps[2].to_string());
            match definitions.iter_mut().find(|(seen, _)| *seen == id) {
                Some(existing) => existing.1 = text,
                None => definitions.push((id, text)),
            }
            return false;
        }
        take_definitions(child, definitions);
        true
    });
}

/// Splits text nodes around `[^id]` into text and `footnote-ref` nodes.
fn link_references(node: &mut Node) {
    if node.kind == SyntaxKind::PARAGRAPH
        && node.children.is_empty()
        && REFERENCE.is_match(node.content_str())
    {
        node.children = split_references(node.content_str());
        return;
    }

    let mut children = Vec::with_capacity(node.children.len());
    for mut child in std::mem::take(&mut node.children) {
        if child.kind == SyntaxKind::TEXT && REFERENCE.is_match(child.content_str()) {
            children.extend(split_references(child.content_str()));
        } else {
            link_references(&mut child);
            children.push(child);
        }
    }
    node.children = children;
}

fn split_references(text: &str) -> Vec<Node> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in REFERENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            parts.push(Node::text(&text[last..whole.start()]));
        }
        let id = &caps[1];
        parts.push(
            Node::new(SyntaxKind::CUSTOM_INLINE)
                .with_content(id)
                .with_attr("type", "footnote-ref")
                .with_attr("id", id),
        );
        last = whole.end();
    }
    if last < text.len() {
        parts.push(Node::text(&text[last..]));
    }
    parts
}

fn footnote_section(definitions: Vec<(String, String)>) -> Node {
    let notes = definitions
        .into_iter()
        .map(|(id, text)| {
            let paragraph = Node::new(SyntaxKind::PARAGRAPH)
                .with_children(parse_inline(&text))
                .with_content(text);
            Node::new(SyntaxKind::CUSTOM_BLOCK)
                .with_attr("type", "footnote")
                .with_attr("id", id)
                .with_children(vec![paragraph])
        })
        .collect();
    Node::new(SyntaxKind::CUSTOM_BLOCK)
        .with_attr("type", "footnotes")
        .with_children(notes)
}
