//! Single-pass inline scanner shared by both parse modes.

use crate::syntax::{Node, SyntaxKind};

pub(crate) mod code_spans;
pub(crate) mod emphasis;
pub(crate) mod links;

use code_spans::try_parse_code_span;
use emphasis::{try_parse_emphasis, try_parse_strong};
use links::{try_parse_image, try_parse_link};

/// Parses inline markup in `text` into a flat list of nodes.
///
/// At each position the scanner tries, in order: strong, emphasis, inline
/// code, link, image. Anything else (including unclosed delimiters) is
/// collected into `TEXT` nodes, which are flushed only before a non-text
/// node and at the end.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pending = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some((len, node)) = try_parse_span(rest) {
            flush_text(&mut pending, &mut nodes);
            nodes.push(node);
            pos += len;
            continue;
        }

        // `rest` is non-empty and `pos` is always on a char boundary.
        let Some(c) = rest.chars().next() else {
            break;
        };
        pending.push(c);
        pos += c.len_utf8();
    }

    flush_text(&mut pending, &mut nodes);
    log::trace!("Parsed {} inline nodes from {} bytes", nodes.len(), text.len());
    nodes
}

fn try_parse_span(rest: &str) -> Option<(usize, Node)> {
    if let Some((len, content)) = try_parse_strong(rest) {
        return Some((len, Node::new(SyntaxKind::STRONG).with_content(content)));
    }
    if let Some((len, content)) = try_parse_emphasis(rest) {
        return Some((len, Node::new(SyntaxKind::EMPHASIS).with_content(content)));
    }
    if let Some((len, content)) = try_parse_code_span(rest) {
        return Some((len, Node::new(SyntaxKind::INLINE_CODE).with_content(content)));
    }
    if let Some((len, parts)) = try_parse_link(rest) {
        let link = Node::new(SyntaxKind::LINK)
            .with_content(parts.label)
            .with_attr("href", parts.dest);
        return Some((len, link));
    }
    if let Some((len, parts)) = try_parse_image(rest) {
        let image = Node::new(SyntaxKind::IMAGE)
            .with_content(parts.label)
            .with_attr("src", parts.dest)
            .with_attr("alt", parts.label);
        return Some((len, image));
    }
    None
}

fn flush_text(pending: &mut String, nodes: &mut Vec<Node>) {
    if !pending.is_empty() {
        nodes.push(Node::text(std::mem::take(pending)));
    }
}
