//! Heading anchors and a `[TOC]` table of contents.

use std::collections::HashSet;

use crate::plugin::{Plugin, PluginKind};
use crate::syntax::{Node, SyntaxKind, slugify};

use super::{TOC_ID, isolate_lines};

const MARKERS: [&str; 2] = ["[TOC]", "[[TOC]]"];

#[derive(Debug, Clone, PartialEq)]
struct TocEntry {
    level: u8,
    id: String,
    text: String,
}

pub fn table_of_contents() -> Plugin {
    Plugin::new(TOC_ID, PluginKind::Extension)
        .with_priority(3)
        .before_parse(|text, _| Ok(Some(isolate_lines(text, is_marker, false))))
        .after_parse(|doc, _| {
            let mut doc = doc.clone();
            let mut entries = Vec::new();
            stamp_heading_ids(&mut doc, &mut HashSet::new(), &mut entries);
            if replace_marker(&mut doc, &entries) {
                log::debug!("Inserted table of contents with {} entries", entries.len());
            }
            Ok(Some(doc))
        })
}

fn is_marker(line: &str) -> bool {
    MARKERS.contains(&line.trim())
}

/// Gives every heading an `id`, in document order. Repeated slugs get
/// `-1`, `-2`, ... suffixes.
fn stamp_heading_ids(node: &mut Node, used: &mut HashSet<String>, entries: &mut Vec<TocEntry>) {
    if node.kind == SyntaxKind::HEADING {
        let text = node.text_content();
        let id = unique_slug(&slugify(&text), used);
        node.set_attr("id", id.as_str());
        entries.push(TocEntry {
            level: node.level.unwrap_or(1),
            id,
            text,
        });
    }
    for child in &mut node.children {
        stamp_heading_ids(child, used, entries);
    }
}

fn unique_slug(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{base}-{n}");
    }
    used.insert(candidate.clone());
    candidate
}

/// Replaces the first marker paragraph; returns whether one was found.
fn replace_marker(node: &mut Node, entries: &[TocEntry]) -> bool {
    if node.kind == SyntaxKind::PARAGRAPH && is_marker(node.content_str()) {
        *node = toc_list(entries).with_attr("toc", true);
        return true;
    }
    node.children
        .iter_mut()
        .any(|child| replace_marker(child, entries))
}

/// Builds a nested unordered list: entries deeper than the one before them
/// become a sub-list of its item.
fn toc_list(entries: &[TocEntry]) -> Node {
    let mut items = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        let entry = &entries[i];
        let end = entries[i + 1..]
            .iter()
            .position(|e| e.level <= entry.level)
            .map_or(entries.len(), |offset| i + 1 + offset);

        let link = Node::new(SyntaxKind::LINK)
            .with_content(entry.text.as_str())
            .with_attr("href", format!("#{}", entry.id));
        let mut item = Node::new(SyntaxKind::LIST_ITEM).with_children(vec![link]);
        if end > i + 1 {
            item.children.push(toc_list(&entries[i + 1..end]));
        }
        items.push(item);
        i = end;
    }
    Node::new(SyntaxKind::LIST)
        .with_attr("ordered", false)
        .with_children(items)
}
