//! `- [ ] todo` / `- [x] done` list items.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::parse_inline;
use crate::plugin::{Plugin, PluginKind};
use crate::syntax::{Node, SyntaxKind};

use super::TASK_LIST_ID;

static TASK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([ xX])\]\s*(.*)").expect("valid task regex"));

pub fn task_list() -> Plugin {
    Plugin::new(TASK_LIST_ID, PluginKind::Syntax)
        .with_priority(6)
        .after_parse(|doc, _| {
            let mut doc = doc.clone();
            mark_tasks(&mut doc);
            Ok(Some(doc))
        })
}

fn mark_tasks(node: &mut Node) {
    if node.kind == SyntaxKind::LIST_ITEM && !node.attr_flag("task") {
        let parsed = TASK_MARKER
            .captures(node.content_str())
            .map(|caps| (&caps[1] != " ", caps[2].to_string()));
        if let Some((checked, text)) = parsed {
            node.set_attr("task", true);
            node.set_attr("checked", checked);
            node.children = parse_inline(&text);
            node.content = Some(text);
        }
    }
    for child in &mut node.children {
        mark_tasks(child);
    }
}
