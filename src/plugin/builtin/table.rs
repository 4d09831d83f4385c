//! Pipe tables.
//!
//! ```markdown
//! | Name | Qty |
//! |:-----|----:|
//! | tea  |   2 |
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::parse_inline;
use crate::plugin::{Plugin, PluginKind};
use crate::syntax::{Node, SyntaxKind};

use super::{TABLE_ID, isolate_lines};

static DELIMITER_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:]*\|$").expect("valid delimiter regex"));

pub fn table() -> Plugin {
    Plugin::new(TABLE_ID, PluginKind::Syntax)
        .with_priority(5)
        .before_parse(|text, _| Ok(Some(isolate_lines(text, is_pipe_line, true))))
        .after_parse(|doc, _| {
            let mut doc = doc.clone();
            convert_tables(&mut doc);
            Ok(Some(doc))
        })
}

fn is_pipe_line(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

fn pipe_count(line: &str) -> usize {
    line.matches('|').count()
}

fn convert_tables(node: &mut Node) {
    if node.kind == SyntaxKind::PARAGRAPH
        && let Some(table) = table_from_paragraph(node.content_str())
    {
        *node = table;
        return;
    }
    for child in &mut node.children {
        convert_tables(child);
    }
}

fn table_from_paragraph(content: &str) -> Option<Node> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    let [header, delimiter, rest @ ..] = lines.as_slice() else {
        return None;
    };
    if !is_pipe_line(header)
        || !is_pipe_line(delimiter)
        || pipe_count(header) != pipe_count(delimiter)
        || !DELIMITER_ROW.is_match(delimiter)
    {
        return None;
    }

    let alignments: Vec<&str> = split_cells(delimiter).into_iter().map(alignment).collect();
    let headers = split_cells(header);
    log::debug!("Converting paragraph to a {}-column table", headers.len());

    let mut rows = vec![table_row(&headers, &alignments, true)];
    for line in rest.iter().filter(|l| is_pipe_line(l)) {
        rows.push(table_row(&split_cells(line), &alignments, false));
    }

    Some(
        Node::new(SyntaxKind::TABLE)
            .with_attr("columns", headers.len())
            .with_children(rows),
    )
}

/// Cells of a `|`-delimited row, trimmed, without the outer pipes.
fn split_cells(line: &str) -> Vec<&str> {
    let inner = &line[1..line.len() - 1];
    inner.split('|').map(str::trim).collect()
}

fn alignment(cell: &str) -> &'static str {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => "center",
        (_, true) => "right",
        _ => "left",
    }
}

fn table_row(cells: &[&str], alignments: &[&str], header: bool) -> Node {
    let cells = cells
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Node::new(SyntaxKind::TABLE_CELL)
                .with_content(*text)
                .with_children(parse_inline(text))
                .with_attr("header", header)
                .with_attr("align", alignments.get(i).copied().unwrap_or("left"))
        })
        .collect();
    Node::new(SyntaxKind::TABLE_ROW).with_children(cells)
}
