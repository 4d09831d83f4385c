//! Paragraph collection.

use crate::tokenizer::line_kind::{LineKind, classify_line};

/// Collects the paragraph starting at `start`: that line plus every following
/// line that is neither blank nor the start of another block. Returns the
/// joined content and the index of the first line after the paragraph.
pub(super) fn collect_paragraph(lines: &[&str], start: usize) -> (String, usize) {
    let mut end = start + 1;
    while end < lines.len() && classify_line(lines[end]) == LineKind::Paragraph {
        end += 1;
    }
    (lines[start..end].join("\n"), end)
}
