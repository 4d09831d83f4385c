//! Plugins shipped with the crate.

use crate::tokenizer::line_kind::is_fence;

use super::Plugin;

mod footnote;
mod table;
mod task_list;
mod toc;

pub use footnote::footnote;
pub use table::table;
pub use task_list::task_list;
pub use toc::table_of_contents;

pub const TABLE_ID: &str = "table";
pub const TASK_LIST_ID: &str = "taskList";
pub const TOC_ID: &str = "tableOfContents";
pub const FOOTNOTE_ID: &str = "footnote";

/// All builtin plugins, in registration order.
pub fn builtin_plugins() -> Vec<Plugin> {
    vec![table(), task_list(), table_of_contents(), footnote()]
}

/// Ensures every line accepted by `is_target` (outside code fences) is
/// separated from its non-blank neighbours by a blank line. With
/// `join_runs`, consecutive target lines stay together as one block.
pub(crate) fn isolate_lines(text: &str, is_target: impl Fn(&str) -> bool, join_runs: bool) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut prev_hit = false;

    for line in text.split('\n') {
        let probe = line.trim_end_matches('\r');
        let hit = !in_fence && is_target(probe);
        if is_fence(probe) {
            in_fence = !in_fence;
        }

        let last_blank = out.last().is_none_or(|l| l.trim().is_empty());
        if hit && !(join_runs && prev_hit) && !last_blank {
            out.push("");
        } else if !hit && prev_hit && !probe.trim().is_empty() {
            out.push("");
        }
        out.push(line);
        prev_hit = hit;
    }

    out.join("\n")
}
