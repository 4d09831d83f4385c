//! Line classification shared by the tokenizer and the direct parser.

use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading regex"));
static FENCE_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([A-Za-z0-9_]*)$").expect("valid fence regex"));
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s").expect("valid bullet regex"));
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("valid ordered regex"));
static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*{3,}|-{3,}|_{3,})$").expect("valid rule regex"));

/// The block-level role of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    /// An opening or closing code fence. Fences are not nested.
    Fence { lang: &'a str },
    Blockquote { text: &'a str },
    ListItem { ordered: bool, text: &'a str },
    HorizontalRule,
    Paragraph,
}

/// Classifies `line` in priority order: blank, heading, fence, blockquote,
/// list item, horizontal rule, paragraph.
pub(crate) fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADING.captures(line)
        && let (Some(marker), Some(text)) = (caps.get(1), caps.get(2))
    {
        return LineKind::Heading {
            level: marker.as_str().len() as u8,
            text: text.as_str(),
        };
    }

    if line.starts_with("```") {
        let lang = FENCE_LANG
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());
        return LineKind::Fence { lang };
    }

    if let Some(rest) = line.strip_prefix('>') {
        return LineKind::Blockquote { text: rest.trim() };
    }

    if let Some(text) = strip_list_marker(line, &BULLET_MARKER) {
        return LineKind::ListItem {
            ordered: false,
            text,
        };
    }
    if let Some(text) = strip_list_marker(line, &ORDERED_MARKER) {
        return LineKind::ListItem {
            ordered: true,
            text,
        };
    }

    if HORIZONTAL_RULE.is_match(line) {
        return LineKind::HorizontalRule;
    }

    LineKind::Paragraph
}

fn strip_list_marker<'a>(line: &'a str, marker: &Regex) -> Option<&'a str> {
    marker.find(line).map(|m| &line[m.end()..])
}

pub(crate) fn is_fence(line: &str) -> bool {
    line.starts_with("```")
}
