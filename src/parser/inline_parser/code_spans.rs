//! Inline code spans (`code`).

/// Try to parse a code span at the start of `text`.
/// Returns the bytes consumed and the code content.
///
/// Only single backticks delimit a span; the content runs to the next backtick.
pub(crate) fn try_parse_code_span(text: &str) -> Option<(usize, &str)> {
    let rest = text.strip_prefix('`')?;
    let close = rest.find('`')?;
    Some((close + 2, &rest[..close]))
}
