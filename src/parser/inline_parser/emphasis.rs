//! Strong (`**x**`) and emphasis (`*x*`) spans.
//!
//! Delimiters never nest: the span content is the raw text up to the first
//! matching closer.

/// Try to parse `**content**` at the start of `text`.
pub(crate) fn try_parse_strong(text: &str) -> Option<(usize, &str)> {
    let rest = text.strip_prefix("**")?;
    let close = rest.find("**")?;
    Some((close + 4, &rest[..close]))
}

/// Try to parse `*content*` at the start of `text`. An opener followed by a
/// second `*` is not emphasis.
pub(crate) fn try_parse_emphasis(text: &str) -> Option<(usize, &str)> {
    let rest = text.strip_prefix('*')?;
    if rest.starts_with('*') {
        return None;
    }
    let close = rest.find('*')?;
    Some((close + 2, &rest[..close]))
}
