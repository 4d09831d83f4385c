//! Inline links `[text](href)` and images `![alt](src)`.

/// The bracket and destination parts of a link-shaped span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinkParts<'a> {
    pub label: &'a str,
    pub dest: &'a str,
}

/// Matches `[label](dest)` at the start of `text`: the `]` must be followed
/// immediately by `(`, and a `)` must follow.
fn try_parse_bracketed(text: &str) -> Option<(usize, LinkParts<'_>)> {
    let rest = text.strip_prefix('[')?;
    let close_bracket = rest.find(']')?;
    let after = rest[close_bracket + 1..].strip_prefix('(')?;
    let close_paren = after.find(')')?;

    let consumed = 1 + close_bracket + 2 + close_paren + 1;
    Some((
        consumed,
        LinkParts {
            label: &rest[..close_bracket],
            dest: &after[..close_paren],
        },
    ))
}

pub(crate) fn try_parse_link(text: &str) -> Option<(usize, LinkParts<'_>)> {
    try_parse_bracketed(text)
}

pub(crate) fn try_parse_image(text: &str) -> Option<(usize, LinkParts<'_>)> {
    let rest = text.strip_prefix('!')?;
    let (len, parts) = try_parse_bracketed(rest)?;
    Some((len + 1, parts))
}
