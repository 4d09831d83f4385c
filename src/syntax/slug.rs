//! Heading anchor slugs.

/// Builds a URL-safe anchor id from heading text.
///
/// The text is lowercased, every run of characters outside `[A-Za-z0-9_]`
/// becomes a single `-`, and leading/trailing dashes are dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Anchor id in the looser style used for outlines: whitespace runs become
/// `-`, other characters outside `[A-Za-z0-9_-]` are dropped, so `"a & b"`
/// gives `"a--b"`.
pub fn generate_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_space {
                id.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            id.push(c);
        }
    }

    id.trim_matches('-').to_string()
}
