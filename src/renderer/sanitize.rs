//! HTML escaping and URL filtering.

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// Escapes `& < > " '` for use in HTML text or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns `url` unchanged unless its trimmed, lowercased form starts with a
/// script-capable scheme (`javascript:`, `data:`, `vbscript:`), in which case
/// the result is empty.
pub fn sanitize_url(url: &str) -> String {
    let normalized = url.trim().to_lowercase();
    if BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        log::debug!("Dropped unsafe URL: {url:?}");
        return String::new();
    }
    url.to_string()
}
