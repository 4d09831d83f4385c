//! Queries over a parsed document: outline, links, images, plain text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{Node, SyntaxKind, generate_id};

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static TITLED_DEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(.*?)(?:\s+"(.*)")?$"#).expect("valid destination regex"));

const MARKDOWN_SPECIAL: &str = "\\`*_{}[]()#+-.!|";

pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// A heading in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRef {
    pub text: String,
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub alt: String,
    pub src: String,
    pub title: Option<String>,
}

pub fn extract_headings(doc: &Node) -> Vec<Heading> {
    doc.find_all(SyntaxKind::HEADING)
        .into_iter()
        .map(|heading| {
            let text = heading.text_content().trim().to_string();
            Heading {
                level: heading.level.unwrap_or(1),
                id: generate_id(&text),
                text,
            }
        })
        .collect()
}

/// Every `LINK` node. A destination of the form `url "title"` is split.
pub fn extract_links(doc: &Node) -> Vec<LinkRef> {
    doc.find_all(SyntaxKind::LINK)
        .into_iter()
        .map(|link| {
            let (url, title) = split_title(link.attr_str("href").unwrap_or(""));
            LinkRef {
                text: link.text_content(),
                url,
                title,
            }
        })
        .collect()
}

pub fn extract_images(doc: &Node) -> Vec<ImageRef> {
    doc.find_all(SyntaxKind::IMAGE)
        .into_iter()
        .map(|image| {
            let (src, title) = split_title(image.attr_str("src").unwrap_or(""));
            ImageRef {
                alt: image
                    .attr_str("alt")
                    .unwrap_or(image.content_str())
                    .to_string(),
                src,
                title,
            }
        })
        .collect()
}

fn split_title(dest: &str) -> (String, Option<String>) {
    let dest = dest.trim();
    match TITLED_DEST.captures(dest) {
        Some(caps) => (
            caps.get(1).map_or(dest, |m| m.as_str()).to_string(),
            caps.get(2).map(|m| m.as_str().to_string()),
        ),
        None => (dest.to_string(), None),
    }
}

/// Readable text of the tree with code blocks, images and HTML tags
/// removed. Whitespace runs collapse to one space.
pub fn plain_text(node: &Node) -> String {
    let mut out = String::new();
    collect_plain_text(node, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_plain_text(node: &Node, out: &mut String) {
    if matches!(
        node.kind,
        SyntaxKind::CODE_BLOCK | SyntaxKind::IMAGE | SyntaxKind::HORIZONTAL_RULE
    ) {
        return;
    }
    if node.children.is_empty() {
        out.push_str(&HTML_TAG.replace_all(node.content_str(), ""));
    } else {
        for child in &node.children {
            collect_plain_text(child, out);
        }
    }
    if node.kind.is_block() {
        out.push(' ');
    }
}

/// Minutes needed to read the document, rounded up. Never less than one.
pub fn reading_time(doc: &Node, words_per_minute: usize) -> usize {
    let words = plain_text(doc).split_whitespace().count().max(1);
    words.div_ceil(words_per_minute.max(1))
}

/// Backslash-escapes Markdown punctuation and entity-encodes `<` and `>`.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if MARKDOWN_SPECIAL.contains(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn headings_in_document_order() {
        let doc = parse("# Hello World!\n\ntext\n\n## Sub & Co");
        assert_eq!(
            extract_headings(&doc),
            vec![
                Heading {
                    level: 1,
                    text: "Hello World!".to_string(),
                    id: "hello-world".to_string(),
                },
                Heading {
                    level: 2,
                    text: "Sub & Co".to_string(),
                    id: "sub--co".to_string(),
                },
            ]
        );
    }

    #[test]
    fn links_with_and_without_titles() {
        let doc = parse("[a](https://x.com) and [b](/p \"Title\")");
        let links = extract_links(&doc);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://x.com");
        assert_eq!(links[0].title, None);
        assert_eq!(links[1].text, "b");
        assert_eq!(links[1].url, "/p");
        assert_eq!(links[1].title.as_deref(), Some("Title"));
    }

    #[test]
    fn images_are_not_links() {
        let doc = parse("![logo](l.png \"Logo\") [x](y)");
        assert_eq!(
            extract_images(&doc),
            vec![ImageRef {
                alt: "logo".to_string(),
                src: "l.png".to_string(),
                title: Some("Logo".to_string()),
            }]
        );
        assert_eq!(extract_links(&doc).len(), 1);
    }

    #[test]
    fn plain_text_drops_markup_code_and_images() {
        let doc = parse(
            "# Title\n\nSome **bold** and [link](u).\n\n```\ncode\n```\n\n![img](a.png) <b>tag</b>",
        );
        assert_eq!(plain_text(&doc), "Title Some bold and link. tag");
    }

    #[test]
    fn reading_time_rounds_up() {
        let text = vec!["word"; 450].join(" ");
        assert_eq!(reading_time(&parse(&text), DEFAULT_WORDS_PER_MINUTE), 3);
        assert_eq!(reading_time(&parse(&text), 450), 1);
        assert_eq!(reading_time(&parse(""), DEFAULT_WORDS_PER_MINUTE), 1);
    }

    #[test]
    fn escapes_markdown_and_angle_brackets() {
        assert_eq!(
            escape_markdown("# Heading with *emphasis* and [link](url)"),
            r"\# Heading with \*emphasis\* and \[link\]\(url\)"
        );
        assert_eq!(
            escape_markdown("<div>HTML content</div>"),
            "&lt;div&gt;HTML content&lt;/div&gt;"
        );
    }
}
