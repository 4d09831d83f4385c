//! Flat lexical tokenization of markdown source.
//!
//! The token stream feeds [`crate::parser::ast_builder`]. Tokens follow
//! source order; a `Newline` token separates successive source lines.

use serde::{Deserialize, Serialize};

use crate::parser::inline_parser::code_spans::try_parse_code_span;
use crate::parser::inline_parser::emphasis::{try_parse_emphasis, try_parse_strong};
use crate::parser::inline_parser::links::{try_parse_image, try_parse_link};

pub(crate) mod line_kind;

use line_kind::{LineKind, classify_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Heading,
    Paragraph,
    CodeBlock,
    Blockquote,
    ListItem,
    Emphasis,
    Strong,
    CodeInline,
    Link,
    Image,
    HorizontalRule,
    Newline,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    pub raw: String,
    /// Heading level, or list nesting depth (always 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Set on list items: whether the marker was `1.` style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
}

impl Token {
    fn new(kind: TokenKind, value: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            raw: raw.into(),
            depth: None,
            lang: None,
            href: None,
            alt: None,
            ordered: None,
        }
    }

    fn newline() -> Self {
        Self::new(TokenKind::Newline, "\n", "\n")
    }
}

/// Splits markdown text into tokens. Never fails; blank lines produce no
/// token apart from the separating newlines.
pub fn tokenize(source: &str) -> Vec<Token> {
    let source = source.replace("\r\n", "\n");
    let mut tokens = Vec::new();
    let lines: Vec<&str> = source.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        tokenize_line(line, &mut tokens);
        if i + 1 < lines.len() {
            tokens.push(Token::newline());
        }
    }

    log::debug!("Tokenized {} lines into {} tokens", lines.len(), tokens.len());
    tokens
}

fn tokenize_line(line: &str, tokens: &mut Vec<Token>) {
    match classify_line(line) {
        LineKind::Blank => {}
        LineKind::Heading { level, text } => {
            let mut token = Token::new(TokenKind::Heading, text, line);
            token.depth = Some(level);
            tokens.push(token);
        }
        LineKind::Fence { lang } => {
            let mut token = Token::new(TokenKind::CodeBlock, "", line);
            token.lang = Some(lang.to_string());
            tokens.push(token);
        }
        LineKind::Blockquote { text } => {
            tokens.push(Token::new(TokenKind::Blockquote, text, line));
        }
        LineKind::ListItem { ordered, text } => {
            let mut token = Token::new(TokenKind::ListItem, text, line);
            token.depth = Some(0);
            token.ordered = Some(ordered);
            tokens.push(token);
        }
        LineKind::HorizontalRule => {
            tokens.push(Token::new(TokenKind::HorizontalRule, "", line));
        }
        LineKind::Paragraph => {
            tokens.push(Token::new(TokenKind::Paragraph, line, line));
            tokenize_inline(line, tokens);
        }
    }
}

/// Emits inline tokens for a paragraph line. Spans are tried in the order
/// code, strong, emphasis, link, image; all remaining characters form one
/// trailing `Text` token when they are not blank.
fn tokenize_inline(text: &str, tokens: &mut Vec<Token>) {
    let mut buffer = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some((len, content)) = try_parse_code_span(rest) {
            tokens.push(Token::new(
                TokenKind::CodeInline,
                content,
                &rest[..len],
            ));
            pos += len;
            continue;
        }
        if let Some((len, content)) = try_parse_strong(rest) {
            tokens.push(Token::new(TokenKind::Strong, content, &rest[..len]));
            pos += len;
            continue;
        }
        if let Some((len, content)) = try_parse_emphasis(rest) {
            tokens.push(Token::new(TokenKind::Emphasis, content, &rest[..len]));
            pos += len;
            continue;
        }
        if let Some((len, parts)) = try_parse_link(rest) {
            let mut token = Token::new(TokenKind::Link, parts.label, &rest[..len]);
            token.href = Some(parts.dest.to_string());
            tokens.push(token);
            pos += len;
            continue;
        }
        if let Some((len, parts)) = try_parse_image(rest) {
            let mut token = Token::new(TokenKind::Image, "", &rest[..len]);
            token.href = Some(parts.dest.to_string());
            token.alt = Some(parts.label.to_string());
            tokens.push(token);
            pos += len;
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        buffer.push(c);
        pos += c.len_utf8();
    }

    if !buffer.trim().is_empty() {
        tokens.push(Token::new(TokenKind::Text, buffer.clone(), buffer));
    }
}
