//! Builds the document tree from a token stream in one linear pass.

use crate::syntax::{Node, SyntaxKind};
use crate::tokenizer::{Token, TokenKind};

use super::inline_parser::parse_inline;

pub struct AstBuilder<'t> {
    tokens: &'t [Token],
    pos: usize,
    blocks: Vec<Node>,
}

impl<'t> AstBuilder<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            blocks: Vec::new(),
        }
    }

    pub fn build(mut self) -> Node {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            self.pos += 1;
            self.process_token(token);
        }
        log::debug!(
            "Built document with {} blocks from {} tokens",
            self.blocks.len(),
            self.tokens.len()
        );
        Node::document(self.blocks)
    }

    fn process_token(&mut self, token: &Token) {
        match token.kind {
            TokenKind::Heading => {
                self.blocks
                    .push(Node::heading(token.depth.unwrap_or(1), &token.value));
            }
            TokenKind::Paragraph => {
                self.blocks
                    .push(inline_block(SyntaxKind::PARAGRAPH, &token.value));
            }
            TokenKind::Blockquote => {
                self.blocks
                    .push(inline_block(SyntaxKind::BLOCKQUOTE, &token.value));
            }
            TokenKind::HorizontalRule => {
                self.blocks.push(Node::new(SyntaxKind::HORIZONTAL_RULE));
            }
            TokenKind::CodeBlock => {
                let code = self.collect_code_block(token);
                self.blocks.push(code);
            }
            TokenKind::ListItem => self.push_list_item(token),
            // Inline tokens are re-derived from the paragraph text.
            TokenKind::Newline
            | TokenKind::Text
            | TokenKind::Strong
            | TokenKind::Emphasis
            | TokenKind::CodeInline
            | TokenKind::Link
            | TokenKind::Image => {}
        }
    }

    /// Consumes tokens up to and including the closing fence. Each source
    /// line contributes the raw text of its line-level token; newlines are
    /// kept except the one ending the opening fence line.
    fn collect_code_block(&mut self, open: &Token) -> Node {
        let mut content = String::new();
        let mut skip_newline = true;

        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            self.pos += 1;
            match token.kind {
                TokenKind::CodeBlock => break,
                TokenKind::Newline => {
                    if !skip_newline {
                        content.push('\n');
                    }
                    skip_newline = false;
                }
                TokenKind::Heading
                | TokenKind::Paragraph
                | TokenKind::Blockquote
                | TokenKind::ListItem
                | TokenKind::HorizontalRule => content.push_str(&token.raw),
                _ => {}
            }
        }

        Node::new(SyntaxKind::CODE_BLOCK)
            .with_content(content)
            .with_attr("lang", open.lang.as_deref().unwrap_or(""))
    }

    fn push_list_item(&mut self, token: &Token) {
        let item = inline_block(SyntaxKind::LIST_ITEM, &token.value);

        if let Some(list) = self
            .blocks
            .last_mut()
            .filter(|node| node.kind == SyntaxKind::LIST)
        {
            list.children.push(item);
            return;
        }

        let list = Node::new(SyntaxKind::LIST)
            .with_attr("ordered", token.ordered.unwrap_or(false))
            .with_children(vec![item]);
        self.blocks.push(list);
    }
}

fn inline_block(kind: SyntaxKind, text: &str) -> Node {
    Node::new(kind)
        .with_content(text)
        .with_children(parse_inline(text))
}
