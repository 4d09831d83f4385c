//! Direct line-based parser: a small state machine that builds the document
//! tree without an intermediate token stream.

use crate::syntax::{Node, SyntaxKind};
use crate::tokenizer::line_kind::{LineKind, classify_line, is_fence};

use super::inline_parser::parse_inline;

mod paragraphs;


use paragraphs::collect_paragraph;

/// Parser state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Normal,
    InCodeBlock,
    InBlockquote,
    InList,
}

pub struct BlockParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    state: ParserState,
    blocks: Vec<Node>,
}

impl<'a> BlockParser<'a> {
    /// `input` must already use `\n` line endings.
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.split('\n').collect(),
            pos: 0,
            state: ParserState::Normal,
            blocks: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Node {
        log::debug!("Starting direct parse of {} lines", self.lines.len());

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            log::trace!("Line {} in {:?}: {:?}", self.pos + 1, self.state, line);

            self.pos = match self.state {
                ParserState::Normal => self.parse_normal_line(line),
                ParserState::InCodeBlock => self.parse_code_block_line(line),
                ParserState::InBlockquote => self.parse_blockquote_line(line),
                ParserState::InList => self.parse_list_line(line),
            };
        }

        if self.state == ParserState::InCodeBlock {
            log::debug!("Unterminated code block at end of input");
        }

        Node::document(self.blocks)
    }

    /// Returns the index of the next line to process. Entering a blockquote or
    /// list returns the current index so that the line is handled in the new
    /// state.
    fn parse_normal_line(&mut self, line: &'a str) -> usize {
        match classify_line(line) {
            LineKind::Blank => self.pos + 1,
            LineKind::Heading { level, text } => {
                self.blocks.push(Node::heading(level, text));
                self.pos + 1
            }
            LineKind::Fence { lang } => {
                let code = Node::new(SyntaxKind::CODE_BLOCK)
                    .with_content("")
                    .with_attr("lang", lang);
                self.blocks.push(code);
                self.state = ParserState::InCodeBlock;
                self.pos + 1
            }
            LineKind::Blockquote { .. } => {
                self.blocks.push(Node::new(SyntaxKind::BLOCKQUOTE));
                self.state = ParserState::InBlockquote;
                self.pos
            }
            LineKind::ListItem { ordered, .. } => {
                self.blocks
                    .push(Node::new(SyntaxKind::LIST).with_attr("ordered", ordered));
                self.state = ParserState::InList;
                self.pos
            }
            LineKind::HorizontalRule => {
                self.blocks.push(Node::new(SyntaxKind::HORIZONTAL_RULE));
                self.pos + 1
            }
            LineKind::Paragraph => {
                let (content, next) = collect_paragraph(&self.lines, self.pos);
                let children = parse_inline(&content);
                self.blocks.push(
                    Node::new(SyntaxKind::PARAGRAPH)
                        .with_content(content)
                        .with_children(children),
                );
                next
            }
        }
    }

    fn parse_code_block_line(&mut self, line: &str) -> usize {
        if is_fence(line) {
            self.state = ParserState::Normal;
            return self.pos + 1;
        }

        if let Some(code) = self.open_block(SyntaxKind::CODE_BLOCK) {
            let content = code.content.get_or_insert_with(String::new);
            content.push_str(line);
            content.push('\n');
        }
        self.pos + 1
    }

    fn parse_blockquote_line(&mut self, line: &str) -> usize {
        let Some(rest) = line.strip_prefix('>') else {
            if line.trim().is_empty() {
                return self.pos + 1;
            }
            self.state = ParserState::Normal;
            return self.pos;
        };

        let content = rest.trim();
        if !content.is_empty()
            && let Some(quote) = self.open_block(SyntaxKind::BLOCKQUOTE)
        {
            quote.children.push(
                Node::new(SyntaxKind::PARAGRAPH)
                    .with_content(content)
                    .with_children(parse_inline(content)),
            );
        }
        self.pos + 1
    }

    fn parse_list_line(&mut self, line: &str) -> usize {
        match classify_line(line) {
            LineKind::ListItem { text, .. } => {
                if let Some(list) = self.open_block(SyntaxKind::LIST) {
                    list.children.push(
                        Node::new(SyntaxKind::LIST_ITEM)
                            .with_content(text)
                            .with_children(parse_inline(text)),
                    );
                }
                self.pos + 1
            }
            LineKind::Blank => self.pos + 1,
            _ => {
                self.state = ParserState::Normal;
                self.pos
            }
        }
    }

    /// The last top-level block, if it has the expected kind.
    fn open_block(&mut self, kind: SyntaxKind) -> Option<&mut Node> {
        self.blocks.last_mut().filter(|node| node.kind == kind)
    }
}
