use crate::parser::block_parser::tests::helpers::{assert_block_kinds, child_kinds, get_blocks};
use crate::syntax::SyntaxKind;

#[test]
fn quote_then_paragraph_reenters_normal() {
    let blocks = get_blocks("> q\ntext");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind, SyntaxKind::BLOCKQUOTE);
    assert_eq!(blocks[0].children.len(), 1);
    assert_eq!(blocks[0].children[0].kind, SyntaxKind::PARAGRAPH);
    assert_eq!(blocks[0].children[0].content_str(), "q");
    assert_eq!(blocks[1].kind, SyntaxKind::PARAGRAPH);
    assert_eq!(blocks[1].content_str(), "text");
}

#[test]
fn each_quoted_line_is_a_paragraph() {
    let blocks = get_blocks("> one\n> *two*");
    assert_eq!(
        child_kinds(&blocks[0]),
        vec![SyntaxKind::PARAGRAPH, SyntaxKind::PARAGRAPH]
    );
    let second = &blocks[0].children[1];
    assert_eq!(second.children[0].kind, SyntaxKind::EMPHASIS);
}

#[test]
fn blank_lines_stay_inside_quote() {
    let blocks = get_blocks("> a\n\n> b");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].children.len(), 2);
}

#[test]
fn bare_marker_adds_nothing() {
    let blocks = get_blocks(">\n> a");
    assert_eq!(blocks[0].children.len(), 1);
    assert_eq!(blocks[0].children[0].content_str(), "a");
}

#[test]
fn quote_followed_by_heading() {
    assert_block_kinds(
        "> a\n# H",
        &[SyntaxKind::BLOCKQUOTE, SyntaxKind::HEADING],
    );
}
