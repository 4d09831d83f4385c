use crate::parser::block_parser::tests::helpers::{assert_block_kinds, get_blocks, parse_blocks};
use crate::syntax::SyntaxKind;

#[test]
fn empty_input_is_empty_document() {
    let doc = parse_blocks("");
    assert_eq!(doc.kind, SyntaxKind::DOCUMENT);
    assert!(doc.children.is_empty());
}

#[test]
fn consecutive_lines_form_one_paragraph() {
    let blocks = get_blocks("first line\nsecond line\n\nnext");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].content_str(), "first line\nsecond line");
    assert_eq!(blocks[1].content_str(), "next");
}

#[test]
fn paragraph_children_are_inline_parsed() {
    let blocks = get_blocks("a [link](https://x.com)");
    let kinds: Vec<_> = blocks[0].children.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::TEXT, SyntaxKind::LINK]);
}

#[test]
fn headings_and_rules() {
    assert_block_kinds(
        "# One\ntext\n---\n###### Six",
        &[
            SyntaxKind::HEADING,
            SyntaxKind::PARAGRAPH,
            SyntaxKind::HORIZONTAL_RULE,
            SyntaxKind::HEADING,
        ],
    );
    let blocks = get_blocks("###### Six");
    assert_eq!(blocks[0].level, Some(6));
    assert_eq!(blocks[0].content_str(), "Six");
}

#[test]
fn seven_hashes_is_a_paragraph() {
    assert_block_kinds("####### no", &[SyntaxKind::PARAGRAPH]);
}

#[test]
fn unclosed_markup_never_fails() {
    let doc = parse_blocks("**open *and `tick [link](\n> \n- \n```");
    assert!(doc.is_well_formed());
}
