use crate::parser::block_parser::tests::helpers::{assert_block_kinds, child_kinds, get_blocks};
use crate::syntax::SyntaxKind;

#[test]
fn bullet_list() {
    let blocks = get_blocks("- a\n* b\n+ c");
    assert_eq!(blocks.len(), 1);
    let list = &blocks[0];
    assert_eq!(list.kind, SyntaxKind::LIST);
    assert!(!list.attr_flag("ordered"));
    assert_eq!(child_kinds(list), vec![SyntaxKind::LIST_ITEM; 3]);
    assert_eq!(list.children[2].content_str(), "c");
}

#[test]
fn ordered_list() {
    let blocks = get_blocks("1. first\n2. **second**");
    let list = &blocks[0];
    assert!(list.attr_flag("ordered"));
    assert_eq!(list.children[1].content_str(), "**second**");
    assert_eq!(list.children[1].children[0].kind, SyntaxKind::STRONG);
}

#[test]
fn blank_lines_between_items_keep_one_list() {
    let blocks = get_blocks("- a\n\n- b");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].children.len(), 2);
}

#[test]
fn plain_line_ends_list() {
    assert_block_kinds(
        "- a\nafter",
        &[SyntaxKind::LIST, SyntaxKind::PARAGRAPH],
    );
}

#[test]
fn task_markers_stay_in_content() {
    let blocks = get_blocks("- [x] done");
    assert_eq!(blocks[0].children[0].content_str(), "[x] done");
}
