use crate::parser::block_parser::BlockParser;
use crate::syntax::{Node, SyntaxKind};

pub fn parse_blocks(input: &str) -> Node {
    BlockParser::new(input).parse()
}

pub fn get_blocks(input: &str) -> Vec<Node> {
    parse_blocks(input).children
}

pub fn assert_block_kinds(input: &str, expected: &[SyntaxKind]) {
    let blocks = get_blocks(input);
    let actual: Vec<_> = blocks.iter().map(|n| n.kind).collect();
    assert_eq!(
        actual, expected,
        "Block kinds did not match for input:\n{}",
        input
    );
}

/// Kinds of the direct children of `node`.
pub fn child_kinds(node: &Node) -> Vec<SyntaxKind> {
    node.children.iter().map(|n| n.kind).collect()
}
