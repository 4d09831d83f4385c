//! Plain text projection of the document tree.

use crate::syntax::Node;

use super::NodeOverride;

pub struct TextRenderer<'a> {
    overrides: &'a dyn NodeOverride,
}

impl<'a> TextRenderer<'a> {
    pub fn new(overrides: &'a dyn NodeOverride) -> Self {
        Self { overrides }
    }

    /// A node with non-empty content yields that content; otherwise its
    /// children's renderings joined by single spaces. Empty child renderings
    /// are dropped before the join, so no doubled spaces appear.
    pub fn render(&self, node: &Node) -> String {
        if let Some(output) = self.overrides.render_node(node) {
            return output.into_text();
        }

        let content = node.content_str();
        if !content.is_empty() {
            return content.to_string();
        }

        node.children
            .iter()
            .map(|child| self.render(child))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::renderer::NoOverride;
    use crate::syntax::SyntaxKind;

    fn text(input: &str) -> String {
        TextRenderer::new(&NoOverride).render(&parse(input))
    }

    #[test]
    fn blocks_join_with_spaces() {
        assert_eq!(text("# Title\n\nbody"), "Title body");
    }

    #[test]
    fn content_wins_over_children() {
        assert_eq!(text("some **bold**"), "some **bold**");
    }

    #[test]
    fn empty_nodes_are_skipped() {
        let doc = Node::document(vec![
            Node::new(SyntaxKind::HORIZONTAL_RULE),
            Node::new(SyntaxKind::LIST).with_children(vec![
                Node::new(SyntaxKind::LIST_ITEM).with_content("a"),
                Node::new(SyntaxKind::LIST_ITEM).with_content(""),
                Node::new(SyntaxKind::LIST_ITEM).with_content("b"),
            ]),
        ]);
        assert_eq!(TextRenderer::new(&NoOverride).render(&doc), "a b");
    }

    #[test]
    fn empty_document_is_empty_string() {
        assert_eq!(text(""), "");
    }
}
