//! Node kinds of the markdown document tree.

use serde::{Deserialize, Serialize};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    // Root
    DOCUMENT,

    // Blocks
    HEADING,
    PARAGRAPH,
    BLOCKQUOTE,
    LIST,
    LIST_ITEM,
    CODE_BLOCK,
    HORIZONTAL_RULE,
    TABLE,
    TABLE_ROW,
    TABLE_CELL,
    CUSTOM_BLOCK, // plugin-defined block, discriminated by attrs.type

    // Inlines
    INLINE_CODE,
    EMPHASIS,
    STRONG,
    LINK,
    IMAGE,
    TEXT,
    CUSTOM_INLINE, // plugin-defined inline, discriminated by attrs.type
}

impl SyntaxKind {
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            SyntaxKind::INLINE_CODE
                | SyntaxKind::EMPHASIS
                | SyntaxKind::STRONG
                | SyntaxKind::LINK
                | SyntaxKind::IMAGE
                | SyntaxKind::TEXT
                | SyntaxKind::CUSTOM_INLINE
        )
    }

    pub fn is_block(self) -> bool {
        !self.is_inline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_as_their_names() {
        let json = serde_json::to_string(&SyntaxKind::LIST_ITEM).unwrap();
        assert_eq!(json, "\"LIST_ITEM\"");
        let kind: SyntaxKind = serde_json::from_str("\"CUSTOM_INLINE\"").unwrap();
        assert_eq!(kind, SyntaxKind::CUSTOM_INLINE);
    }

    #[test]
    fn inline_and_block_partition() {
        assert!(SyntaxKind::STRONG.is_inline());
        assert!(SyntaxKind::TABLE_CELL.is_block());
        assert!(!SyntaxKind::DOCUMENT.is_inline());
    }
}
