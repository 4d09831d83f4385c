//! Owned document tree nodes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::SyntaxKind;

/// A scalar attribute value attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

pub type Attrs = BTreeMap<String, AttrValue>;

/// A node of the document tree.
///
/// Leaf-like nodes carry `content`, containers carry `children`; paragraphs
/// keep both (their raw text and its inline parse). Only headings carry a
/// `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: SyntaxKind,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl Node {
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            content: None,
            attrs: Attrs::new(),
            level: None,
        }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::new(SyntaxKind::DOCUMENT).with_children(children)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(SyntaxKind::TEXT).with_content(content)
    }

    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        let mut node = Self::new(SyntaxKind::HEADING).with_content(content);
        node.level = Some(level.clamp(1, 6));
        node
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attrs.insert(key.to_string(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(AttrValue::as_str)
    }

    /// Reads a boolean attribute; missing or non-boolean values are `false`.
    pub fn attr_flag(&self, key: &str) -> bool {
        self.attrs
            .get(key)
            .and_then(AttrValue::as_bool)
            .unwrap_or(false)
    }

    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Concatenated text of this node: its content when it has children-free
    /// content, otherwise the text of its descendants.
    pub fn text_content(&self) -> String {
        if self.children.is_empty() {
            return self.content_str().to_string();
        }
        let mut out = String::new();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Depth-first, pre-order walk over this node and all its descendants.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn find_all(&self, kind: SyntaxKind) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }

    /// Checks the tree invariants: the root is `DOCUMENT`, `DOCUMENT` appears
    /// nowhere else, and `level` is present exactly on headings, within 1..=6.
    pub fn is_well_formed(&self) -> bool {
        self.kind == SyntaxKind::DOCUMENT
            && self.children.iter().all(|c| c.is_well_formed_below())
    }

    fn is_well_formed_below(&self) -> bool {
        if self.kind == SyntaxKind::DOCUMENT {
            return false;
        }
        let level_ok = match (self.kind, self.level) {
            (SyntaxKind::HEADING, Some(level)) => (1..=6).contains(&level),
            (SyntaxKind::HEADING, None) => false,
            (_, level) => level.is_none(),
        };
        level_ok && self.children.iter().all(|c| c.is_well_formed_below())
    }
}
