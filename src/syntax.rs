//! The document tree produced by the parsers and consumed by transforms and renderers.

mod kind;
mod node;
mod slug;
pub mod utils;

pub use kind::SyntaxKind;
pub use node::{AttrValue, Attrs, Node};
pub use slug::{generate_id, slugify};
