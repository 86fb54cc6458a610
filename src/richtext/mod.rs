//! Rich-text document model and HTML rendering

pub mod document;
pub mod render;

pub use document::{Document, Mark, MarkKind, Node, NodeData, NodeKind};
pub use render::HtmlRenderer;
