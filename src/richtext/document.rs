//! Rich-text document tree as shipped by the CMS

use serde::Deserialize;
use serde_json::Value;

/// Block, inline and text node kinds. Kinds this site does not style keep
/// their raw name in `Other` so the renderer can pass their children
/// through.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    OrderedList,
    UnorderedList,
    ListItem,
    Blockquote,
    EmbeddedAsset,
    Hyperlink,
    Text,
    Other(String),
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "document" => NodeKind::Document,
            "paragraph" => NodeKind::Paragraph,
            "heading-1" => NodeKind::Heading1,
            "heading-2" => NodeKind::Heading2,
            "heading-3" => NodeKind::Heading3,
            "ordered-list" => NodeKind::OrderedList,
            "unordered-list" => NodeKind::UnorderedList,
            "list-item" => NodeKind::ListItem,
            "blockquote" => NodeKind::Blockquote,
            "embedded-asset-block" => NodeKind::EmbeddedAsset,
            "hyperlink" => NodeKind::Hyperlink,
            "text" => NodeKind::Text,
            _ => NodeKind::Other(raw),
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Other(String::new())
    }
}

/// Text decorations. Unknown marks are carried but never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Code,
    Other(String),
}

impl From<String> for MarkKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "bold" => MarkKind::Bold,
            "italic" => MarkKind::Italic,
            "underline" => MarkKind::Underline,
            "code" => MarkKind::Code,
            _ => MarkKind::Other(raw),
        }
    }
}

impl Default for MarkKind {
    fn default() -> Self {
        MarkKind::Other(String::new())
    }
}

/// A mark attached to a text run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
}

/// Node payload. `uri` is set on hyperlinks; `target` holds the linked
/// entity on embedded blocks, spliced inline during link resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeData {
    pub uri: Option<String>,
    pub target: Option<Value>,
}

/// One node of the rich-text tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(rename = "nodeType")]
    pub kind: NodeKind,
    pub data: NodeData,
    pub marks: Vec<Mark>,
    pub value: String,
    pub content: Vec<Node>,
}

/// The document root. Every field arrives from the wire as JSON; a post
/// whose content fails to parse gets an empty document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    pub content: Vec<Node>,
}
