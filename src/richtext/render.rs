//! HTML rendering for rich-text documents

use crate::cms::Asset;
use crate::config::ImageSources;
use crate::helpers::{ensure_https, html_escape};

use super::document::{Document, MarkKind, Node, NodeKind};

/// Alt text for embedded images whose asset carries no title.
const FALLBACK_ALT: &str = "Blog post image";

/// Marks open in this order around a text run and close in reverse.
const MARK_TAGS: &[(MarkKind, &str)] = &[
    (MarkKind::Bold, "strong"),
    (MarkKind::Italic, "em"),
    (MarkKind::Underline, "u"),
    (MarkKind::Code, "code"),
];

/// Pure recursive transform from a rich-text tree to an HTML fragment.
/// Rendering the same document twice yields byte-identical output.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    images: ImageSources,
}

impl HtmlRenderer {
    pub fn new(images: ImageSources) -> Self {
        Self { images }
    }

    /// Render a whole document body.
    pub fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        for node in &document.content {
            self.render_node(node, &mut out);
        }
        out
    }

    fn render_node(&self, node: &Node, out: &mut String) {
        match &node.kind {
            NodeKind::Paragraph => self.render_block(node, "p", out),
            NodeKind::Heading1 => self.render_block(node, "h1", out),
            NodeKind::Heading2 => self.render_block(node, "h2", out),
            NodeKind::Heading3 => self.render_block(node, "h3", out),
            NodeKind::OrderedList => self.render_block(node, "ol", out),
            NodeKind::UnorderedList => self.render_block(node, "ul", out),
            NodeKind::ListItem => self.render_block(node, "li", out),
            NodeKind::Blockquote => self.render_block(node, "blockquote", out),
            NodeKind::EmbeddedAsset => self.render_embedded_asset(node, out),
            NodeKind::Hyperlink => self.render_hyperlink(node, out),
            NodeKind::Text => self.render_text(node, out),
            // Kinds without a mapping keep their children visible.
            NodeKind::Document | NodeKind::Other(_) => self.render_children(node, out),
        }
    }

    fn render_children(&self, node: &Node, out: &mut String) {
        for child in &node.content {
            self.render_node(child, out);
        }
    }

    fn render_block(&self, node: &Node, tag: &str, out: &mut String) {
        out.push_str(&format!("<{}>", tag));
        self.render_children(node, out);
        out.push_str(&format!("</{}>", tag));
    }

    fn render_hyperlink(&self, node: &Node, out: &mut String) {
        let Some(uri) = &node.data.uri else {
            // A link without a destination degrades to its text.
            self.render_children(node, out);
            return;
        };
        out.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
            html_escape(uri)
        ));
        self.render_children(node, out);
        out.push_str("</a>");
    }

    fn render_text(&self, node: &Node, out: &mut String) {
        let mut open = Vec::new();
        for (kind, tag) in MARK_TAGS {
            if node.marks.iter().any(|mark| mark.kind == *kind) {
                out.push_str(&format!("<{}>", tag));
                open.push(*tag);
            }
        }
        out.push_str(&html_escape(&node.value));
        for tag in open.iter().rev() {
            out.push_str(&format!("</{}>", tag));
        }
    }

    /// An embedded asset renders only when the spliced payload carries a
    /// file URL from an allowed source; anything less renders nothing.
    fn render_embedded_asset(&self, node: &Node, out: &mut String) {
        let Some(target) = &node.data.target else {
            return;
        };
        let asset: Asset = match serde_json::from_value(target.clone()) {
            Ok(asset) => asset,
            Err(err) => {
                tracing::warn!("skipping embedded asset with malformed fields: {}", err);
                return;
            }
        };
        let Some(file) = &asset.fields.file else {
            return;
        };
        if file.url.is_empty() {
            return;
        }

        let url = ensure_https(&file.url);
        if !self.images.allows(&url) {
            tracing::warn!("skipping embedded image from disallowed source: {}", url);
            return;
        }

        let alt = asset.fields.title.as_deref().unwrap_or(FALLBACK_ALT);
        let dimensions = file
            .details
            .as_ref()
            .and_then(|details| details.image)
            .map(|image| format!(r#" width="{}" height="{}""#, image.width, image.height))
            .unwrap_or_default();

        out.push_str(&format!(
            r#"<figure class="embedded-asset"><img src="{}" alt="{}"{} loading="lazy">"#,
            html_escape(&url),
            html_escape(alt),
            dimensions
        ));
        if let Some(description) = &asset.fields.description {
            out.push_str(&format!(
                "<figcaption>{}</figcaption>",
                html_escape(description)
            ));
        }
        out.push_str("</figure>");
    }
}
