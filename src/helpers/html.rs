//! HTML helper functions

/// Escape HTML special characters
///
/// Used for both text content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape a string for use inside an XML text node (sitemap output).
pub fn xml_escape(s: &str) -> String {
    html_escape(s)
}
