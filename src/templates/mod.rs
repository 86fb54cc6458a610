//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary so the server and
//! the static generator ship as a single executable.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded site theme.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with all site templates loaded. Autoescaping
    /// stays on; the only pre-rendered HTML (the post body) is marked
    /// safe inside the template itself.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with the given context.
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PostItemData {
    pub title: String,
    pub slug: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverData {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub date: String,
    pub cover: Option<CoverData>,
    pub body: String,
}
