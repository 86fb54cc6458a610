//! Page rendering: template contexts and final HTML/XML output

use anyhow::Result;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{Post, PostSummary};
use crate::helpers::{absolute_url, xml_escape};
use crate::richtext::HtmlRenderer;
use crate::templates::{CoverData, PostItemData, PostPageData, TemplateRenderer};

/// Renders every page of the site. Shared by the dev server and the
/// static generator so both produce identical output.
pub struct Pages {
    templates: TemplateRenderer,
    body_renderer: HtmlRenderer,
    site_title: String,
    site_url: String,
}

impl Pages {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            templates: TemplateRenderer::new()?,
            body_renderer: HtmlRenderer::new(config.image_sources.clone()),
            site_title: config.title.clone(),
            site_url: config.url.clone(),
        })
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site_title", &self.site_title);
        context
    }

    pub fn home(&self) -> Result<String> {
        self.templates.render("home.html", &self.base_context())
    }

    pub fn about(&self) -> Result<String> {
        self.templates.render("about.html", &self.base_context())
    }

    /// The blog index. An empty list renders the page with its
    /// "No blog posts found." notice rather than an error.
    pub fn blog_index(&self, posts: &[PostSummary]) -> Result<String> {
        let items: Vec<PostItemData> = posts
            .iter()
            .map(|post| PostItemData {
                title: post.title.clone(),
                slug: post.slug.clone(),
                date: post.display_date(),
            })
            .collect();

        let mut context = self.base_context();
        context.insert("posts", &items);
        self.templates.render("blog.html", &context)
    }

    /// A post detail page with its rich-text body rendered to HTML.
    pub fn post(&self, post: &Post) -> Result<String> {
        let data = PostPageData {
            title: post.title.clone(),
            date: post.display_date(),
            cover: post.cover_image.as_ref().map(|cover| CoverData {
                url: cover.url.clone(),
                alt: cover.alt.clone(),
                width: cover.width,
                height: cover.height,
                caption: cover.caption.clone(),
            }),
            body: self.body_renderer.render(&post.content),
        };

        let mut context = self.base_context();
        context.insert("post", &data);
        self.templates.render("post.html", &context)
    }

    pub fn not_found(&self) -> Result<String> {
        self.templates.render("not_found.html", &self.base_context())
    }

    /// Sitemap covering every route the site serves.
    pub fn sitemap(&self, slugs: &[String]) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for path in ["/", "/about", "/blog"] {
            xml.push_str(&format!(
                "  <url><loc>{}</loc></url>\n",
                xml_escape(&absolute_url(&self.site_url, path))
            ));
        }
        for slug in slugs {
            let path = format!("/blog/{}", slug);
            xml.push_str(&format!(
                "  <url><loc>{}</loc></url>\n",
                xml_escape(&absolute_url(&self.site_url, &path))
            ));
        }

        xml.push_str("</urlset>\n");
        xml
    }
}
