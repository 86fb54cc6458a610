//! Generate the whole site as static files

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Marquee;

/// Render every page to `out_dir`.
///
/// The layout mirrors the served routes: `index.html`, `about/index.html`,
/// `blog/index.html`, one `blog/{slug}/index.html` per post, plus
/// `404.html` and `sitemap.xml`. A slug that no longer resolves to a post
/// is skipped with a warning rather than failing the run.
pub async fn run(app: &Marquee, out_dir: &Path) -> Result<()> {
    let start = std::time::Instant::now();

    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join("index.html"), app.pages.home()?)?;

    let about_dir = out_dir.join("about");
    fs::create_dir_all(&about_dir)?;
    fs::write(about_dir.join("index.html"), app.pages.about()?)?;

    let posts = app.loader.posts().await;
    let blog_dir = out_dir.join("blog");
    fs::create_dir_all(&blog_dir)?;
    fs::write(blog_dir.join("index.html"), app.pages.blog_index(&posts)?)?;

    let slugs = app.loader.slugs().await;
    let mut generated = 0;
    for slug in &slugs {
        match app.loader.post_by_slug(slug).await {
            Some(post) => {
                let post_dir = blog_dir.join(slug);
                fs::create_dir_all(&post_dir)?;
                fs::write(post_dir.join("index.html"), app.pages.post(&post)?)?;
                generated += 1;
            }
            None => {
                tracing::warn!("Slug {:?} did not resolve to a post, skipping", slug);
            }
        }
    }

    fs::write(out_dir.join("404.html"), app.pages.not_found()?)?;
    fs::write(out_dir.join("sitemap.xml"), app.pages.sitemap(&slugs))?;

    tracing::info!(
        "Generated {} post pages in {:?} -> {:?}",
        generated,
        start.elapsed(),
        out_dir
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{EntriesQuery, EntryCollection, EntrySource, Error};
    use crate::config::SiteConfig;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FakeSource {
        entries: Vec<Value>,
    }

    #[async_trait]
    impl EntrySource for FakeSource {
        async fn entries(&self, query: &EntriesQuery) -> Result<EntryCollection, Error> {
            let params = query.to_params();
            let slug = params
                .iter()
                .find(|(name, _)| *name == "fields.slug")
                .map(|(_, value)| value.clone());
            let items: Vec<Value> = self
                .entries
                .iter()
                .filter(|entry| match &slug {
                    Some(slug) => entry["fields"]["slug"] == slug.as_str(),
                    None => true,
                })
                .cloned()
                .collect();
            Ok(serde_json::from_value(json!({
                "total": items.len(),
                "items": items,
                "includes": {}
            }))
            .unwrap())
        }
    }

    fn test_app(entries: Vec<Value>) -> Marquee {
        let vars: HashMap<&str, &str> = [
            (crate::config::SPACE_ID_VAR, "space"),
            (crate::config::ACCESS_TOKEN_VAR, "token"),
            ("SITE_URL", "https://blog.example.com"),
        ]
        .into_iter()
        .collect();
        let config = SiteConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        Marquee::with_source(config, Arc::new(FakeSource { entries })).unwrap()
    }

    fn hello_world_entry() -> Value {
        json!({
            "sys": {"id": "e1", "type": "Entry"},
            "fields": {
                "title": "Hello World",
                "slug": "hello-world",
                "publicationDate": "2024-01-01T00:00:00Z",
                "content": {
                    "nodeType": "document",
                    "content": [
                        {"nodeType": "paragraph", "content": [
                            {"nodeType": "text", "value": "First post.", "marks": [], "data": {}}
                        ]}
                    ]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_generates_full_site() {
        let app = test_app(vec![hello_world_entry()]);
        let out = tempfile::tempdir().unwrap();

        run(&app, out.path()).await.unwrap();

        let home = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(home.contains("Welcome to My Blog"));

        let about = fs::read_to_string(out.path().join("about/index.html")).unwrap();
        assert!(about.contains("About Me"));

        let blog = fs::read_to_string(out.path().join("blog/index.html")).unwrap();
        assert!(blog.contains(r#"<a href="/blog/hello-world">Hello World</a>"#));

        let post = fs::read_to_string(out.path().join("blog/hello-world/index.html")).unwrap();
        assert!(post.contains("<h1>Hello World</h1>"));
        assert!(post.contains("Published on: 1/1/2024"));

        let not_found = fs::read_to_string(out.path().join("404.html")).unwrap();
        assert!(not_found.contains("This page could not be found."));

        let sitemap = fs::read_to_string(out.path().join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://blog.example.com/blog/hello-world</loc>"));
    }

    #[tokio::test]
    async fn test_empty_store_still_generates_pages() {
        let app = test_app(vec![]);
        let out = tempfile::tempdir().unwrap();

        run(&app, out.path()).await.unwrap();

        let blog = fs::read_to_string(out.path().join("blog/index.html")).unwrap();
        assert!(blog.contains("No blog posts found."));
        assert!(out.path().join("sitemap.xml").exists());
    }
}
