//! Post retrieval with availability-first error handling
//!
//! Every public method degrades a failed query to an empty result so the
//! page always renders; the underlying failure is logged for operators
//! instead of being surfaced to the visitor.

use std::sync::Arc;

use serde_json::Value;

use crate::cms::{EntriesQuery, EntrySource, Error};
use crate::config::ImageSources;

use super::post::{Post, PostSummary};

/// Content type identifier of blog posts in the CMS.
pub const POST_CONTENT_TYPE: &str = "blogPost";

/// Fields the list view needs.
const SUMMARY_FIELDS: &[&str] = &["fields.title", "fields.slug", "fields.publicationDate"];

/// Newest post first.
const NEWEST_FIRST: &str = "-fields.publicationDate";

/// Depth at which linked assets ride along with a detail query.
const DETAIL_INCLUDE_DEPTH: u8 = 2;

/// Loads posts through any [`EntrySource`].
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn EntrySource>,
    images: ImageSources,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn EntrySource>, images: ImageSources) -> Self {
        Self { source, images }
    }

    /// All posts, newest first. A failed query logs and returns an empty
    /// list.
    pub async fn posts(&self) -> Vec<PostSummary> {
        match self.fetch_posts().await {
            Ok(posts) => posts,
            Err(err) => {
                tracing::error!("failed to fetch posts: {}", err);
                Vec::new()
            }
        }
    }

    /// One post by slug. Zero matches and a failed query both come back
    /// as `None`; only the failure is logged as an error.
    pub async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        match self.fetch_post_by_slug(slug).await {
            Ok(post) => post,
            Err(err) => {
                tracing::error!("failed to fetch post {:?}: {}", slug, err);
                None
            }
        }
    }

    /// Every known slug, for static generation and the sitemap. A failed
    /// query logs and returns an empty list.
    pub async fn slugs(&self) -> Vec<String> {
        match self.fetch_slugs().await {
            Ok(slugs) => slugs,
            Err(err) => {
                tracing::error!("failed to fetch slugs: {}", err);
                Vec::new()
            }
        }
    }

    async fn fetch_posts(&self) -> Result<Vec<PostSummary>, Error> {
        let query = EntriesQuery::new(POST_CONTENT_TYPE)
            .select(SUMMARY_FIELDS)
            .order(NEWEST_FIRST);
        let collection = self.source.entries(&query).await?;
        Ok(collection
            .items
            .iter()
            .filter_map(PostSummary::from_entry)
            .collect())
    }

    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<Post>, Error> {
        let query = EntriesQuery::new(POST_CONTENT_TYPE)
            .slug(slug)
            .limit(1)
            .include(DETAIL_INCLUDE_DEPTH);
        let collection = self.source.entries(&query).await?;
        Ok(collection
            .items
            .first()
            .and_then(|entry| Post::from_entry(entry, &self.images)))
    }

    async fn fetch_slugs(&self) -> Result<Vec<String>, Error> {
        let query = EntriesQuery::new(POST_CONTENT_TYPE).select(&["fields.slug"]);
        let collection = self.source.entries(&query).await?;
        Ok(collection
            .items
            .iter()
            .filter_map(|entry| entry.fields.get("slug").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::EntryCollection;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;

    /// An in-memory source that honors the slug filter the way the real
    /// delivery API does.
    struct FakeSource {
        entries: Vec<Value>,
        assets: Vec<Value>,
        fail: bool,
    }

    impl FakeSource {
        fn with_entries(entries: Vec<Value>) -> Self {
            Self {
                entries,
                assets: Vec::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                entries: Vec::new(),
                assets: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EntrySource for FakeSource {
        async fn entries(&self, query: &EntriesQuery) -> Result<EntryCollection, Error> {
            if self.fail {
                return Err(Error::Api {
                    status: StatusCode::BAD_GATEWAY,
                    body: "upstream unreachable".to_string(),
                });
            }
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
            let mut collection: EntryCollection = serde_json::from_value(json!({
                "total": items.len(),
                "items": items,
                "includes": {"Asset": self.assets}
            }))
            .unwrap();
            collection.resolve_links();
            Ok(collection)
        }
    }

    fn loader(source: FakeSource) -> ContentLoader {
        ContentLoader::new(Arc::new(source), ImageSources::default())
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

    fn second_entry() -> Value {
        json!({
            "sys": {"id": "e2", "type": "Entry"},
            "fields": {
                "title": "Second Post",
                "slug": "second-post",
                "publicationDate": "2024-02-10T12:00:00Z",
                "content": {"nodeType": "document", "content": []}
            }
        })
    }

    #[tokio::test]
    async fn test_posts_maps_every_entry() {
        let loader = loader(FakeSource::with_entries(vec![
            second_entry(),
            hello_world_entry(),
        ]));

        let posts = loader.posts().await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "second-post");
        assert_eq!(posts[1].slug, "hello-world");
    }

    #[tokio::test]
    async fn test_posts_on_failure_returns_empty() {
        let loader = loader(FakeSource::failing());
        assert!(loader.posts().await.is_empty());
    }

    #[tokio::test]
    async fn test_post_by_slug_returns_matching_post() {
        let loader = loader(FakeSource::with_entries(vec![
            second_entry(),
            hello_world_entry(),
        ]));

        let post = loader.post_by_slug("hello-world").await.unwrap();
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.display_date(), "1/1/2024");
        assert!(post.cover_image.is_none());
    }

    #[tokio::test]
    async fn test_post_by_slug_absent_returns_none() {
        let loader = loader(FakeSource::with_entries(vec![hello_world_entry()]));
        assert!(loader.post_by_slug("no-such-post").await.is_none());
    }

    #[tokio::test]
    async fn test_post_by_slug_on_failure_returns_none() {
        let loader = loader(FakeSource::failing());
        assert!(loader.post_by_slug("hello-world").await.is_none());
    }

    #[tokio::test]
    async fn test_every_enumerated_slug_resolves() {
        let loader = loader(FakeSource::with_entries(vec![
            hello_world_entry(),
            second_entry(),
        ]));

        let slugs = loader.slugs().await;
        assert_eq!(slugs, vec!["hello-world", "second-post"]);
        for slug in slugs {
            let post = loader.post_by_slug(&slug).await;
            assert_eq!(post.map(|post| post.slug), Some(slug));
        }
    }

    #[tokio::test]
    async fn test_slugs_on_failure_returns_empty() {
        let loader = loader(FakeSource::failing());
        assert!(loader.slugs().await.is_empty());
    }

    #[tokio::test]
    async fn test_post_with_linked_cover_is_resolved() {
        let entry = json!({
            "sys": {"id": "e3", "type": "Entry"},
            "fields": {
                "title": "Cover Story",
                "slug": "cover-story",
                "publicationDate": "2024-03-15T08:00:00Z",
                "content": {"nodeType": "document", "content": []},
                "coverImage": {
                    "sys": {"id": "a1", "type": "Link", "linkType": "Asset"}
                }
            }
        });
        let asset = json!({
            "sys": {"id": "a1", "type": "Asset"},
            "fields": {
                "title": "Skyline",
                "file": {
                    "url": "//images.ctfassets.net/space/a1/skyline.jpg",
                    "details": {"image": {"width": 1200, "height": 600}}
                }
            }
        });
        let loader = loader(FakeSource {
            entries: vec![entry],
            assets: vec![asset],
            fail: false,
        });

        let post = loader.post_by_slug("cover-story").await.unwrap();
        let cover = post.cover_image.unwrap();
        assert_eq!(cover.url, "https://images.ctfassets.net/space/a1/skyline.jpg");
        assert_eq!((cover.width, cover.height), (1200, 600));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_skipped_in_list() {
        let malformed = json!({
            "sys": {"id": "e9", "type": "Entry"},
            "fields": {"slug": "no-title"}
        });
        let loader = loader(FakeSource::with_entries(vec![
            malformed,
            hello_world_entry(),
        ]));

        let posts = loader.posts().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
    }
}
