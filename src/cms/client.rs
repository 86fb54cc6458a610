//! HTTP client for the content delivery API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use super::types::EntryCollection;
use crate::config::SiteConfig;

/// Errors on the query path. Retrieval callers log these and degrade; they
/// are never surfaced to a page.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("query rejected with status {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// Parameters for the single "query entries" operation the CMS exposes to
/// this site.
#[derive(Debug, Clone, Default)]
pub struct EntriesQuery {
    content_type: String,
    slug: Option<String>,
    select: Option<String>,
    order: Option<String>,
    limit: Option<u32>,
    include: Option<u8>,
}

impl EntriesQuery {
    /// Start a query for entries of one content type.
    pub fn new(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            ..Default::default()
        }
    }

    /// Exact-match filter on the entry's slug field.
    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.to_string());
        self
    }

    /// Project only the named fields.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select = Some(fields.join(","));
        self
    }

    /// Server-side ordering, e.g. `-fields.publicationDate`.
    pub fn order(mut self, order: &str) -> Self {
        self.order = Some(order.to_string());
        self
    }

    /// Cap the number of returned entries.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resolve linked references up to `depth` hops and ship them inline.
    pub fn include(mut self, depth: u8) -> Self {
        self.include = Some(depth);
        self
    }

    /// Render the query as request parameters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("content_type", self.content_type.clone())];
        if let Some(slug) = &self.slug {
            params.push(("fields.slug", slug.clone()));
        }
        if let Some(select) = &self.select {
            params.push(("select", select.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("order", order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(include) = self.include {
            params.push(("include", include.to_string()));
        }
        params
    }
}

/// The seam between retrieval and the remote CMS. The production
/// implementation is [`CmsClient`]; tests substitute fakes.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Run one entries query, returning the matching collection in server
    /// order (possibly empty) or the underlying failure.
    async fn entries(&self, query: &EntriesQuery) -> Result<EntryCollection, Error>;
}

/// Client for the CMS content delivery API.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    entries_url: String,
    access_token: String,
}

impl CmsClient {
    /// Build a client from site configuration. The credentials themselves
    /// were already validated at config load.
    pub fn new(config: &SiteConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .timeout(Duration::from_secs(10))
            .build()?;

        let entries_url = format!(
            "https://{}/spaces/{}/environments/{}/entries",
            config.api_host, config.space_id, config.environment
        );

        Ok(Self {
            http,
            entries_url,
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl EntrySource for CmsClient {
    async fn entries(&self, query: &EntriesQuery) -> Result<EntryCollection, Error> {
        let response = self
            .http
            .get(&self.entries_url)
            .bearer_auth(&self.access_token)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let mut collection: EntryCollection = response.json().await?;
        collection.resolve_links();
        Ok(collection)
    }
}
