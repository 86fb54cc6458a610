//! marquee: a small marketing site and blog backed by a headless CMS
//!
//! Posts live in a remote content-management service and are fetched over
//! its delivery API at request time; this crate renders them with Tera
//! templates, serves them over HTTP and can pre-generate the whole site
//! as static files.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod pages;
pub mod richtext;
pub mod server;
pub mod templates;

use std::sync::Arc;

use anyhow::Result;

use cms::{CmsClient, EntrySource};
use config::SiteConfig;
use content::ContentLoader;
use pages::Pages;

/// The main application: configuration, content retrieval and page
/// rendering wired together.
pub struct Marquee {
    pub config: SiteConfig,
    pub loader: ContentLoader,
    pub pages: Pages,
}

impl Marquee {
    /// Create an application talking to the real CMS.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let client = CmsClient::new(&config)?;
        Self::with_source(config, Arc::new(client))
    }

    /// Create an application over any entry source. Tests pass a fake
    /// source here; everything downstream is identical.
    pub fn with_source(config: SiteConfig, source: Arc<dyn EntrySource>) -> Result<Self> {
        let loader = ContentLoader::new(source, config.image_sources.clone());
        let pages = Pages::new(&config)?;
        Ok(Self {
            config,
            loader,
            pages,
        })
    }
}
