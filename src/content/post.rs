//! Blog post domain types mapped from CMS entries

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::cms::{Asset, Entry};
use crate::config::ImageSources;
use crate::helpers::{display_date, ensure_https, parse_publication_date};
use crate::richtext::Document;

/// Dimensions assumed for a cover image whose asset carries none.
const DEFAULT_COVER_WIDTH: u32 = 800;
const DEFAULT_COVER_HEIGHT: u32 = 400;

/// The fields every view of a post needs.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
}

impl PostSummary {
    /// Map one CMS entry. Entries missing required fields or carrying an
    /// unparseable date are dropped with a warning.
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        let fields: SummaryFields = match serde_json::from_value(entry.fields.clone()) {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(
                    "skipping entry {} with malformed fields: {}",
                    entry.sys.id,
                    err
                );
                return None;
            }
        };
        let published_at = match parse_publication_date(&fields.publication_date) {
            Some(date) => date,
            None => {
                tracing::warn!(
                    "skipping entry {} with unparseable publicationDate {:?}",
                    entry.sys.id,
                    fields.publication_date
                );
                return None;
            }
        };
        Some(Self {
            id: entry.sys.id.clone(),
            title: fields.title,
            slug: fields.slug,
            published_at,
        })
    }

    /// Publication date in the locale-short form shown on every page.
    pub fn display_date(&self) -> String {
        display_date(&self.published_at)
    }
}

#[derive(Debug, Deserialize)]
struct SummaryFields {
    title: String,
    slug: String,
    #[serde(rename = "publicationDate")]
    publication_date: String,
}

/// A fully loaded post for the detail page.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
    pub content: Document,
    pub cover_image: Option<CoverImage>,
}

impl Post {
    /// Map one CMS entry with its content and cover image. A post without
    /// a cover image is perfectly valid; a malformed content document
    /// degrades to an empty body rather than failing the page.
    pub fn from_entry(entry: &Entry, images: &ImageSources) -> Option<Self> {
        let fields: PostFields = match serde_json::from_value(entry.fields.clone()) {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(
                    "skipping entry {} with malformed fields: {}",
                    entry.sys.id,
                    err
                );
                return None;
            }
        };
        let published_at = match parse_publication_date(&fields.publication_date) {
            Some(date) => date,
            None => {
                tracing::warn!(
                    "skipping entry {} with unparseable publicationDate {:?}",
                    entry.sys.id,
                    fields.publication_date
                );
                return None;
            }
        };

        let content = if fields.content.is_null() {
            Document::default()
        } else {
            match serde_json::from_value(fields.content) {
                Ok(document) => document,
                Err(err) => {
                    tracing::warn!(
                        "entry {} carries a malformed content document: {}",
                        entry.sys.id,
                        err
                    );
                    Document::default()
                }
            }
        };

        let cover_image = fields
            .cover_image
            .as_ref()
            .and_then(|asset| CoverImage::from_asset(asset, images, &fields.title));

        Some(Self {
            id: entry.sys.id.clone(),
            title: fields.title,
            slug: fields.slug,
            published_at,
            content,
            cover_image,
        })
    }

    pub fn display_date(&self) -> String {
        display_date(&self.published_at)
    }
}

#[derive(Debug, Deserialize)]
struct PostFields {
    title: String,
    slug: String,
    #[serde(rename = "publicationDate")]
    publication_date: String,
    #[serde(default)]
    content: serde_json::Value,
    #[serde(rename = "coverImage", default)]
    cover_image: Option<Asset>,
}

/// A cover image ready for the template: absolute HTTPS URL from an
/// allowed source, alt text and dimensions already decided.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
}

impl CoverImage {
    /// Build from a resolved asset. Returns `None` when the asset has no
    /// file URL (an unresolved link stub) or points at a host outside the
    /// allow list; the page then renders without a cover.
    pub fn from_asset(asset: &Asset, images: &ImageSources, post_title: &str) -> Option<Self> {
        let file = asset.fields.file.as_ref()?;
        if file.url.is_empty() {
            return None;
        }

        let url = ensure_https(&file.url);
        if !images.allows(&url) {
            tracing::warn!("skipping cover image from disallowed source: {}", url);
            return None;
        }

        let dimensions = file.details.as_ref().and_then(|details| details.image);
        let alt = asset
            .fields
            .title
            .clone()
            .unwrap_or_else(|| post_title.to_string());

        Some(Self {
            url,
            alt,
            width: dimensions.map_or(DEFAULT_COVER_WIDTH, |image| image.width),
            height: dimensions.map_or(DEFAULT_COVER_HEIGHT, |image| image.height),
            caption: asset.fields.description.clone(),
        })
    }
}
