//! Site configuration (environment-driven)

use thiserror::Error;

/// Environment variable holding the CMS space identifier.
pub const SPACE_ID_VAR: &str = "CONTENTFUL_SPACE_ID";
/// Environment variable holding the CMS delivery access token.
pub const ACCESS_TOKEN_VAR: &str = "CONTENTFUL_ACCESS_TOKEN";

const ENVIRONMENT_VAR: &str = "CONTENTFUL_ENVIRONMENT";
const API_HOST_VAR: &str = "CONTENTFUL_API_HOST";
const SITE_URL_VAR: &str = "SITE_URL";
const SITE_TITLE_VAR: &str = "SITE_TITLE";
const REVALIDATE_LIST_VAR: &str = "REVALIDATE_LIST";
const REVALIDATE_POST_VAR: &str = "REVALIDATE_POST";
const IMAGE_HOSTS_VAR: &str = "ALLOWED_IMAGE_HOSTS";

/// Configuration errors. Missing credentials abort startup: there is no
/// degraded mode without access to the CMS.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Main site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    // CMS credentials and endpoint
    pub space_id: String,
    pub access_token: String,
    pub environment: String,
    pub api_host: String,

    // Site
    pub title: String,
    pub url: String,

    // Revalidation windows emitted as Cache-Control headers
    pub revalidate: RevalidateConfig,

    // Remote image sources the pages may reference
    pub image_sources: ImageSources,
}

impl SiteConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails if either CMS credential is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let space_id = require(&lookup, SPACE_ID_VAR)?;
        let access_token = require(&lookup, ACCESS_TOKEN_VAR)?;

        let defaults = RevalidateConfig::default();
        let revalidate = RevalidateConfig {
            list_secs: parse_secs(&lookup, REVALIDATE_LIST_VAR, defaults.list_secs)?,
            post_secs: parse_secs(&lookup, REVALIDATE_POST_VAR, defaults.post_secs)?,
        };

        let image_sources = match lookup(IMAGE_HOSTS_VAR) {
            Some(hosts) => ImageSources::new(
                hosts
                    .split(',')
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
                    .collect(),
            ),
            None => ImageSources::default(),
        };

        Ok(Self {
            space_id,
            access_token,
            environment: lookup(ENVIRONMENT_VAR).unwrap_or_else(|| "master".to_string()),
            api_host: lookup(API_HOST_VAR).unwrap_or_else(|| "cdn.contentful.com".to_string()),
            title: lookup(SITE_TITLE_VAR).unwrap_or_else(|| "My Blog".to_string()),
            url: lookup(SITE_URL_VAR).unwrap_or_else(|| "https://example.com".to_string()),
            revalidate,
            image_sources,
        })
    }
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
            name,
            value,
            reason: "expected a number of seconds".to_string(),
        }),
        None => Ok(default),
    }
}

/// Per-page revalidation windows, in seconds. The surrounding CDN enforces
/// these; this code only declares them.
#[derive(Debug, Clone, Copy)]
pub struct RevalidateConfig {
    pub list_secs: u64,
    pub post_secs: u64,
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            list_secs: 60,
            post_secs: 300,
        }
    }
}

/// Allow-list of remote hostnames images may be served from, HTTPS only.
#[derive(Debug, Clone)]
pub struct ImageSources {
    hosts: Vec<String>,
}

impl ImageSources {
    pub fn new(hosts: Vec<String>) -> Self {
        Self { hosts }
    }

    /// Check whether an absolute URL points at an allowed image source.
    pub fn allows(&self, url: &str) -> bool {
        match url::Url::parse(url) {
            Ok(parsed) => {
                parsed.scheme() == "https"
                    && parsed
                        .host_str()
                        .map(|host| self.hosts.iter().any(|h| h == host))
                        .unwrap_or(false)
            }
            Err(_) => false,
        }
    }
}

impl Default for ImageSources {
    fn default() -> Self {
        Self {
            hosts: vec![
                "images.ctfassets.net".to_string(),
                "downloads.ctfassets.net".to_string(),
            ],
        }
    }
}
