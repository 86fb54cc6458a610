//! Configuration module

mod site;

pub use site::ConfigError;
pub use site::ImageSources;
pub use site::RevalidateConfig;
pub use site::SiteConfig;
pub use site::ACCESS_TOKEN_VAR;
pub use site::SPACE_ID_VAR;
