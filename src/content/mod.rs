//! Blog content: domain types and retrieval

pub mod loader;
pub mod post;

pub use loader::{ContentLoader, POST_CONTENT_TYPE};
pub use post::{CoverImage, Post, PostSummary};
