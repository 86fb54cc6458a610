//! Headless CMS access: wire types and the delivery-API client

pub mod client;
pub mod types;

pub use client::{CmsClient, EntriesQuery, EntrySource, Error};
pub use types::{Asset, AssetFields, AssetFile, Entry, EntryCollection, ImageDimensions};
