//! Wire types for the content delivery API
//!
//! Entries keep their `fields` as raw JSON until the content layer maps them;
//! linked assets are spliced inline first so consumers never see `Link` stubs,
//! matching what the official delivery clients do on the wire response.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// System metadata attached to entries, assets, and links.
#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "linkType", default)]
    pub link_type: Option<String>,
}

/// A single content entry. Field layout depends on the content type, so
/// `fields` stays dynamic here.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Value,
}

/// An uploaded media asset, as found in `includes` or spliced into a field.
///
/// Every part is optional on the wire; a link that was never resolved
/// deserializes to an asset with no file, which downstream renders as
/// nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetFile {
    pub url: String,
    #[serde(default)]
    pub details: Option<FileDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDetails {
    #[serde(default)]
    pub image: Option<ImageDimensions>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Linked resources delivered alongside the matching entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(rename = "Asset", default)]
    pub assets: Vec<Value>,
}

/// The collection envelope returned by the entries endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<Entry>,
    #[serde(default)]
    pub includes: Includes,
}

impl EntryCollection {
    /// Replace asset `Link` stubs inside entry fields with the full asset
    /// JSON from `includes`, so cover images and embedded rich-text assets
    /// carry their file metadata inline.
    ///
    /// Links whose target is not in `includes` are left as stubs; the
    /// renderer treats those as missing asset data.
    pub fn resolve_links(&mut self) {
        if self.includes.assets.is_empty() {
            return;
        }

        let by_id: HashMap<&str, &Value> = self
            .includes
            .assets
            .iter()
            .filter_map(|asset| {
                asset
                    .pointer("/sys/id")
                    .and_then(Value::as_str)
                    .map(|id| (id, asset))
            })
            .collect();

        for entry in &mut self.items {
            resolve_value(&mut entry.fields, &by_id);
        }
    }
}

fn resolve_value(value: &mut Value, assets: &HashMap<&str, &Value>) {
    if let Some(id) = asset_link_id(value) {
        if let Some(full) = assets.get(id.as_str()) {
            *value = (*full).clone();
        }
        // Unresolvable stubs stay in place; they have no children to walk.
        return;
    }

    match value {
        Value::Object(map) => {
            for child in map.values_mut() {
                resolve_value(child, assets);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                resolve_value(child, assets);
            }
        }
        _ => {}
    }
}

fn asset_link_id(value: &Value) -> Option<String> {
    let sys = value.get("sys")?;
    if sys.get("type")?.as_str()? != "Link" {
        return None;
    }
    if sys.get("linkType")?.as_str()? != "Asset" {
        return None;
    }
    Some(sys.get("id")?.as_str()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection_with_link() -> EntryCollection {
        serde_json::from_value(json!({
            "total": 1,
            "items": [{
                "sys": { "id": "post1", "type": "Entry" },
                "fields": {
                    "title": "Hello",
                    "coverImage": {
                        "sys": { "type": "Link", "linkType": "Asset", "id": "img1" }
                    }
                }
            }],
            "includes": {
                "Asset": [{
                    "sys": { "id": "img1", "type": "Asset" },
                    "fields": {
                        "title": "A cover",
                        "file": {
                            "url": "//images.ctfassets.net/x/cover.jpg",
                            "details": { "image": { "width": 800, "height": 400 } }
                        }
                    }
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_links_splices_assets() {
        let mut collection = collection_with_link();
        collection.resolve_links();

        let cover = &collection.items[0].fields["coverImage"];
        assert_eq!(cover["sys"]["type"], "Asset");
        assert_eq!(cover["fields"]["file"]["url"], "//images.ctfassets.net/x/cover.jpg");

        let asset: Asset = serde_json::from_value(cover.clone()).unwrap();
        let file = asset.fields.file.unwrap();
        let dims = file.details.unwrap().image.unwrap();
        assert_eq!((dims.width, dims.height), (800, 400));
    }

    #[test]
    fn test_unresolved_link_left_in_place() {
        let mut collection: EntryCollection = serde_json::from_value(json!({
            "items": [{
                "sys": { "id": "post1", "type": "Entry" },
                "fields": {
                    "coverImage": {
                        "sys": { "type": "Link", "linkType": "Asset", "id": "gone" }
                    }
                }
            }],
            "includes": { "Asset": [{ "sys": { "id": "img1", "type": "Asset" }, "fields": {} }] }
        }))
        .unwrap();
        collection.resolve_links();

        let cover = &collection.items[0].fields["coverImage"];
        assert_eq!(cover["sys"]["type"], "Link");

        // A stub still deserializes as an asset, just one with no file.
        let asset: Asset = serde_json::from_value(cover.clone()).unwrap();
        assert!(asset.fields.file.is_none());
    }

    #[test]
    fn test_links_resolved_at_depth() {
        let mut collection: EntryCollection = serde_json::from_value(json!({
            "items": [{
                "sys": { "id": "post1", "type": "Entry" },
                "fields": {
                    "content": {
                        "nodeType": "document",
                        "content": [{
                            "nodeType": "embedded-asset-block",
                            "data": {
                                "target": { "sys": { "type": "Link", "linkType": "Asset", "id": "img1" } }
                            },
                            "content": []
                        }]
                    }
                }
            }],
            "includes": {
                "Asset": [{
                    "sys": { "id": "img1", "type": "Asset" },
                    "fields": { "file": { "url": "//images.ctfassets.net/y/inline.png" } }
                }]
            }
        }))
        .unwrap();
        collection.resolve_links();

        let target = collection.items[0]
            .fields
            .pointer("/content/content/0/data/target")
            .unwrap();
        assert_eq!(target["sys"]["type"], "Asset");
        assert_eq!(target["fields"]["file"]["url"], "//images.ctfassets.net/y/inline.png");
    }

    #[test]
    fn test_empty_envelope_deserializes() {
        let collection: EntryCollection = serde_json::from_str(r#"{"total":0,"items":[]}"#).unwrap();
        assert_eq!(collection.total, 0);
        assert!(collection.items.is_empty());
        assert!(collection.includes.assets.is_empty());
    }
}
