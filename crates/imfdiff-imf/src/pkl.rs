//! Packing list (SMPTE ST 2067-2 / ST 429-8) and asset map readers.
//!
//! The packing list names the assets of a delivery; the asset map says where each
//! one lives in the package directory. Together they resolve a track file ID to a
//! file name.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::xml::{child, child_text, children, expect_root, parse_number, parse_uuid, required_text};

/// Root element local name of a packing list.
pub const PKL_ROOT_ELEMENT: &str = "PackingList";
/// Root element local name of an asset map.
pub const ASSETMAP_ROOT_ELEMENT: &str = "AssetMap";

/// Metadata of a packaged asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    /// File name, relative to the package root when known from the asset map
    pub file_name: String,
    pub size: Option<u64>,
    /// MIME type from the packing list
    pub asset_type: Option<String>,
}

impl Asset {
    /// File name without directories or the final extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.file_name.as_str())
    }
}

/// Assets of a delivery, keyed by asset ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingList {
    /// IDs of the packing list documents merged into this list
    pub ids: Vec<Uuid>,
    assets: HashMap<Uuid, Asset>,
}

impl PackingList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an asset. A miss means the asset is not part of this delivery.
    pub fn get_asset(&self, id: &Uuid) -> Option<&Asset> {
        self.assets.get(id)
    }

    /// Add or replace an asset.
    pub fn insert(&mut self, asset: Asset) {
        self.assets.insert(asset.id, asset);
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Merge another packing list into this one.
    pub fn merge(&mut self, other: PackingList) {
        self.ids.extend(other.ids);
        self.assets.extend(other.assets);
    }

    /// Apply asset map paths. Mapped paths take precedence over original file
    /// names; assets only present in the map are added.
    pub fn apply_asset_map(&mut self, entries: Vec<AssetMapEntry>) {
        for entry in entries {
            match self.assets.entry(entry.id) {
                Entry::Occupied(mut asset) => asset.get_mut().file_name = entry.path,
                Entry::Vacant(slot) => {
                    slot.insert(Asset {
                        id: entry.id,
                        file_name: entry.path,
                        size: None,
                        asset_type: None,
                    });
                }
            }
        }
    }
}

/// Location of one asset in the package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMapEntry {
    pub id: Uuid,
    pub path: String,
}

/// Parse a packing list from XML text.
pub fn parse_packing_list(xml: &str) -> Result<PackingList> {
    let doc = Document::parse(xml)?;
    read_packing_list(&doc)
}

/// Parse an asset map from XML text.
pub fn parse_asset_map(xml: &str) -> Result<Vec<AssetMapEntry>> {
    let doc = Document::parse(xml)?;
    read_asset_map(&doc)
}

pub(crate) fn read_packing_list(doc: &Document<'_>) -> Result<PackingList> {
    let root = doc.root_element();
    expect_root(root, PKL_ROOT_ELEMENT)?;

    let id = parse_uuid(required_text(root, "Id", PKL_ROOT_ELEMENT)?, "Id")?;
    let mut list = PackingList {
        ids: vec![id],
        assets: HashMap::new(),
    };

    if let Some(asset_list) = child(root, "AssetList") {
        for node in children(asset_list, "Asset") {
            list.insert(read_pkl_asset(node)?);
        }
    }

    debug!(%id, assets = list.len(), "Parsed packing list");
    Ok(list)
}

fn read_pkl_asset(node: Node<'_, '_>) -> Result<Asset> {
    let id = parse_uuid(required_text(node, "Id", "Asset")?, "Id")?;
    let size = child_text(node, "Size")
        .map(|v| parse_number::<u64>(v, "Size"))
        .transpose()?;
    let file_name = match child_text(node, "OriginalFileName") {
        Some(name) => name.to_string(),
        None => {
            debug!(%id, "Asset has no original file name");
            id.to_string()
        }
    };

    Ok(Asset {
        id,
        file_name,
        size,
        asset_type: child_text(node, "Type").map(str::to_string),
    })
}

pub(crate) fn read_asset_map(doc: &Document<'_>) -> Result<Vec<AssetMapEntry>> {
    let root = doc.root_element();
    expect_root(root, ASSETMAP_ROOT_ELEMENT)?;

    let mut entries = Vec::new();
    let Some(asset_list) = child(root, "AssetList") else {
        return Ok(entries);
    };

    for node in children(asset_list, "Asset") {
        let id = parse_uuid(required_text(node, "Id", "Asset")?, "Id")?;
        let path = child(node, "ChunkList")
            .and_then(|chunks| child(chunks, "Chunk"))
            .and_then(|chunk| child_text(chunk, "Path"));
        match path {
            Some(path) => entries.push(AssetMapEntry {
                id,
                path: path.to_string(),
            }),
            None => debug!(%id, "Asset map entry has no chunk path"),
        }
    }

    Ok(entries)
}
