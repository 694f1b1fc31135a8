//! IMF package discovery.
//!
//! A package is a directory holding a composition playlist, one or more packing
//! lists and usually an asset map. Documents are recognized by their root element,
//! not by file name.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;
use tracing::{debug, info, warn};

use crate::cpl::{self, read_composition};
use crate::error::{ImfError, Result};
use crate::model::{Composition, Resource};
use crate::pkl::{self, read_asset_map, read_packing_list, Asset, PackingList};
use crate::timeline::Timeline;

/// A loaded IMF package: one composition and the assets it can resolve.
#[derive(Debug, Clone)]
pub struct ImfPackage {
    root: PathBuf,
    cpl_path: Option<PathBuf>,
    composition: Composition,
    packing_list: PackingList,
}

impl ImfPackage {
    /// Assemble a package from already parsed parts.
    pub fn new(root: impl Into<PathBuf>, composition: Composition, packing_list: PackingList) -> Self {
        Self {
            root: root.into(),
            cpl_path: None,
            composition,
            packing_list,
        }
    }

    /// Load the package in directory `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref();
        if !root.is_dir() {
            return Err(ImfError::NotADirectory(root.to_path_buf()));
        }
        info!(path = %root.display(), "Opening IMF package");

        let mut compositions: Vec<(PathBuf, Composition)> = Vec::new();
        let mut packing_list = PackingList::new();
        let mut asset_map = Vec::new();

        for file in candidate_documents(root)? {
            let text = fs::read_to_string(&file).map_err(|source| ImfError::Io {
                path: file.clone(),
                source,
            })?;
            let doc = Document::parse(&text).map_err(|e| ImfError::from(e).in_document(&file))?;

            match doc.root_element().tag_name().name() {
                cpl::ROOT_ELEMENT => {
                    let composition =
                        read_composition(&doc).map_err(|e| e.in_document(&file))?;
                    compositions.push((file, composition));
                }
                pkl::PKL_ROOT_ELEMENT => {
                    packing_list.merge(read_packing_list(&doc).map_err(|e| e.in_document(&file))?);
                }
                pkl::ASSETMAP_ROOT_ELEMENT => {
                    asset_map.extend(read_asset_map(&doc).map_err(|e| e.in_document(&file))?);
                }
                other => debug!(file = %file.display(), root = other, "Ignoring XML document"),
            }
        }

        if compositions.len() > 1 {
            warn!(
                count = compositions.len(),
                chosen = %compositions[0].0.display(),
                "Package holds several composition playlists, using the first"
            );
        }
        let Some((cpl_path, composition)) = compositions.into_iter().next() else {
            return Err(ImfError::NoCompositionPlaylist(root.to_path_buf()));
        };

        packing_list.apply_asset_map(asset_map);

        info!(
            title = %composition.title,
            segments = composition.segments.len(),
            resources = composition.resource_count(),
            assets = packing_list.len(),
            "IMF package loaded"
        );

        Ok(Self {
            root: root.to_path_buf(),
            cpl_path: Some(cpl_path),
            composition,
            packing_list,
        })
    }

    /// Package directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Composition playlist file, when loaded from disk.
    pub fn cpl_path(&self) -> Option<&Path> {
        self.cpl_path.as_deref()
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn packing_list(&self) -> &PackingList {
        &self.packing_list
    }

    /// Content title of the composition.
    pub fn title(&self) -> &str {
        &self.composition.title
    }

    /// Resolve the track file of a resource. `None` for external references.
    pub fn asset_for(&self, resource: &Resource) -> Option<&Asset> {
        self.packing_list.get_asset(&resource.file_id)
    }

    /// Record timeline of the composition.
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::build(self)
    }
}

/// XML files directly inside `dir`, plus an extension-less `ASSETMAP`, sorted by name.
fn candidate_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| ImfError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }
        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        let is_interop_map = path.file_name().and_then(|n| n.to_str()) == Some("ASSETMAP");
        if is_xml || is_interop_map {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
