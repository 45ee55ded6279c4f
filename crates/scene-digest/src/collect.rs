//! Scene asset collection
//!
//! Walks a scene directory and selects the files that make up the
//! renderable scene: descriptions, materials, geometry, volumes, meshes
//! and textures. The returned set is always sorted so repeated runs over
//! unchanged assets hash identically.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Extensions recognized as scene assets.
pub const DEFAULT_EXTENSIONS: &[&str] = &["lxs", "lxm", "lxo", "lxv", "ply", "jpg", "png", "hdr"];

/// Directory holding the alternate-renderer copy of a scene. Never hashed.
pub const DEFAULT_EXCLUDED_DIR: &str = "luxvr-scene";

/// Which files under a scene directory count as assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetFilter {
    /// File extensions without the leading dot; matched case-sensitively
    pub extensions: Vec<String>,
    /// Directory name skipped at any depth
    pub excluded_dir: String,
}

impl Default for AssetFilter {
    fn default() -> Self {
        AssetFilter {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dir: DEFAULT_EXCLUDED_DIR.to_string(),
        }
    }
}

impl AssetFilter {
    /// Whether `path` has one of the recognized extensions
    pub fn matches(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

/// Ordered list of the asset files of one scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneAssetSet {
    files: Vec<PathBuf>,
}

impl SceneAssetSet {
    /// Build a set from arbitrary paths; the paths are sorted.
    pub fn from_paths(mut files: Vec<PathBuf>) -> Self {
        files.sort();
        SceneAssetSet { files }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a SceneAssetSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Collect every asset file under `root`
///
/// Recurses into subdirectories except the filter's excluded directory,
/// keeps regular files with a recognized extension, and returns them in
/// canonical (sorted) order.
pub fn collect_scene_files(root: &Path, filter: &AssetFilter) -> Result<SceneAssetSet> {
    let mut files = Vec::new();

    // Symlinked assets and directories count as part of the scene.
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && entry.file_name() == filter.excluded_dir.as_str())
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if filter.matches(&path) {
            trace!("Selected scene file: {:?}", path);
            files.push(path);
        }
    }

    let set = SceneAssetSet::from_paths(files);
    debug!("Collected {} scene files under {:?}", set.len(), root);
    Ok(set)
}
