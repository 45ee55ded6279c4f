//! Scene-Digest: deterministic scene asset hashing for benchcheck
//!
//! This crate is the integrity layer of benchcheck. It selects the asset
//! files of a rendering scene in a canonical order and computes one
//! content digest over all of them.
//!
//! ## Layer 0 - Scene integrity
//!
//! Focus: stable ordering and byte-exact hashing. Status reporting lives
//! in `benchcheck-core`.

pub mod collect;
pub mod digest;
pub mod error;

pub use collect::{
    collect_scene_files, AssetFilter, SceneAssetSet, DEFAULT_EXCLUDED_DIR, DEFAULT_EXTENSIONS,
};
pub use digest::{hash_scene_files, ContentDigest};
pub use error::DigestError;

/// Result type for scene-digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

/// Collect the assets under `root` and hash them in one step.
pub fn scene_digest(root: &std::path::Path, filter: &AssetFilter) -> Result<ContentDigest> {
    let files = collect_scene_files(root, filter)?;
    hash_scene_files(&files, |_| {})
}
