//! Validation configuration
//!
//! Which scenes are validated, the digest each one must hash to, and the
//! reference image used for each benchmark mode. This is policy data
//! supplied by the application; nothing here is hard-coded per scene.

use crate::convergence::ConvergenceTolerance;
use crate::domain::{BenchmarkMode, Result, ValidationError};
use scene_digest::{AssetFilter, ContentDigest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "BENCHCHECK_CONFIG";

/// Validation data for one official scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneProfile {
    /// Digest the scene's asset files must hash to
    pub expected_digest: ContentDigest,
    /// Reference raw image per mode, relative to the scene directory
    #[serde(default)]
    pub reference_images: BTreeMap<BenchmarkMode, PathBuf>,
}

impl SceneProfile {
    pub fn new(expected_digest: ContentDigest) -> Self {
        SceneProfile {
            expected_digest,
            reference_images: BTreeMap::new(),
        }
    }

    /// Profile whose every benchmark mode shares one reference file
    pub fn uniform_reference(expected_digest: ContentDigest, file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        SceneProfile {
            expected_digest,
            reference_images: BenchmarkMode::BENCHMARKS
                .iter()
                .map(|&mode| (mode, file.clone()))
                .collect(),
        }
    }

    /// Set the reference file for one mode
    pub fn with_reference(mut self, mode: BenchmarkMode, file: impl Into<PathBuf>) -> Self {
        self.reference_images.insert(mode, file.into());
        self
    }

    /// Reference file name for `mode`
    ///
    /// # Errors
    ///
    /// - `UnsupportedMode` if `mode` is not a rendering back end.
    /// - `MissingReference` if no file is configured for it.
    pub fn reference_for(&self, mode: BenchmarkMode) -> Result<&Path> {
        if !mode.is_benchmark() {
            return Err(ValidationError::UnsupportedMode(mode));
        }
        self.reference_images
            .get(&mode)
            .map(PathBuf::as_path)
            .ok_or(ValidationError::MissingReference { mode })
    }
}

/// Full validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Official scenes keyed by scene identifier (path of the scene file)
    #[serde(default)]
    pub scenes: BTreeMap<String, SceneProfile>,
    #[serde(default)]
    pub asset_filter: AssetFilter,
    #[serde(default)]
    pub tolerance: ConvergenceTolerance,
}

impl ValidationConfig {
    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ValidationConfig = serde_json::from_str(json)?;
        debug!("Loaded validation config with {} scenes", config.scenes.len());
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load the file named by `BENCHCHECK_CONFIG`
    ///
    /// With the variable unset, returns the default config, which
    /// validates no scene.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                info!("Loading validation config from {:?}", path);
                Self::from_json_file(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    /// Register an official scene
    pub fn with_scene(mut self, scene: impl Into<String>, profile: SceneProfile) -> Self {
        self.scenes.insert(scene.into(), profile);
        self
    }

    pub fn with_tolerance(mut self, tolerance: ConvergenceTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_asset_filter(mut self, filter: AssetFilter) -> Self {
        self.asset_filter = filter;
        self
    }

    /// Profile of `scene`, if it is an official scene
    pub fn profile(&self, scene: &str) -> Option<&SceneProfile> {
        self.scenes.get(scene)
    }

    /// Whether runs of `scene` get validated at all
    pub fn is_validated(&self, scene: &str) -> bool {
        self.scenes.contains_key(scene)
    }
}

/// Directory holding the assets of `scene` (the scene file's parent)
pub fn scene_dir(scene: &str) -> Result<PathBuf> {
    match Path::new(scene).parent() {
        Some(dir) if dir.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(ValidationError::NoSceneDirectory(scene.to_string())),
    }
}
