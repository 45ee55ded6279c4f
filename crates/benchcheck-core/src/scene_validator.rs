//! Scene integrity track.
//!
//! Hashes every asset file of an official scene and compares the digest
//! with the one configured for that scene.

use std::path::Path;
use std::time::Instant;

use scene_digest::{collect_scene_files, hash_scene_files, ContentDigest};
use tracing::{debug, info};

use crate::channel::TrackReporter;
use crate::config::{scene_dir, ValidationConfig};
use crate::domain::status::{LABEL_ERROR, LABEL_FAILED, LABEL_OK, LABEL_STARTING};
use crate::domain::{Result, ValidationError};
use crate::metrics::METRICS;
use crate::obs::{emit_track_finished, emit_validation_error};

/// Run the scene track to completion, reporting through `reporter`.
///
/// Always ends with exactly one terminal status: `("OK", true)` when the
/// digest matches, `("Failed", false)` on a mismatch or a scene without a
/// profile, `("Error", false)` on any other error.
pub fn run_scene_validation(config: &ValidationConfig, scene: &str, reporter: &TrackReporter) {
    let started = Instant::now();
    reporter.progress(LABEL_STARTING);

    let (label, ok) = match validate_scene(config, scene, reporter) {
        Ok(digest) => {
            info!("Scene digest verified: {}", digest.short());
            (LABEL_OK, true)
        }
        Err(err) => {
            emit_validation_error(reporter.track(), &err);
            (failure_label(&err), false)
        }
    };

    reporter.finish(label, ok);
    emit_track_finished(
        reporter.track(),
        label,
        ok,
        started.elapsed().as_millis() as u64,
    );
}

/// Collect, hash and check the assets of `scene`.
///
/// Progress labels are sent for every selected file and again as each
/// file is hashed.
pub fn validate_scene(
    config: &ValidationConfig,
    scene: &str,
    reporter: &TrackReporter,
) -> Result<ContentDigest> {
    // Sessions only start this track for configured scenes.
    let profile = config
        .profile(scene)
        .ok_or_else(|| ValidationError::UnsupportedScene(scene.to_string()))?;

    let dir = scene_dir(scene)?;
    info!("Scene validation path: {:?}", dir);

    let files = collect_scene_files(&dir, &config.asset_filter)?;
    for path in &files {
        reporter.progress(format!("Selecting file [{}]", file_label(path)));
    }
    debug!("Scene validation selected {} files", files.len());

    let digest = hash_scene_files(&files, |path| {
        debug!("  hashing {:?}", path);
        reporter.progress(format!("Validating file [{}]", file_label(path)));
        METRICS.inc_files_hashed();
    })?;
    info!("Scene files digest: {}", digest);

    if digest != profile.expected_digest {
        return Err(ValidationError::DigestMismatch {
            expected: profile.expected_digest,
            actual: digest,
        });
    }
    Ok(digest)
}

fn failure_label(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::DigestMismatch { .. } | ValidationError::UnsupportedScene(_) => {
            LABEL_FAILED
        }
        _ => LABEL_ERROR,
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
