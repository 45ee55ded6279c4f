//! Image fidelity track.
//!
//! Loads the reference raw image configured for the run's mode and
//! compares the rendered frame buffer against it with a two-pass
//! [`ConvergenceTest`].

use std::time::Instant;

use tracing::info;

use crate::channel::TrackReporter;
use crate::config::{scene_dir, ValidationConfig};
use crate::convergence::{error_percentage, ConvergenceTest};
use crate::domain::frame::sample_count;
use crate::domain::status::{LABEL_COMPARING, LABEL_ERROR, LABEL_STARTING};
use crate::domain::{normalize_samples, BenchmarkMode, FrameBuffer, Result, ValidationError};
use crate::metrics::METRICS;
use crate::obs::{emit_track_finished, emit_validation_error};

/// Outcome of comparing a frame buffer with its reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageComparison {
    pub diff_pixels: usize,
    pub pixel_count: usize,
    pub error_percentage: f32,
}

impl ImageComparison {
    /// Terminal label, e.g. `OK (12 different pixels, 0.01%)`.
    pub fn label(&self) -> String {
        format!(
            "OK ({} different pixels, {:.2}%)",
            self.diff_pixels, self.error_percentage
        )
    }
}

/// Run the image track to completion, reporting through `reporter`.
///
/// Ends with `("OK (<n> different pixels, <p>%)", true)` whatever the
/// error percentage is, or `("Error", false)` on any failure.
pub fn run_image_validation(
    config: &ValidationConfig,
    scene: &str,
    mode: BenchmarkMode,
    frame: &FrameBuffer,
    reporter: &TrackReporter,
) {
    let started = Instant::now();
    reporter.progress(LABEL_STARTING);

    let (label, ok) = match validate_image(config, scene, mode, frame, reporter) {
        Ok(comparison) => (comparison.label(), true),
        Err(err) => {
            emit_validation_error(reporter.track(), &err);
            (LABEL_ERROR.to_string(), false)
        }
    };

    reporter.finish(label.as_str(), ok);
    emit_track_finished(
        reporter.track(),
        &label,
        ok,
        started.elapsed().as_millis() as u64,
    );
}

/// Load the reference image of `scene` for `mode` and compare `frame` to it.
///
/// Sends `"Comparing..."` before the candidate pass.
pub fn validate_image(
    config: &ValidationConfig,
    scene: &str,
    mode: BenchmarkMode,
    frame: &FrameBuffer,
    reporter: &TrackReporter,
) -> Result<ImageComparison> {
    let profile = config
        .profile(scene)
        .ok_or_else(|| ValidationError::UnsupportedScene(scene.to_string()))?;

    let dir = scene_dir(scene)?;
    info!("Image validation scene path: {:?}", dir);
    let reference_path = dir.join(profile.reference_for(mode)?);
    info!("Image validation file name: {:?}", reference_path);

    let raw = std::fs::read(&reference_path)?;
    let expected = sample_count(frame.width(), frame.height());
    if raw.len() != expected {
        return Err(ValidationError::SizeMismatch {
            expected,
            actual: raw.len(),
        });
    }

    let reference = normalize_samples(&raw);
    drop(raw);
    let candidate = frame.normalized();

    let mut conv = ConvergenceTest::with_tolerance(frame.width(), frame.height(), config.tolerance);
    conv.test(&reference)?;

    reporter.progress(LABEL_COMPARING);
    let diff_pixels = conv.test(&candidate)?;

    let pixel_count = frame.pixel_count();
    METRICS.add_pixels_compared(pixel_count as u64);

    let comparison = ImageComparison {
        diff_pixels,
        pixel_count,
        error_percentage: error_percentage(diff_pixels, pixel_count),
    };
    info!(
        diff_pixels,
        error_percentage = comparison.error_percentage,
        "Image comparison done"
    );
    Ok(comparison)
}
