//! Two-pass perceptual convergence test.
//!
//! The first image fed to a [`ConvergenceTest`] becomes the baseline; the
//! second is compared against it and yields the number of pixels a viewer
//! would see as different. Per-pixel thresholds come from the baseline
//! alone, so adding perturbed pixels to the candidate can only raise the
//! count.
//!
//! A pixel differs when either
//! - its luminance delta exceeds the threshold-versus-intensity (TVI) of the
//!   baseline's local adaptation luminance (3x3 neighbourhood), or
//! - its CIE Lab chroma moved further than `color_tolerance`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{Result, ValidationError};

/// Comparator tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceTolerance {
    /// Display gamma used to decode samples to linear RGB.
    pub gamma: f32,
    /// Absolute luminance of a white sample, in cd/m².
    pub luminance: f32,
    /// Largest accepted CIE Lab (a*, b*) distance.
    pub color_tolerance: f32,
}

impl Default for ConvergenceTolerance {
    fn default() -> Self {
        Self {
            gamma: 2.2,
            luminance: 100.0,
            color_tolerance: 10.0,
        }
    }
}

/// Per-pixel perceptual values of one image.
struct PerceptualPixel {
    luminance: f32,
    a: f32,
    b: f32,
}

struct Baseline {
    pixels: Vec<PerceptualPixel>,
    thresholds: Vec<f32>,
}

/// Stateful two-pass comparator.
///
/// `test` may be called twice: baseline, then candidate. A third call
/// fails with [`ValidationError::ComparatorExhausted`] until [`reset`].
///
/// [`reset`]: ConvergenceTest::reset
pub struct ConvergenceTest {
    width: usize,
    height: usize,
    tolerance: ConvergenceTolerance,
    baseline: Option<Baseline>,
    finished: bool,
}

impl ConvergenceTest {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_tolerance(width, height, ConvergenceTolerance::default())
    }

    pub fn with_tolerance(width: u32, height: u32, tolerance: ConvergenceTolerance) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
            tolerance,
            baseline: None,
            finished: false,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether a baseline has been fed.
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Feed one normalized RGB image (`width * height * 3` floats in [0, 1]).
    ///
    /// The first call stores the baseline and returns the pixel count. The
    /// second returns the number of pixels differing from the baseline.
    pub fn test(&mut self, image: &[f32]) -> Result<usize> {
        let expected = self.pixel_count() * 3;
        if image.len() != expected {
            return Err(ValidationError::ImageSize {
                expected,
                actual: image.len(),
            });
        }
        if self.finished {
            return Err(ValidationError::ComparatorExhausted);
        }

        let pixels = self.perceptual(image);
        match &self.baseline {
            None => {
                let thresholds = self.thresholds(&pixels);
                self.baseline = Some(Baseline { pixels, thresholds });
                Ok(self.pixel_count())
            }
            Some(baseline) => {
                let tol = self.tolerance.color_tolerance;
                let diff = baseline
                    .pixels
                    .iter()
                    .zip(&baseline.thresholds)
                    .zip(&pixels)
                    .filter(|&((base, threshold), test)| {
                        let delta_l = (base.luminance - test.luminance).abs();
                        let delta_c = (base.a - test.a).hypot(base.b - test.b);
                        delta_l > *threshold || delta_c > tol
                    })
                    .count();
                self.finished = true;
                trace!(diff, pixels = self.pixel_count(), "convergence test pass");
                Ok(diff)
            }
        }
    }

    /// Drop the baseline so the comparator can be reused.
    pub fn reset(&mut self) {
        self.baseline = None;
        self.finished = false;
    }

    fn perceptual(&self, image: &[f32]) -> Vec<PerceptualPixel> {
        let gamma = self.tolerance.gamma;
        let scale = self.tolerance.luminance;
        image
            .chunks_exact(3)
            .map(|rgb| {
                let r = rgb[0].max(0.0).powf(gamma);
                let g = rgb[1].max(0.0).powf(gamma);
                let b = rgb[2].max(0.0).powf(gamma);
                let (x, y, z) = linear_rgb_to_xyz(r, g, b);
                let (_, a_star, b_star) = xyz_to_lab(x, y, z);
                PerceptualPixel {
                    luminance: y * scale,
                    a: a_star,
                    b: b_star,
                }
            })
            .collect()
    }

    fn thresholds(&self, pixels: &[PerceptualPixel]) -> Vec<f32> {
        let (w, h) = (self.width, self.height);
        let mut out = Vec::with_capacity(pixels.len());
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0.0;
                let mut n = 0.0;
                for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                        sum += pixels[ny * w + nx].luminance;
                        n += 1.0;
                    }
                }
                out.push(tvi(sum / n));
            }
        }
        out
    }
}

/// Threshold-versus-intensity: smallest visible luminance change at the
/// given adaptation luminance (cd/m²), Ward Larson's piecewise fit.
pub fn tvi(adaptation_luminance: f32) -> f32 {
    let log_a = adaptation_luminance.max(1e-6).log10();
    let r = if log_a < -3.94 {
        -2.86
    } else if log_a < -1.44 {
        (0.405 * log_a + 1.6).powf(2.18) - 2.86
    } else if log_a < -0.0184 {
        log_a - 0.395
    } else if log_a < 1.9 {
        (0.249 * log_a + 0.65).powf(2.7) - 0.72
    } else {
        log_a - 1.255
    };
    10f32.powf(r)
}

fn linear_rgb_to_xyz(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        0.4124 * r + 0.3576 * g + 0.1805 * b,
        0.2126 * r + 0.7152 * g + 0.0722 * b,
        0.0193 * r + 0.1192 * g + 0.9505 * b,
    )
}

// D65 reference white.
const WHITE: (f32, f32, f32) = (0.9505, 1.0, 1.089);

fn xyz_to_lab(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    fn f(t: f32) -> f32 {
        if t > 0.008856 {
            t.cbrt()
        } else {
            7.787 * t + 16.0 / 116.0
        }
    }
    let fx = f(x / WHITE.0);
    let fy = f(y / WHITE.1);
    let fz = f(z / WHITE.2);
    (116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// `100 * diff / pixel_count`, 0 for an empty image.
pub fn error_percentage(diff_pixels: usize, pixel_count: usize) -> f32 {
    if pixel_count == 0 {
        return 0.0;
    }
    100.0 * diff_pixels as f32 / pixel_count as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, value: f32) -> Vec<f32> {
        vec![value; (w * h * 3) as usize]
    }

    #[test]
    fn test_identical_images_have_no_diff() {
        let image = solid(8, 8, 0.5);
        let mut conv = ConvergenceTest::new(8, 8);
        assert_eq!(conv.test(&image).unwrap(), 64);
        assert_eq!(conv.test(&image).unwrap(), 0);
    }

    #[test]
    fn test_single_lsb_noise_is_tolerated() {
        let base = solid(4, 4, 128.0 / 255.0);
        let noisy = solid(4, 4, 129.0 / 255.0);
        let mut conv = ConvergenceTest::new(4, 4);
        conv.test(&base).unwrap();
        assert_eq!(conv.test(&noisy).unwrap(), 0);
    }

    #[test]
    fn test_white_pixel_on_gray_differs() {
        let base = solid(4, 4, 0.5);
        let mut candidate = base.clone();
        candidate[0..3].copy_from_slice(&[1.0, 1.0, 1.0]);
        let mut conv = ConvergenceTest::new(4, 4);
        conv.test(&base).unwrap();
        assert_eq!(conv.test(&candidate).unwrap(), 1);
    }

    #[test]
    fn test_hue_shift_at_equal_luminance_differs() {
        let base = solid(2, 2, 0.5);
        let mut candidate = base.clone();
        // Strong red tint on one pixel.
        candidate[0..3].copy_from_slice(&[0.9, 0.3, 0.3]);
        let mut conv = ConvergenceTest::new(2, 2);
        conv.test(&base).unwrap();
        assert_eq!(conv.test(&candidate).unwrap(), 1);
    }

    #[test]
    fn test_third_use_requires_reset() {
        let image = solid(2, 2, 0.25);
        let mut conv = ConvergenceTest::new(2, 2);
        conv.test(&image).unwrap();
        conv.test(&image).unwrap();
        assert!(matches!(
            conv.test(&image),
            Err(ValidationError::ComparatorExhausted)
        ));

        conv.reset();
        assert!(!conv.has_baseline());
        assert_eq!(conv.test(&image).unwrap(), 4);
        assert_eq!(conv.test(&image).unwrap(), 0);
    }

    #[test]
    fn test_wrong_image_size_rejected() {
        let mut conv = ConvergenceTest::new(2, 2);
        assert!(matches!(
            conv.test(&[0.0; 5]),
            Err(ValidationError::ImageSize {
                expected: 12,
                actual: 5
            })
        ));
        assert!(!conv.has_baseline());
    }

    #[test]
    fn test_tvi_increases_with_adaptation() {
        let levels = [0.0001, 0.01, 0.5, 10.0, 100.0, 1000.0];
        for pair in levels.windows(2) {
            assert!(tvi(pair[0]) <= tvi(pair[1]));
        }
    }

    #[test]
    fn test_error_percentage() {
        assert_eq!(error_percentage(0, 100), 0.0);
        assert_eq!(error_percentage(25, 100), 25.0);
        assert_eq!(error_percentage(3, 0), 0.0);
    }
}
