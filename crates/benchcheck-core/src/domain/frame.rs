//! Rendered frame buffer shared with the validators.

use std::sync::Arc;

use super::error::{Result, ValidationError};

/// RGB8 output of a benchmark run.
///
/// Pixels are shared read-only; cloning a `FrameBuffer` never copies them.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl FrameBuffer {
    /// Wrap `pixels` (row-major, 3 bytes per pixel).
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidFrameBuffer` when `pixels.len()` is not
    /// `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Result<Self> {
        let pixels = pixels.into();
        let expected = sample_count(width, height);
        if pixels.len() != expected {
            return Err(ValidationError::InvalidFrameBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of 8-bit samples (`pixel_count() * 3`).
    pub fn sample_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Samples scaled to [0, 1].
    pub fn normalized(&self) -> Vec<f32> {
        normalize_samples(&self.pixels)
    }
}

pub(crate) fn sample_count(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Scale 8-bit samples to [0, 1] floats.
pub fn normalize_samples(samples: &[u8]) -> Vec<f32> {
    samples.iter().map(|&s| f32::from(s) / 255.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_buffer_rejects_wrong_length() {
        let err = FrameBuffer::new(2, 2, vec![0u8; 11]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFrameBuffer {
                expected: 12,
                actual: 11,
                ..
            }
        ));
    }

    #[test]
    fn test_frame_buffer_clone_shares_pixels() {
        let fb = FrameBuffer::new(1, 1, vec![1u8, 2, 3]).unwrap();
        let copy = fb.clone();
        assert_eq!(fb.pixels().as_ptr(), copy.pixels().as_ptr());
    }

    #[test]
    fn test_normalize_bounds() {
        assert_eq!(normalize_samples(&[0, 255]), vec![0.0, 1.0]);
    }
}
