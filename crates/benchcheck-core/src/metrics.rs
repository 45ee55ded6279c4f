//! Global atomic counters for validation activity.
//!
//! Counters are bumped by the validators as they work. Call
//! [`Metrics::flush`] to log the current values as one `info!` event.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    /// Every started session, validated or not.
    sessions_started: AtomicU64,
    files_hashed: AtomicU64,
    pixels_compared: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            sessions_started: AtomicU64::new(0),
            files_hashed: AtomicU64::new(0),
            pixels_compared: AtomicU64::new(0),
        }
    }

    /// A session launched its background validators.
    pub fn inc_sessions_started(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "sessions_started", "counter incremented");
    }

    pub fn inc_files_hashed(&self) {
        self.files_hashed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_pixels_compared(&self, pixels: u64) {
        self.pixels_compared.fetch_add(pixels, Ordering::Relaxed);
        tracing::trace!(metric = "pixels_compared", pixels, "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            sessions_started = self.sessions_started(),
            files_hashed = self.files_hashed(),
            pixels_compared = self.pixels_compared(),
        );
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started.load(Ordering::Relaxed)
    }

    pub fn files_hashed(&self) -> u64 {
        self.files_hashed.load(Ordering::Relaxed)
    }

    pub fn pixels_compared(&self) -> u64 {
        self.pixels_compared.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.sessions_started.store(0, Ordering::Relaxed);
        self.files_hashed.store(0, Ordering::Relaxed);
        self.pixels_compared.store(0, Ordering::Relaxed);
    }
}
