//! Structured observability hooks for validation sessions.
//!
//! This module provides:
//! - Session-scoped tracing spans via `SessionSpan` RAII guard
//! - Emission functions for lifecycle events: session start, track finish,
//!   validation errors
//!
//! Events are emitted at `info!` level (errors at `error!`); filter with
//! `RUST_LOG`.

use tracing::{error, info};

use crate::domain::{BenchmarkMode, Track};

/// RAII guard that enters a session-scoped span for the lifetime of a worker.
///
/// # Example
///
/// ```ignore
/// let _span = SessionSpan::enter("scenes/luxball/render.cfg", BenchmarkMode::OclGpu, Track::Image);
/// // every event from this thread now carries scene, mode and track
/// ```
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    /// Create and enter a span tagged with scene, mode and track.
    pub fn enter(scene: &str, mode: BenchmarkMode, track: Track) -> Self {
        let span = tracing::info_span!(
            "benchcheck.session",
            scene = %scene,
            mode = %mode,
            track = %track,
        );
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: session started; `validating` is false for non-official scenes.
pub fn emit_session_started(scene: &str, mode: BenchmarkMode, validating: bool) {
    info!(
        event = "session.started",
        scene = %scene,
        mode = %mode,
        validating = validating,
    );
}

/// Emit event: a track reached its terminal status.
pub fn emit_track_finished(track: Track, label: &str, ok: bool, duration_ms: u64) {
    info!(
        event = "track.finished",
        track = %track,
        label = %label,
        ok = ok,
        duration_ms = duration_ms,
    );
}

/// Emit event: a track ended on an error.
pub fn emit_validation_error(track: Track, error: &dyn std::fmt::Display) {
    error!(event = "track.error", track = %track, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_span_create() {
        let _span =
            SessionSpan::enter("scenes/test/render.cfg", BenchmarkMode::OclGpu, Track::Scene);
    }
}
