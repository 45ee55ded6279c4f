//! Validation session: owns the two background validators of one
//! benchmark result.
//!
//! Eligibility is decided once, when the session starts. Official scenes
//! get a scene-integrity worker and an image-fidelity worker, each on its
//! own named thread; any other scene reports `"N/A"` on both tracks
//! immediately. Dropping the session (or calling [`ValidationSession::wait`])
//! joins both workers, so once it returns nothing reads the frame buffer
//! anymore.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::channel::{StatusSender, TrackReporter};
use crate::config::ValidationConfig;
use crate::domain::status::{LABEL_ERROR, LABEL_NOT_APPLICABLE};
use crate::domain::{BenchmarkMode, FrameBuffer, Track};
use crate::image_validator::run_image_validation;
use crate::metrics::METRICS;
use crate::obs::{emit_session_started, emit_validation_error, SessionSpan};
use crate::scene_validator::run_scene_validation;

/// A device that took part in the run. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescription {
    pub name: String,
    pub device_type: String,
}

/// What the benchmark run reports about itself.
///
/// Only `scene` and `mode` drive validation; the rest is carried for the
/// result view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Scene identifier: path of the scene file.
    pub scene: String,
    pub mode: BenchmarkMode,
    /// Measured benchmark duration.
    pub sample_secs: f64,
    #[serde(default)]
    pub devices: Vec<DeviceDescription>,
}

impl RunSummary {
    pub fn new(scene: impl Into<String>, mode: BenchmarkMode) -> Self {
        Self {
            scene: scene.into(),
            mode,
            sample_secs: 0.0,
            devices: Vec::new(),
        }
    }

    pub fn with_sample_secs(mut self, sample_secs: f64) -> Self {
        self.sample_secs = sample_secs;
        self
    }

    pub fn with_device(mut self, device: DeviceDescription) -> Self {
        self.devices.push(device);
        self
    }
}

/// Background validation of one benchmark result.
pub struct ValidationSession {
    summary: RunSummary,
    frame: FrameBuffer,
    scene_worker: Option<JoinHandle<()>>,
    image_worker: Option<JoinHandle<()>>,
}

impl ValidationSession {
    /// Start validating `summary`'s result.
    ///
    /// Status events go to `sender`. For a scene without a profile in
    /// `config`, both `"N/A"` events are sent before this returns and no
    /// thread is started.
    pub fn start(
        config: Arc<ValidationConfig>,
        summary: RunSummary,
        frame: FrameBuffer,
        sender: StatusSender,
    ) -> Self {
        let validating = config.is_validated(&summary.scene);
        emit_session_started(&summary.scene, summary.mode, validating);
        METRICS.inc_sessions_started();

        if !validating {
            sender
                .reporter(Track::Scene)
                .finish(LABEL_NOT_APPLICABLE, true);
            sender
                .reporter(Track::Image)
                .finish(LABEL_NOT_APPLICABLE, true);
            return Self {
                summary,
                frame,
                scene_worker: None,
                image_worker: None,
            };
        }

        let scene_worker = {
            let config = Arc::clone(&config);
            let scene = summary.scene.clone();
            let mode = summary.mode;
            spawn_worker("scene-validation", Track::Scene, &sender, move |reporter| {
                let _span = SessionSpan::enter(&scene, mode, Track::Scene);
                run_scene_validation(&config, &scene, reporter);
            })
        };

        let image_worker = {
            let config = Arc::clone(&config);
            let scene = summary.scene.clone();
            let mode = summary.mode;
            let frame = frame.clone();
            spawn_worker("image-validation", Track::Image, &sender, move |reporter| {
                let _span = SessionSpan::enter(&scene, mode, Track::Image);
                run_image_validation(&config, &scene, mode, &frame, reporter);
            })
        };

        Self {
            summary,
            frame,
            scene_worker,
            image_worker,
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Whether background validators were started.
    pub fn is_validating(&self) -> bool {
        self.scene_worker.is_some() || self.image_worker.is_some()
    }

    /// Whether every started validator has returned.
    pub fn is_finished(&self) -> bool {
        [&self.scene_worker, &self.image_worker]
            .into_iter()
            .flatten()
            .all(JoinHandle::is_finished)
    }

    /// Block until both validators are done.
    pub fn wait(mut self) {
        self.join_workers();
    }

    /// Block until both validators are done, then hand the frame buffer back.
    pub fn into_frame(mut self) -> FrameBuffer {
        self.join_workers();
        self.frame.clone()
    }

    fn join_workers(&mut self) {
        for (track, worker) in [
            (Track::Scene, self.scene_worker.take()),
            (Track::Image, self.image_worker.take()),
        ] {
            let Some(handle) = worker else { continue };
            if handle.join().is_err() {
                warn!(track = %track, "validation worker panicked");
            }
            debug!(track = %track, "validation worker joined");
        }
    }
}

impl Drop for ValidationSession {
    fn drop(&mut self) {
        self.join_workers();
    }
}

/// Spawn one track's worker on a named thread.
///
/// A panic inside `body` is turned into a terminal `"Error"` status. If the
/// thread cannot be spawned at all the track reports `"Error"` right away.
fn spawn_worker<F>(
    name: &str,
    track: Track,
    sender: &StatusSender,
    body: F,
) -> Option<JoinHandle<()>>
where
    F: FnOnce(&TrackReporter) + Send + 'static,
{
    let reporter = sender.reporter(track);
    let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
        if panic::catch_unwind(AssertUnwindSafe(|| body(&reporter))).is_err() {
            error!(track = %reporter.track(), "validation worker panicked");
            reporter.finish(LABEL_ERROR, false);
        }
    });

    match spawned {
        Ok(handle) => Some(handle),
        Err(err) => {
            emit_validation_error(track, &err);
            sender.reporter(track).finish(LABEL_ERROR, false);
            None
        }
    }
}
