//! benchcheck Core Library
//!
//! Validates a finished rendering benchmark run on two independent tracks:
//! the scene assets must hash to the official digest, and the rendered
//! frame must match the reference image. Both run in the background and
//! report through a status channel.

pub mod channel;
pub mod config;
pub mod convergence;
pub mod domain;
pub mod image_validator;
pub mod metrics;
pub mod obs;
pub mod scene_validator;
pub mod session;
pub mod telemetry;

pub use domain::{
    normalize_samples, BenchmarkMode, FrameBuffer, Result, Track, ValidationError,
    ValidationStatus,
};

pub use channel::{
    dispatch, status_channel, StatusBoard, StatusReceiver, StatusSender, StatusSubscriber,
    TrackReporter, TrackState,
};
pub use config::{scene_dir, SceneProfile, ValidationConfig, CONFIG_ENV_VAR};
pub use convergence::{error_percentage, ConvergenceTest, ConvergenceTolerance};
pub use image_validator::{run_image_validation, validate_image, ImageComparison};
pub use scene_validator::{run_scene_validation, validate_scene};
pub use session::{DeviceDescription, RunSummary, ValidationSession};

pub use scene_digest::{AssetFilter, ContentDigest, SceneAssetSet};

pub use metrics::METRICS;
pub use obs::{emit_session_started, emit_track_finished, emit_validation_error, SessionSpan};
pub use telemetry::{default_directives, init_tracing};

/// benchcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
