//! Domain models for benchcheck.
//!
//! - `BenchmarkMode`: rendering back end of the run
//! - `FrameBuffer`: the rendered RGB8 output under validation
//! - `ValidationStatus`: per-track progress and verdict events
//! - `ValidationError`: everything that can end a track early

pub mod error;
pub mod frame;
pub mod mode;
pub mod status;

pub use error::{Result, ValidationError};
pub use frame::{normalize_samples, FrameBuffer};
pub use mode::BenchmarkMode;
pub use status::{Track, ValidationStatus};
