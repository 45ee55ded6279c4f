//! Validation status events.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const LABEL_STARTING: &str = "Starting...";
pub const LABEL_COMPARING: &str = "Comparing...";
pub const LABEL_OK: &str = "OK";
pub const LABEL_FAILED: &str = "Failed";
pub const LABEL_ERROR: &str = "Error";
pub const LABEL_NOT_APPLICABLE: &str = "N/A";

/// One of the two independent validation flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    /// Scene asset integrity (content digest).
    Scene,
    /// Rendered image fidelity (convergence test).
    Image,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Scene => f.write_str("scene"),
            Track::Image => f.write_str("image"),
        }
    }
}

/// A status update on one track.
///
/// Progress updates carry `ok == false`; only the last update of a track
/// decides whether it passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStatus {
    pub track: Track,
    pub label: String,
    pub ok: bool,
}

impl ValidationStatus {
    pub fn new(track: Track, label: impl Into<String>, ok: bool) -> Self {
        Self {
            track,
            label: label.into(),
            ok,
        }
    }

    /// Informational update (`ok == false`).
    pub fn progress(track: Track, label: impl Into<String>) -> Self {
        Self::new(track, label, false)
    }
}
