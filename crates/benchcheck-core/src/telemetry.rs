//! Tracing initialisation for applications embedding benchcheck.
//!
//! Call [`init_tracing`] once at program start. Later calls are ignored
//! because the global subscriber can only be set once per process.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events are raised to the requested level by default.
const VALIDATION_TARGETS: &[&str] = &["benchcheck_core", "scene_digest"];

/// Filter used when `RUST_LOG` is unset: validation crates at `level`,
/// everything else at `warn`.
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    let mut directives = String::from("warn");
    for target in VALIDATION_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Initialise the global tracing subscriber.
///
/// * `json`: emit newline-delimited JSON with the session span attached.
/// * `level`: verbosity of the validation crates when `RUST_LOG` is not set.
///
/// The scene and image workers log from their own threads, so the text
/// format carries thread names to tell the two tracks apart.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_thread_names(true))
            .try_init()
            .ok();
    }
}
