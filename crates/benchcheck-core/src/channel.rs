//! Status channel between the validation workers and the result view.
//!
//! Workers push [`ValidationStatus`] events without ever blocking; the
//! consumer drains them on its own schedule, either by polling
//! ([`StatusReceiver::try_next`] / [`StatusReceiver::drain_into`]) or by
//! awaiting [`StatusReceiver::next`]. Events of one track arrive in the
//! order they were sent.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::domain::{Track, ValidationStatus};

/// Create a connected sender/receiver pair.
pub fn status_channel() -> (StatusSender, StatusReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (StatusSender { tx }, StatusReceiver { rx })
}

/// Producer half. Cheap to clone; one clone per worker.
#[derive(Debug, Clone)]
pub struct StatusSender {
    tx: UnboundedSender<ValidationStatus>,
}

impl StatusSender {
    /// Push an event. A closed receiver is not an error for the producer.
    pub fn send(&self, status: ValidationStatus) {
        if let Err(err) = self.tx.send(status) {
            debug!(track = %err.0.track, label = %err.0.label, "status receiver dropped");
        }
    }

    /// Reporter bound to one track.
    pub fn reporter(&self, track: Track) -> TrackReporter {
        TrackReporter {
            track,
            sender: self.clone(),
        }
    }
}

/// Sends the events of a single track.
#[derive(Debug, Clone)]
pub struct TrackReporter {
    track: Track,
    sender: StatusSender,
}

impl TrackReporter {
    pub fn track(&self) -> Track {
        self.track
    }

    /// Informational update (`ok == false`).
    pub fn progress(&self, label: impl Into<String>) {
        self.sender
            .send(ValidationStatus::progress(self.track, label));
    }

    /// Terminal update.
    pub fn finish(&self, label: impl Into<String>, ok: bool) {
        self.sender
            .send(ValidationStatus::new(self.track, label, ok));
    }
}

/// Consumer half.
#[derive(Debug)]
pub struct StatusReceiver {
    rx: UnboundedReceiver<ValidationStatus>,
}

impl StatusReceiver {
    /// Next pending event, without waiting.
    pub fn try_next(&mut self) -> Option<ValidationStatus> {
        match self.rx.try_recv() {
            Ok(status) => Some(status),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next event. `None` once every sender is gone and the
    /// queue is empty.
    pub async fn next(&mut self) -> Option<ValidationStatus> {
        self.rx.recv().await
    }

    /// Blocking variant of [`next`](Self::next) for non-async consumers.
    /// Must not be called from inside an async runtime.
    pub fn blocking_next(&mut self) -> Option<ValidationStatus> {
        self.rx.blocking_recv()
    }

    /// Deliver every pending event to `subscriber`; returns how many.
    pub fn drain_into<S: StatusSubscriber + ?Sized>(&mut self, subscriber: &mut S) -> usize {
        let mut delivered = 0;
        while let Some(status) = self.try_next() {
            dispatch(&status, subscriber);
            delivered += 1;
        }
        delivered
    }

    /// Collect every remaining event until all senders are dropped.
    pub fn collect_blocking(mut self) -> Vec<ValidationStatus> {
        let mut events = Vec::new();
        while let Some(status) = self.blocking_next() {
            events.push(status);
        }
        events
    }
}

/// Receives status updates, one method per track.
pub trait StatusSubscriber {
    fn on_scene_status(&mut self, label: &str, ok: bool);
    fn on_image_status(&mut self, label: &str, ok: bool);
}

/// Route `status` to the subscriber method of its track.
pub fn dispatch<S: StatusSubscriber + ?Sized>(status: &ValidationStatus, subscriber: &mut S) {
    match status.track {
        Track::Scene => subscriber.on_scene_status(&status.label, status.ok),
        Track::Image => subscriber.on_image_status(&status.label, status.ok),
    }
}

/// Latest label and verdict of one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackState {
    pub label: String,
    pub ok: bool,
}

/// Subscriber that keeps the last status of each track.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    scene: Option<TrackState>,
    image: Option<TrackState>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> Option<&TrackState> {
        self.scene.as_ref()
    }

    pub fn image(&self) -> Option<&TrackState> {
        self.image.as_ref()
    }

    pub fn get(&self, track: Track) -> Option<&TrackState> {
        match track {
            Track::Scene => self.scene(),
            Track::Image => self.image(),
        }
    }

    /// Both tracks currently report `ok`.
    pub fn all_ok(&self) -> bool {
        self.scene.as_ref().is_some_and(|s| s.ok) && self.image.as_ref().is_some_and(|s| s.ok)
    }
}

impl StatusSubscriber for StatusBoard {
    fn on_scene_status(&mut self, label: &str, ok: bool) {
        self.scene = Some(TrackState {
            label: label.to_string(),
            ok,
        });
    }

    fn on_image_status(&mut self, label: &str, ok: bool) {
        self.image = Some(TrackState {
            label: label.to_string(),
            ok,
        });
    }
}
