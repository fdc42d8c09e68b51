//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! The controller publishes one [`IntakeEvent`] per visible side effect, in
//! the order the side effects happen. Renderers, analytics hooks and tests
//! subscribe independently.

use serde::Serialize;
use tokio::sync::broadcast;

use naamkaran_core::fields::FieldName;

use crate::view::Notification;

// ---------------------------------------------------------------------------
// IntakeEvent
// ---------------------------------------------------------------------------

/// One observable step of the intake lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntakeEvent {
    /// Submit was pressed; the default form action is suppressed.
    ValidationStarted,
    /// Submit aborted before any network call.
    ValidationFailed { fields: Vec<FieldName> },
    ValidationPassed,
    /// The submit control is disabled for the duration of the call.
    SubmitDisabled,
    /// The blocking "in progress" overlay is shown.
    OverlayShown,
    /// The gateway call resolved or rejected; submit is enabled again.
    SubmissionSettled { succeeded: bool },
    NotificationShown(Notification),
    NotificationDismissed { id: u64 },
    ModalOpened { application_id: String },
    ModalClosed,
    /// The record was returned to its empty defaults.
    RecordReset,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use naamkaran_intake::bus::{EventBus, IntakeEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(IntakeEvent::ModalClosed);
/// assert_eq!(rx.try_recv().unwrap(), IntakeEvent::ModalClosed);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<IntakeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: IntakeEvent) {
        // A send error only means nobody is subscribed.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<IntakeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
