//! Observable view state of the intake form.
//!
//! [`ViewState`] is a pure fold over [`IntakeEvent`]s: the controller never
//! mutates it directly, it publishes an event and the snapshot applies it.

use serde::Serialize;

use naamkaran_core::fields::FieldName;

use crate::bus::IntakeEvent;

/// Position in the submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast shown after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Monotonic per-controller id; dismiss timers target a specific id.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Everything a renderer needs to draw the form chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub phase: SubmissionPhase,
    pub submit_enabled: bool,
    pub overlay_visible: bool,
    /// Fields whose inline error message is currently shown.
    pub visible_errors: Vec<FieldName>,
    pub notification: Option<Notification>,
    /// Application id shown in the confirmation modal, when open.
    pub modal: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            submit_enabled: true,
            overlay_visible: false,
            visible_errors: Vec::new(),
            notification: None,
            modal: None,
        }
    }
}

impl ViewState {
    /// Fold one event into the snapshot.
    pub fn apply(&mut self, event: &IntakeEvent) {
        match event {
            IntakeEvent::ValidationStarted => self.phase = SubmissionPhase::Validating,
            IntakeEvent::ValidationFailed { fields } => {
                self.phase = SubmissionPhase::Idle;
                self.visible_errors = fields.clone();
            }
            IntakeEvent::ValidationPassed => self.visible_errors.clear(),
            IntakeEvent::SubmitDisabled => {
                self.phase = SubmissionPhase::Submitting;
                self.submit_enabled = false;
            }
            IntakeEvent::OverlayShown => self.overlay_visible = true,
            IntakeEvent::SubmissionSettled { succeeded } => {
                self.submit_enabled = true;
                self.overlay_visible = false;
                self.phase = if *succeeded {
                    SubmissionPhase::Succeeded
                } else {
                    SubmissionPhase::Failed
                };
            }
            IntakeEvent::NotificationShown(notification) => {
                self.notification = Some(notification.clone())
            }
            IntakeEvent::NotificationDismissed { id } => {
                if self.notification.as_ref().is_some_and(|n| n.id == *id) {
                    self.notification = None;
                }
            }
            IntakeEvent::ModalOpened { application_id } => {
                self.modal = Some(application_id.clone())
            }
            IntakeEvent::ModalClosed => self.modal = None,
            IntakeEvent::RecordReset => self.phase = SubmissionPhase::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }
}
