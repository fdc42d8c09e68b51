//! Form state owner and submission lifecycle.
//!
//! [`FormController`] holds the [`FormRecord`], applies field updates
//! through the transition table, and drives the submit state machine:
//!
//! ```text
//! Idle -> Validating -> Idle                          (invalid)
//!                    -> Submitting -> Succeeded -> Idle
//!                                  -> Failed    -> Idle
//! ```
//!
//! Side effects of a valid submit happen in this order: disable submit,
//! show overlay, await the gateway, re-enable submit, show the toast,
//! schedule its dismissal, (success only) schedule the application id
//! modal, reset the record.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use naamkaran_core::error::CoreError;
use naamkaran_core::fields::FieldName;
use naamkaran_core::record::FormRecord;
use naamkaran_core::transitions::{self, FieldUpdate};
use naamkaran_core::types::FormVariant;
use naamkaran_core::validation::{self, ValidationState};
use naamkaran_gateway::{CrmApi, GeocodingApi, PlaceSearch, PlaceSuggestion, SubmissionGateway};

use crate::bus::{EventBus, IntakeEvent};
use crate::config::IntakeConfig;
use crate::suggestions::{PointerTarget, SuggestionGateway, SuggestionList};
use crate::view::{Notification, NotificationKind, ViewState};

/// Toast text after the backend accepts an application.
pub const SUCCESS_MESSAGE: &str = "Application submitted successfully!";
/// Toast text after any submission failure.
pub const FAILURE_MESSAGE: &str = "Failed to submit application. Please try again.";

/// Timing and variant knobs of a [`FormController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub variant: FormVariant,
    pub notification_ttl: Duration,
    pub modal_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            variant: FormVariant::Premium,
            notification_ttl: Duration::from_secs(5),
            modal_delay: Duration::from_secs(3),
        }
    }
}

impl From<&IntakeConfig> for ControllerSettings {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            variant: config.variant,
            notification_ttl: config.notification_ttl,
            modal_delay: config.modal_delay,
        }
    }
}

/// How a call to [`FormController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(ValidationState),
    Succeeded { application_id: String },
    Failed { reason: String },
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Folds each event into the view snapshot, then publishes it.
#[derive(Clone)]
struct Emitter {
    view: Arc<watch::Sender<ViewState>>,
    bus: Arc<EventBus>,
}

impl Emitter {
    fn emit(&self, event: IntakeEvent) {
        self.view.send_modify(|view| view.apply(&event));
        self.bus.publish(event);
    }

    fn current_notification_id(&self) -> Option<u64> {
        self.view.borrow().notification.as_ref().map(|n| n.id)
    }
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// Owner of one intake form instance.
pub struct FormController<G: SubmissionGateway, P: PlaceSearch> {
    record: FormRecord,
    settings: ControllerSettings,
    gateway: G,
    suggestions: SuggestionGateway<P>,
    emitter: Emitter,
    next_notification_id: u64,
    /// Cancels outstanding toast/modal timers when the controller is dropped.
    timers: CancellationToken,
}

impl FormController<CrmApi, GeocodingApi> {
    /// Wire a controller to the real HTTP gateways described by `config`.
    pub fn from_config(config: &IntakeConfig) -> Self {
        let gateway = CrmApi::new(config.crm_api_url.clone());
        let search = GeocodingApi::new(
            config.geocoding_api_url.clone(),
            config.geocoding_api_key.clone(),
            config.geocoding_country.clone(),
        );
        Self::new(
            gateway,
            SuggestionGateway::new(search, config.suggestion_debounce),
            ControllerSettings::from(config),
        )
    }
}

impl<G: SubmissionGateway, P: PlaceSearch> FormController<G, P> {
    pub fn new(gateway: G, suggestions: SuggestionGateway<P>, settings: ControllerSettings) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self {
            record: FormRecord::default(),
            settings,
            gateway,
            suggestions,
            emitter: Emitter {
                view: Arc::new(view),
                bus: Arc::new(EventBus::default()),
            },
            next_notification_id: 0,
            timers: CancellationToken::new(),
        }
    }

    // ---- observation ----

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn variant(&self) -> FormVariant {
        self.settings.variant
    }

    pub fn view(&self) -> ViewState {
        self.emitter.view.borrow().clone()
    }

    pub fn watch_view(&self) -> watch::Receiver<ViewState> {
        self.emitter.view.subscribe()
    }

    /// Subscribe to lifecycle events, in side-effect order.
    pub fn subscribe(&self) -> broadcast::Receiver<IntakeEvent> {
        self.emitter.bus.subscribe()
    }

    pub fn suggestions(&self) -> Vec<PlaceSuggestion> {
        self.suggestions.suggestions()
    }

    pub fn watch_suggestions(&self) -> watch::Receiver<SuggestionList> {
        self.suggestions.subscribe()
    }

    /// Derived total of the selected services.
    pub fn total_price(&self) -> u32 {
        self.record.total_price()
    }

    // ---- input ----

    /// Normalize and store one field, applying dependent-field cascades.
    ///
    /// A birthplace update also (re)arms the place suggestion query, which
    /// needs a Tokio runtime. Without one the update is still stored.
    pub fn update_field(&mut self, field: FieldName, raw: &str) -> Result<FieldUpdate, CoreError> {
        let update = transitions::apply_update(&mut self.record, field, raw)?;
        if !update.cleared.is_empty() {
            tracing::debug!(field = %field, cleared = ?update.cleared, "Cleared dependent fields");
        }
        if update.refresh_suggestions {
            self.suggestions.query(&self.record.birthplace);
        }
        Ok(update)
    }

    /// [`update_field`](Self::update_field) addressed by the camelCase field key.
    pub fn update_field_by_name(&mut self, name: &str, raw: &str) -> Result<FieldUpdate, CoreError> {
        let field: FieldName = name.parse()?;
        self.update_field(field, raw)
    }

    /// Toggle a paid service; returns whether it is selected afterwards.
    pub fn select_service(&mut self, id: &str) -> Result<bool, CoreError> {
        let selected = self.record.toggle_service(id)?;
        tracing::debug!(service = id, selected, total = self.record.total_price(), "Service toggled");
        Ok(selected)
    }

    /// Accept a place suggestion as the birthplace and close the list.
    pub fn select_suggestion(&mut self, suggestion: &PlaceSuggestion) {
        self.record.birthplace = suggestion.display_name.clone();
        self.suggestions.clear();
    }

    /// Click-away handling for the suggestion panel.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        self.suggestions.pointer_down(target);
    }

    pub fn close_modal(&self) {
        if self.emitter.view.borrow().modal.is_some() {
            self.emitter.emit(IntakeEvent::ModalClosed);
        }
    }

    // ---- validation & submit ----

    /// Evaluate every rule against the current record.
    pub fn validate(&self) -> ValidationState {
        validation::validate(&self.record, self.settings.variant)
    }

    /// Run the submit lifecycle once.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.emitter.emit(IntakeEvent::ValidationStarted);

        let state = self.validate();
        if !state.is_valid() {
            let fields = state.invalid_fields();
            tracing::info!(fields = ?fields, "Submission blocked by validation");
            self.emitter.emit(IntakeEvent::ValidationFailed { fields });
            return SubmitOutcome::Invalid(state);
        }
        self.emitter.emit(IntakeEvent::ValidationPassed);

        self.emitter.emit(IntakeEvent::SubmitDisabled);
        self.emitter.emit(IntakeEvent::OverlayShown);

        let result = self.gateway.submit(&self.record).await;

        self.emitter.emit(IntakeEvent::SubmissionSettled {
            succeeded: result.is_ok(),
        });

        let outcome = match result {
            Ok(receipt) => {
                tracing::info!(
                    application_id = %receipt.application_id,
                    total_price = self.record.total_price(),
                    "Application submitted",
                );
                let id = self.notify(NotificationKind::Success, SUCCESS_MESSAGE);
                self.schedule_dismiss(id);
                self.schedule_modal(receipt.application_id.clone());
                SubmitOutcome::Succeeded {
                    application_id: receipt.application_id,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Application submission failed");
                let id = self.notify(NotificationKind::Error, FAILURE_MESSAGE);
                self.schedule_dismiss(id);
                SubmitOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        self.record.reset();
        self.suggestions.clear();
        self.emitter.emit(IntakeEvent::RecordReset);

        outcome
    }

    // ---- private helpers ----

    fn notify(&mut self, kind: NotificationKind, message: &str) -> u64 {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.emitter.emit(IntakeEvent::NotificationShown(Notification {
            id,
            kind,
            message: message.to_string(),
        }));
        id
    }

    fn schedule_dismiss(&self, id: u64) {
        let emitter = self.emitter.clone();
        let cancel = self.timers.clone();
        let ttl = self.settings.notification_ttl;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(ttl) => {
                    if emitter.current_notification_id() == Some(id) {
                        emitter.emit(IntakeEvent::NotificationDismissed { id });
                    }
                }
            }
        });
    }

    fn schedule_modal(&self, application_id: String) {
        let emitter = self.emitter.clone();
        let cancel = self.timers.clone();
        let delay = self.settings.modal_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    emitter.emit(IntakeEvent::ModalOpened { application_id });
                }
            }
        });
    }
}

impl<G: SubmissionGateway, P: PlaceSearch> Drop for FormController<G, P> {
    fn drop(&mut self) {
        self.timers.cancel();
    }
}
