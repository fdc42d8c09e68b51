mod common;

use std::time::Duration;

use assert_matches::assert_matches;

use naamkaran_core::fields::FieldName;
use naamkaran_core::record::FormRecord;
use naamkaran_core::types::FormVariant;
use naamkaran_intake::bus::IntakeEvent;
use naamkaran_intake::controller::{
    ControllerSettings, FormController, SubmitOutcome, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
use naamkaran_intake::suggestions::{SuggestionGateway, DEFAULT_DEBOUNCE};
use naamkaran_intake::view::{NotificationKind, SubmissionPhase};

use common::{controller, drain, fill_valid, FakeCrm, FakePlaces};

#[tokio::test(start_paused = true)]
async fn successful_submit_notifies_then_opens_modal() {
    let crm = FakeCrm::accepting("APP123");
    let mut form = controller(crm.clone(), FakePlaces::default());
    fill_valid(&mut form);
    assert_eq!(form.total_price(), 549);

    let outcome = form.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Succeeded {
            application_id: "APP123".to_string()
        }
    );
    assert_eq!(crm.call_count(), 1);

    let view = form.view();
    let toast = view.notification.clone().expect("success toast is shown");
    assert_eq!(toast.kind, NotificationKind::Success);
    assert_eq!(toast.message, SUCCESS_MESSAGE);
    assert!(view.submit_enabled);
    assert!(!view.overlay_visible);
    assert_eq!(view.modal, None);

    assert_eq!(form.record(), &FormRecord::default());
    assert_eq!(form.total_price(), 0);

    tokio::time::sleep(Duration::from_millis(3_001)).await;
    assert_eq!(form.view().modal.as_deref(), Some("APP123"));
    assert!(form.view().notification.is_some());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(form.view().notification, None);

    form.close_modal();
    assert_eq!(form.view().modal, None);
}

#[tokio::test(start_paused = true)]
async fn submitted_record_carries_every_field() {
    let crm = FakeCrm::accepting("APP124");
    let mut form = controller(crm.clone(), FakePlaces::default());
    fill_valid(&mut form);

    form.submit().await;

    let bodies = crm.bodies.lock().unwrap();
    let sent = &bodies[0];
    assert_eq!(sent.whatsapp_number, "9876543210");
    assert_eq!(sent.birthplace, "Pune");
    assert_eq!(sent.total_price(), 549);
}

#[tokio::test(start_paused = true)]
async fn side_effects_are_published_in_order() {
    let mut form = controller(FakeCrm::accepting("APP123"), FakePlaces::default());
    fill_valid(&mut form);
    let mut rx = form.subscribe();

    form.submit().await;

    let events = drain(&mut rx);
    assert_eq!(events.len(), 7);
    assert_eq!(events[0], IntakeEvent::ValidationStarted);
    assert_eq!(events[1], IntakeEvent::ValidationPassed);
    assert_eq!(events[2], IntakeEvent::SubmitDisabled);
    assert_eq!(events[3], IntakeEvent::OverlayShown);
    assert_eq!(events[4], IntakeEvent::SubmissionSettled { succeeded: true });
    assert_matches!(&events[5], IntakeEvent::NotificationShown(n) if n.kind == NotificationKind::Success);
    assert_eq!(events[6], IntakeEvent::RecordReset);

    tokio::time::sleep(Duration::from_secs(6)).await;
    let later = drain(&mut rx);
    assert_matches!(
        later.as_slice(),
        [IntakeEvent::ModalOpened { application_id }, IntakeEvent::NotificationDismissed { id: 1 }]
            if application_id == "APP123"
    );
}

#[tokio::test(start_paused = true)]
async fn failed_submit_shows_error_and_no_modal() {
    let crm = FakeCrm::rejecting("duplicate customer");
    let mut form = controller(crm.clone(), FakePlaces::default());
    fill_valid(&mut form);

    let mut view_rx = form.watch_view();

    let outcome = form.submit().await;
    assert_matches!(outcome, SubmitOutcome::Failed { reason } if reason.contains("duplicate customer"));
    assert!(view_rx.has_changed().unwrap());
    assert!(view_rx.borrow_and_update().notification.is_some());
    assert_eq!(crm.call_count(), 1);

    let view = form.view();
    assert_eq!(view.phase, SubmissionPhase::Idle);
    assert!(view.submit_enabled);
    assert!(!view.overlay_visible);
    let toast = view.notification.expect("error toast is shown");
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(toast.message, FAILURE_MESSAGE);

    assert_eq!(form.record(), &FormRecord::default());

    tokio::time::sleep(Duration::from_secs(6)).await;
    let view = form.view();
    assert_eq!(view.modal, None);
    assert_eq!(view.notification, None);
}

#[tokio::test(start_paused = true)]
async fn invalid_email_blocks_the_network_call() {
    let crm = FakeCrm::accepting("APP123");
    let mut form = controller(crm.clone(), FakePlaces::default());
    fill_valid(&mut form);
    form.update_field(FieldName::Email, "not-an-email").unwrap();
    let mut rx = form.subscribe();

    let outcome = form.submit().await;

    let state = assert_matches!(outcome, SubmitOutcome::Invalid(state) => state);
    assert_eq!(state.invalid_fields(), vec![FieldName::Email]);
    assert_eq!(crm.call_count(), 0);

    assert_eq!(
        drain(&mut rx),
        vec![
            IntakeEvent::ValidationStarted,
            IntakeEvent::ValidationFailed {
                fields: vec![FieldName::Email]
            },
        ]
    );

    // The customer keeps what they typed.
    assert_eq!(form.record().email, "not-an-email");
    assert_eq!(form.record().customer_name, "Asha Rao");
    assert_eq!(form.view().visible_errors, vec![FieldName::Email]);
    assert_eq!(form.view().notification, None);
}

#[tokio::test(start_paused = true)]
async fn empty_form_flags_every_required_field() {
    let crm = FakeCrm::accepting("APP123");
    let mut form = controller(crm.clone(), FakePlaces::default());

    let outcome = form.submit().await;

    let state = assert_matches!(outcome, SubmitOutcome::Invalid(state) => state);
    for field in [
        FieldName::CustomerName,
        FieldName::Email,
        FieldName::WhatsappNumber,
        FieldName::FatherName,
        FieldName::MotherName,
        FieldName::BabyGender,
        FieldName::BabyBirthDate,
        FieldName::BabyBirthTime,
        FieldName::Birthplace,
        FieldName::PreferredStartingLetterType,
        FieldName::PreferredGod,
        FieldName::SelectedServices,
    ] {
        assert!(state.has_error(field), "{field} should be flagged");
    }
    assert!(!state.has_error(FieldName::PreferredStartingLetter));
    assert!(!state.has_error(FieldName::IsTwins));
    assert_eq!(crm.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn classic_variant_does_not_require_services() {
    let crm = FakeCrm::accepting("APP200");
    let mut form = FormController::new(
        crm.clone(),
        SuggestionGateway::new(FakePlaces::default(), DEFAULT_DEBOUNCE),
        ControllerSettings {
            variant: FormVariant::Classic,
            ..ControllerSettings::default()
        },
    );
    fill_valid(&mut form);
    // Toggle both paid services back off.
    form.select_service("astro").unwrap();
    form.select_service("numerology").unwrap();
    assert_eq!(form.total_price(), 0);

    let outcome = form.submit().await;
    assert_matches!(outcome, SubmitOutcome::Succeeded { .. });
}

#[tokio::test(start_paused = true)]
async fn second_toast_survives_first_dismiss_timer() {
    let mut form = controller(FakeCrm::rejecting("down"), FakePlaces::default());

    fill_valid(&mut form);
    form.submit().await;

    tokio::time::sleep(Duration::from_secs(3)).await;
    fill_valid(&mut form);
    form.submit().await;
    let second = form.view().notification.expect("second toast").id;

    // First toast's timer expires here; the second stays up.
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(form.view().notification.map(|n| n.id), Some(second));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(form.view().notification, None);
}

#[tokio::test(start_paused = true)]
async fn dependent_fields_are_cleared_by_updates() {
    let mut form = controller(FakeCrm::accepting("APP1"), FakePlaces::default());

    form.update_field(FieldName::LeadSource, "Instagram").unwrap();
    form.update_field(FieldName::SocialMediaId, "@asha").unwrap();
    let update = form.update_field(FieldName::LeadSource, "Other").unwrap();
    assert_eq!(update.cleared, vec![FieldName::SocialMediaId, FieldName::OtherSource]);
    assert_eq!(form.record().social_media_id, "");

    form.update_field_by_name("preferredStartingLetterType", "Alphabet Based")
        .unwrap();
    form.update_field_by_name("preferredStartingLetter", "K").unwrap();
    form.update_field_by_name("preferredStartingLetterType", "Nakshatra Based")
        .unwrap();
    assert_eq!(form.record().preferred_starting_letter, "");

    assert!(form.update_field_by_name("favouriteColour", "blue").is_err());
    assert!(form.update_field(FieldName::BabyGender, "Unknown").is_err());
}
