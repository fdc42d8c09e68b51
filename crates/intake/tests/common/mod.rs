#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use naamkaran_core::fields::FieldName;
use naamkaran_core::record::FormRecord;
use naamkaran_gateway::{GatewayError, PlaceSearch, PlaceSuggestion, Receipt, SubmissionGateway};
use naamkaran_intake::bus::IntakeEvent;
use naamkaran_intake::controller::{ControllerSettings, FormController};
use naamkaran_intake::suggestions::{SuggestionGateway, DEFAULT_DEBOUNCE};
use tokio::sync::broadcast;

/// Submission fake with a fixed answer and a call log.
#[derive(Clone)]
pub struct FakeCrm {
    answer: Result<String, String>,
    pub calls: Arc<AtomicUsize>,
    pub bodies: Arc<Mutex<Vec<FormRecord>>>,
}

impl FakeCrm {
    pub fn accepting(application_id: &str) -> Self {
        Self {
            answer: Ok(application_id.to_string()),
            calls: Arc::default(),
            bodies: Arc::default(),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            answer: Err(reason.to_string()),
            calls: Arc::default(),
            bodies: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SubmissionGateway for FakeCrm {
    async fn submit(&self, record: &FormRecord) -> Result<Receipt, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(record.clone());
        match &self.answer {
            Ok(id) => Ok(Receipt {
                application_id: id.clone(),
            }),
            Err(reason) => Err(GatewayError::Rejected(reason.clone())),
        }
    }
}

/// Place search fake with per-query latency and a query log.
#[derive(Clone, Default)]
pub struct FakePlaces {
    latency: HashMap<String, Duration>,
    failing: HashSet<String>,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl FakePlaces {
    /// Answer `text` only after `delay`.
    pub fn with_latency(mut self, text: &str, delay: Duration) -> Self {
        self.latency.insert(text.to_string(), delay);
        self
    }

    /// Answer `text` with a server error.
    pub fn failing_for(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl PlaceSearch for FakePlaces {
    async fn search(&self, text: &str) -> Result<Vec<PlaceSuggestion>, GatewayError> {
        self.queries.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.latency.get(text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(text) {
            return Err(GatewayError::Api {
                status: 500,
                body: "geocoder down".to_string(),
            });
        }
        Ok(vec![PlaceSuggestion {
            display_name: format!("{text}, Maharashtra, India"),
            coordinates: (73.85, 18.52),
            place_type: "city".to_string(),
        }])
    }
}

pub fn controller(crm: FakeCrm, places: FakePlaces) -> FormController<FakeCrm, FakePlaces> {
    FormController::new(
        crm,
        SuggestionGateway::new(places, DEFAULT_DEBOUNCE),
        ControllerSettings::default(),
    )
}

/// Fill every field a premium submission needs.
pub fn fill_valid(controller: &mut FormController<FakeCrm, FakePlaces>) {
    let values = [
        (FieldName::CustomerName, "Asha Rao"),
        (FieldName::Email, "asha@example.in"),
        (FieldName::WhatsappNumber, "98765 43210"),
        (FieldName::FatherName, "Ravi Rao"),
        (FieldName::MotherName, "Meera Rao"),
        (FieldName::BabyGender, "Female"),
        (FieldName::BabyBirthDate, "2024-03-14"),
        (FieldName::BabyBirthTime, "06:45"),
        (FieldName::Birthplace, "Pune"),
        (FieldName::PreferredStartingLetterType, "Alphabet Based"),
        (FieldName::PreferredStartingLetter, "A"),
        (FieldName::PreferredGod, "Ganesha"),
        (FieldName::LeadSource, "Our Website"),
    ];
    for (field, value) in values {
        controller.update_field(field, value).unwrap();
    }
    controller.select_service("astro").unwrap();
    controller.select_service("numerology").unwrap();
}

/// Everything published so far, without waiting.
pub fn drain(rx: &mut broadcast::Receiver<IntakeEvent>) -> Vec<IntakeEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
