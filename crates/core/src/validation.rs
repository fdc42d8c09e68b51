//! Submit-time validation rules. Pure logic, no I/O.
//!
//! [`validate`] recomputes the error flag of every field from scratch, so a
//! [`ValidationState`] is never partially stale.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::fields::FieldName;
use crate::record::FormRecord;
use crate::transitions::MAX_PHONE_DIGITS;
use crate::types::{FormVariant, LeadSource, StartingLetterType};

/// `local@domain.tld` with a TLD of at least two letters.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Fields that must be non-blank regardless of any other field.
const ALWAYS_REQUIRED: &[FieldName] = &[
    FieldName::CustomerName,
    FieldName::FatherName,
    FieldName::MotherName,
    FieldName::Birthplace,
    FieldName::BabyGender,
    FieldName::BabyBirthDate,
    FieldName::BabyBirthTime,
    FieldName::PreferredStartingLetterType,
    FieldName::PreferredGod,
];

// ---------------------------------------------------------------------------
// ValidationState
// ---------------------------------------------------------------------------

/// Per-field error flags for every field in [`FieldName::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationState {
    flags: BTreeMap<FieldName, bool>,
}

impl ValidationState {
    /// A state with no errors.
    pub fn clean() -> Self {
        Self {
            flags: FieldName::ALL.iter().map(|f| (*f, false)).collect(),
        }
    }

    pub fn has_error(&self, field: FieldName) -> bool {
        self.flags.get(&field).copied().unwrap_or(false)
    }

    /// True when no flag is set; the only state in which a submit proceeds.
    pub fn is_valid(&self) -> bool {
        self.flags.values().all(|has_error| !has_error)
    }

    /// Fields currently flagged, in catalogue order.
    pub fn invalid_fields(&self) -> Vec<FieldName> {
        self.flags
            .iter()
            .filter(|(_, has_error)| **has_error)
            .map(|(field, _)| *field)
            .collect()
    }

    /// Inline message for `field`, if it is flagged.
    pub fn message(&self, field: FieldName) -> Option<&'static str> {
        self.has_error(field).then(|| field.error_message())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, bool)> + '_ {
        self.flags.iter().map(|(f, e)| (*f, *e))
    }

    fn flag(&mut self, field: FieldName, has_error: bool) {
        self.flags.insert(field, has_error);
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::clean()
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether `email` has a `local@domain.tld` shape (after trimming).
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Evaluate every rule against `record`.
pub fn validate(record: &FormRecord, variant: FormVariant) -> ValidationState {
    let mut state = ValidationState::clean();

    for field in ALWAYS_REQUIRED {
        state.flag(*field, is_blank(&record.value(*field)));
    }

    state.flag(
        FieldName::Email,
        is_blank(&record.email) || !is_valid_email(&record.email),
    );

    let phone = record.whatsapp_number.trim();
    state.flag(
        FieldName::WhatsappNumber,
        phone.is_empty() || phone.chars().count() < MAX_PHONE_DIGITS,
    );

    let letter_required =
        record.preferred_starting_letter_type == Some(StartingLetterType::AlphabetBased);
    state.flag(
        FieldName::PreferredStartingLetter,
        letter_required && is_blank(&record.preferred_starting_letter),
    );

    let handle_required = record.lead_source.is_some_and(|s| s.is_social());
    state.flag(
        FieldName::SocialMediaId,
        handle_required && is_blank(&record.social_media_id),
    );

    let other_required = record.lead_source == Some(LeadSource::Other);
    state.flag(
        FieldName::OtherSource,
        other_required && is_blank(&record.other_source),
    );

    if variant.has_paid_services() {
        state.flag(
            FieldName::SelectedServices,
            record.selected_services().next().is_none(),
        );
    }

    state
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
