//! Field update reducer.
//!
//! A single-field change may clear other fields. Those side effects live in
//! [`TRANSITIONS`] rather than in ad-hoc conditionals so the full set of
//! cascades can be read (and tested) in one place.

use crate::error::CoreError;
use crate::fields::FieldName;
use crate::record::FormRecord;

/// Maximum number of digits kept in the WhatsApp number.
pub const MAX_PHONE_DIGITS: usize = 10;

/// When a [`Transition`] fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearWhen {
    /// Every update of the trigger field.
    OnUpdate,
    /// Updates whose stored value differs from the given label.
    ValueIsNot(&'static str),
}

/// `field` changed → clear `clears` when `when` holds.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub field: FieldName,
    pub when: ClearWhen,
    pub clears: &'static [FieldName],
}

/// Dependent-field cascades of the intake form.
pub const TRANSITIONS: &[Transition] = &[
    Transition {
        field: FieldName::PreferredStartingLetterType,
        when: ClearWhen::ValueIsNot(ALPHABET_BASED),
        clears: &[FieldName::PreferredStartingLetter],
    },
    Transition {
        field: FieldName::LeadSource,
        when: ClearWhen::OnUpdate,
        clears: &[FieldName::SocialMediaId, FieldName::OtherSource],
    },
];

const ALPHABET_BASED: &str = "Alphabet Based";

/// Result of one [`apply_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: FieldName,
    /// Value actually stored, after normalization.
    pub stored: String,
    /// Dependent fields cleared as a side effect.
    pub cleared: Vec<FieldName>,
    /// The birthplace changed, so place suggestions should be refreshed.
    pub refresh_suggestions: bool,
}

/// Keep only ASCII digits, truncated to [`MAX_PHONE_DIGITS`].
///
/// ```
/// use naamkaran_core::transitions::normalize_phone;
///
/// assert_eq!(normalize_phone("+91-96-991"), "9196991");
/// assert_eq!(normalize_phone("98765 43210 99"), "9876543210");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Per-field normalization applied before a value is stored.
pub fn normalize(field: FieldName, raw: &str) -> String {
    match field {
        FieldName::WhatsappNumber => normalize_phone(raw),
        _ => raw.to_string(),
    }
}

/// Fields cleared when `field` is updated to `stored`.
pub fn cascades(field: FieldName, stored: &str) -> Vec<FieldName> {
    TRANSITIONS
        .iter()
        .filter(|t| t.field == field)
        .filter(|t| match t.when {
            ClearWhen::OnUpdate => true,
            ClearWhen::ValueIsNot(label) => stored != label,
        })
        .flat_map(|t| t.clears.iter().copied())
        .collect()
}

/// Normalize `raw`, store it into `field`, then apply the cascades.
///
/// Nothing is mutated when the value cannot be stored.
pub fn apply_update(
    record: &mut FormRecord,
    field: FieldName,
    raw: &str,
) -> Result<FieldUpdate, CoreError> {
    let normalized = normalize(field, raw);
    record.set_value(field, &normalized)?;

    let stored = record.value(field);
    let cleared = cascades(field, &stored);
    for dependent in &cleared {
        record.clear(*dependent);
    }

    Ok(FieldUpdate {
        field,
        stored,
        cleared,
        refresh_suggestions: field == FieldName::Birthplace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LeadSource, StartingLetterType};

    #[test]
    fn alphabet_label_matches_enum() {
        assert_eq!(StartingLetterType::AlphabetBased.label(), ALPHABET_BASED);
    }

    #[test]
    fn phone_keeps_only_ten_digits() {
        assert_eq!(normalize_phone("+91-96-991"), "9196991");
        assert_eq!(normalize_phone("abc"), "");
        assert_eq!(normalize_phone("1234567890123"), "1234567890");
        assert_eq!(normalize_phone("٣٣٣ 12"), "12");
    }

    #[test]
    fn phone_update_is_normalized_before_storing() {
        let mut record = FormRecord::default();
        let update = apply_update(&mut record, FieldName::WhatsappNumber, "(987) 654-3210 ext 5")
            .unwrap();
        assert_eq!(update.stored, "9876543210");
        assert_eq!(record.whatsapp_number, "9876543210");
    }

    #[test]
    fn non_alphabet_letter_type_clears_letter() {
        let mut record = FormRecord::default();
        apply_update(&mut record, FieldName::PreferredStartingLetterType, "Alphabet Based")
            .unwrap();
        apply_update(&mut record, FieldName::PreferredStartingLetter, "A").unwrap();

        let update =
            apply_update(&mut record, FieldName::PreferredStartingLetterType, "Rashi Based")
                .unwrap();
        assert_eq!(update.cleared, vec![FieldName::PreferredStartingLetter]);
        assert_eq!(record.preferred_starting_letter, "");
    }

    #[test]
    fn alphabet_letter_type_keeps_letter() {
        let mut record = FormRecord::default();
        apply_update(&mut record, FieldName::PreferredStartingLetter, "S").unwrap();
        let update =
            apply_update(&mut record, FieldName::PreferredStartingLetterType, "Alphabet Based")
                .unwrap();
        assert!(update.cleared.is_empty());
        assert_eq!(record.preferred_starting_letter, "S");
    }

    #[test]
    fn lead_source_change_clears_both_dependents() {
        let mut record = FormRecord::default();
        apply_update(&mut record, FieldName::LeadSource, "Instagram").unwrap();
        apply_update(&mut record, FieldName::SocialMediaId, "@asha").unwrap();

        let update = apply_update(&mut record, FieldName::LeadSource, "Other").unwrap();
        assert_eq!(
            update.cleared,
            vec![FieldName::SocialMediaId, FieldName::OtherSource]
        );
        assert_eq!(record.lead_source, Some(LeadSource::Other));
        assert_eq!(record.social_media_id, "");
        assert_eq!(record.other_source, "");
    }

    #[test]
    fn birthplace_requests_suggestions() {
        let mut record = FormRecord::default();
        let update = apply_update(&mut record, FieldName::Birthplace, " Pune ").unwrap();
        assert!(update.refresh_suggestions);
        assert_eq!(record.birthplace, " Pune ");

        let update = apply_update(&mut record, FieldName::FatherName, "Ravi").unwrap();
        assert!(!update.refresh_suggestions);
    }

    #[test]
    fn rejected_value_skips_cascades() {
        let mut record = FormRecord::default();
        apply_update(&mut record, FieldName::LeadSource, "Facebook").unwrap();
        apply_update(&mut record, FieldName::SocialMediaId, "asha.k").unwrap();

        assert!(apply_update(&mut record, FieldName::LeadSource, "Radio").is_err());
        assert_eq!(record.social_media_id, "asha.k");
    }
}
