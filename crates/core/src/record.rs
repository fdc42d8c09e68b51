//! The working state of one in-progress intake submission.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use crate::error::CoreError;
use crate::fields::FieldName;
use crate::pricing;
use crate::types::{BabyGender, LeadSource, PreferredGod, StartingLetterType, TwinStatus};

/// Date format produced by a browser `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format produced by a browser `<input type="time">`.
pub const TIME_FORMAT: &str = "%H:%M";

/// Everything the customer has entered so far.
///
/// Selections that have not been made yet are `None`. A fresh record
/// (`FormRecord::default()`) is entirely empty. The total price is not a
/// field: it is derived from `selected_services` on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    pub customer_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub father_name: String,
    pub mother_name: String,
    pub baby_gender: Option<BabyGender>,
    pub baby_birth_date: Option<NaiveDate>,
    pub baby_birth_time: Option<NaiveTime>,
    pub birthplace: String,
    pub preferred_starting_letter_type: Option<StartingLetterType>,
    pub preferred_starting_letter: String,
    pub preferred_god: Option<PreferredGod>,
    pub reference_name: String,
    pub additional_preferences: String,
    pub lead_source: Option<LeadSource>,
    pub social_media_id: String,
    pub other_source: String,
    pub is_twins: Option<TwinStatus>,
    selected_services: BTreeSet<String>,
}

impl FormRecord {
    /// Current value of `field` as the form control would display it.
    ///
    /// Unselected choices render as the empty string; services render as a
    /// comma-separated id list.
    pub fn value(&self, field: FieldName) -> String {
        match field {
            FieldName::CustomerName => self.customer_name.clone(),
            FieldName::Email => self.email.clone(),
            FieldName::WhatsappNumber => self.whatsapp_number.clone(),
            FieldName::FatherName => self.father_name.clone(),
            FieldName::MotherName => self.mother_name.clone(),
            FieldName::BabyGender => label_or_blank(self.baby_gender.map(|v| v.label())),
            FieldName::BabyBirthDate => self
                .baby_birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            FieldName::BabyBirthTime => self
                .baby_birth_time
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
            FieldName::Birthplace => self.birthplace.clone(),
            FieldName::PreferredStartingLetterType => {
                label_or_blank(self.preferred_starting_letter_type.map(|v| v.label()))
            }
            FieldName::PreferredStartingLetter => self.preferred_starting_letter.clone(),
            FieldName::PreferredGod => label_or_blank(self.preferred_god.map(|v| v.label())),
            FieldName::ReferenceName => self.reference_name.clone(),
            FieldName::AdditionalPreferences => self.additional_preferences.clone(),
            FieldName::LeadSource => label_or_blank(self.lead_source.map(|v| v.label())),
            FieldName::SocialMediaId => self.social_media_id.clone(),
            FieldName::OtherSource => self.other_source.clone(),
            FieldName::IsTwins => label_or_blank(self.is_twins.map(|v| v.label())),
            FieldName::SelectedServices => self
                .selected_services
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Store an already-normalized value into `field`.
    ///
    /// Choice, date and time fields are parsed first; on a parse failure the
    /// record is left untouched. A blank value clears a choice.
    pub fn set_value(&mut self, field: FieldName, value: &str) -> Result<(), CoreError> {
        match field {
            FieldName::CustomerName => self.customer_name = value.to_string(),
            FieldName::Email => self.email = value.to_string(),
            FieldName::WhatsappNumber => self.whatsapp_number = value.to_string(),
            FieldName::FatherName => self.father_name = value.to_string(),
            FieldName::MotherName => self.mother_name = value.to_string(),
            FieldName::BabyGender => self.baby_gender = parse_choice(value)?,
            FieldName::BabyBirthDate => self.baby_birth_date = parse_date(value)?,
            FieldName::BabyBirthTime => self.baby_birth_time = parse_time(value)?,
            FieldName::Birthplace => self.birthplace = value.to_string(),
            FieldName::PreferredStartingLetterType => {
                self.preferred_starting_letter_type = parse_choice(value)?
            }
            FieldName::PreferredStartingLetter => {
                self.preferred_starting_letter = value.to_string()
            }
            FieldName::PreferredGod => self.preferred_god = parse_choice(value)?,
            FieldName::ReferenceName => self.reference_name = value.to_string(),
            FieldName::AdditionalPreferences => self.additional_preferences = value.to_string(),
            FieldName::LeadSource => self.lead_source = parse_choice(value)?,
            FieldName::SocialMediaId => self.social_media_id = value.to_string(),
            FieldName::OtherSource => self.other_source = value.to_string(),
            FieldName::IsTwins => self.is_twins = parse_choice(value)?,
            FieldName::SelectedServices => {
                return Err(CoreError::Validation(
                    "selectedServices can only be changed by toggling a service".to_string(),
                ))
            }
        }
        Ok(())
    }

    /// Reset `field` to its empty default.
    pub fn clear(&mut self, field: FieldName) {
        match field {
            FieldName::CustomerName => self.customer_name.clear(),
            FieldName::Email => self.email.clear(),
            FieldName::WhatsappNumber => self.whatsapp_number.clear(),
            FieldName::FatherName => self.father_name.clear(),
            FieldName::MotherName => self.mother_name.clear(),
            FieldName::BabyGender => self.baby_gender = None,
            FieldName::BabyBirthDate => self.baby_birth_date = None,
            FieldName::BabyBirthTime => self.baby_birth_time = None,
            FieldName::Birthplace => self.birthplace.clear(),
            FieldName::PreferredStartingLetterType => self.preferred_starting_letter_type = None,
            FieldName::PreferredStartingLetter => self.preferred_starting_letter.clear(),
            FieldName::PreferredGod => self.preferred_god = None,
            FieldName::ReferenceName => self.reference_name.clear(),
            FieldName::AdditionalPreferences => self.additional_preferences.clear(),
            FieldName::LeadSource => self.lead_source = None,
            FieldName::SocialMediaId => self.social_media_id.clear(),
            FieldName::OtherSource => self.other_source.clear(),
            FieldName::IsTwins => self.is_twins = None,
            FieldName::SelectedServices => self.selected_services.clear(),
        }
    }

    /// Return every field to its empty default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected_services(&self) -> impl Iterator<Item = &str> {
        self.selected_services.iter().map(String::as_str)
    }

    pub fn is_service_selected(&self, id: &str) -> bool {
        self.selected_services.contains(id)
    }

    /// Add `id` to the selection if absent, remove it if present.
    ///
    /// Returns whether the service is selected afterwards. Ids outside the
    /// catalogue are rejected.
    pub fn toggle_service(&mut self, id: &str) -> Result<bool, CoreError> {
        let service = pricing::require_service(id)?;
        if self.selected_services.remove(service.id) {
            Ok(false)
        } else {
            self.selected_services.insert(service.id.to_string());
            Ok(true)
        }
    }

    /// Derived total of the selected services.
    pub fn total_price(&self) -> u32 {
        pricing::total_price(self.selected_services())
    }
}

fn label_or_blank(label: Option<&'static str>) -> String {
    label.unwrap_or_default().to_string()
}

fn parse_choice<T>(value: &str) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some)
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|e| CoreError::Validation(format!("'{value}' is not a valid date: {e}")))
}

fn parse_time(value: &str) -> Result<Option<NaiveTime>, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(Some)
        .map_err(|e| CoreError::Validation(format!("'{value}' is not a valid time: {e}")))
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// JSON body expected by `POST /customers/addCustomerWithAssignment`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerBody<'a> {
    customer_name: &'a str,
    email: &'a str,
    whatsapp_number: &'a str,
    father_name: &'a str,
    mother_name: &'a str,
    baby_gender: String,
    baby_birth_date: String,
    baby_birth_time: String,
    birthplace: &'a str,
    preferred_starting_letter_type: String,
    preferred_starting_letter: &'a str,
    preferred_god: String,
    reference_name: &'a str,
    additional_preferences: &'a str,
    lead_source: String,
    social_media_id: &'a str,
    other_source: &'a str,
    is_twins: String,
    selected_services: Vec<&'a str>,
    total_price: u32,
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CustomerBody {
            customer_name: &self.customer_name,
            email: &self.email,
            whatsapp_number: &self.whatsapp_number,
            father_name: &self.father_name,
            mother_name: &self.mother_name,
            baby_gender: self.value(FieldName::BabyGender),
            baby_birth_date: self.value(FieldName::BabyBirthDate),
            baby_birth_time: self.value(FieldName::BabyBirthTime),
            birthplace: &self.birthplace,
            preferred_starting_letter_type: self.value(FieldName::PreferredStartingLetterType),
            preferred_starting_letter: &self.preferred_starting_letter,
            preferred_god: self.value(FieldName::PreferredGod),
            reference_name: &self.reference_name,
            additional_preferences: &self.additional_preferences,
            lead_source: self.value(FieldName::LeadSource),
            social_media_id: &self.social_media_id,
            other_source: &self.other_source,
            is_twins: self.value(FieldName::IsTwins),
            selected_services: self.selected_services().collect(),
            total_price: self.total_price(),
        }
        .serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
