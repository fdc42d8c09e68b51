//! Field catalogue for the intake form.
//!
//! [`FieldName`] is the key used by updates, the transition table and the
//! validation map. Its string form is the camelCase key of the JSON body
//! sent to the registration API.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Every addressable field of a [`FormRecord`](crate::record::FormRecord).
///
/// `SelectedServices` is only changed through service toggling, never
/// through a text update, but it still carries a validation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    CustomerName,
    Email,
    WhatsappNumber,
    FatherName,
    MotherName,
    BabyGender,
    BabyBirthDate,
    BabyBirthTime,
    Birthplace,
    PreferredStartingLetterType,
    PreferredStartingLetter,
    PreferredGod,
    ReferenceName,
    AdditionalPreferences,
    LeadSource,
    SocialMediaId,
    OtherSource,
    IsTwins,
    SelectedServices,
}

impl FieldName {
    pub const ALL: [FieldName; 19] = [
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
        FieldName::PreferredStartingLetter,
        FieldName::PreferredGod,
        FieldName::ReferenceName,
        FieldName::AdditionalPreferences,
        FieldName::LeadSource,
        FieldName::SocialMediaId,
        FieldName::OtherSource,
        FieldName::IsTwins,
        FieldName::SelectedServices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerName => "customerName",
            Self::Email => "email",
            Self::WhatsappNumber => "whatsappNumber",
            Self::FatherName => "fatherName",
            Self::MotherName => "motherName",
            Self::BabyGender => "babyGender",
            Self::BabyBirthDate => "babyBirthDate",
            Self::BabyBirthTime => "babyBirthTime",
            Self::Birthplace => "birthplace",
            Self::PreferredStartingLetterType => "preferredStartingLetterType",
            Self::PreferredStartingLetter => "preferredStartingLetter",
            Self::PreferredGod => "preferredGod",
            Self::ReferenceName => "referenceName",
            Self::AdditionalPreferences => "additionalPreferences",
            Self::LeadSource => "leadSource",
            Self::SocialMediaId => "socialMediaId",
            Self::OtherSource => "otherSource",
            Self::IsTwins => "isTwins",
            Self::SelectedServices => "selectedServices",
        }
    }

    /// Inline message rendered under the field when its error flag is set.
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::CustomerName => "Please enter your name",
            Self::Email => "Please enter a valid email address",
            Self::WhatsappNumber => "Please enter a valid 10-digit WhatsApp number",
            Self::FatherName => "Please enter the father's name",
            Self::MotherName => "Please enter the mother's name",
            Self::BabyGender => "Please select the baby's gender",
            Self::BabyBirthDate => "Please select the birth date",
            Self::BabyBirthTime => "Please select the birth time",
            Self::Birthplace => "Please enter the birthplace",
            Self::PreferredStartingLetterType => "Please select a starting letter type",
            Self::PreferredStartingLetter => "Please enter the preferred starting letter",
            Self::PreferredGod => "Please select a preferred god",
            Self::ReferenceName => "Invalid reference name",
            Self::AdditionalPreferences => "Invalid additional preferences",
            Self::LeadSource => "Please select where you heard about us",
            Self::SocialMediaId => "Please enter your social media ID",
            Self::OtherSource => "Please tell us where you heard about us",
            Self::IsTwins => "Please tell us whether the babies are twins",
            Self::SelectedServices => "Please select at least one service",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| CoreError::NotFound {
                entity: "field",
                id: s.to_string(),
            })
    }
}
