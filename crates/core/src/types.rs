//! Enumerated selections offered by the intake form.
//!
//! Every enum serializes as the exact label shown to the customer, which is
//! also the string the registration API stores.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Look up a variant of `T` by its display label.
fn parse_label<T: Copy>(
    all: &[T],
    label_of: fn(&T) -> &'static str,
    entity: &'static str,
    raw: &str,
) -> Result<T, CoreError> {
    all.iter()
        .find(|v| label_of(*v) == raw)
        .copied()
        .ok_or_else(|| CoreError::Validation(format!("'{raw}' is not a valid {entity}")))
}

// ---------------------------------------------------------------------------
// BabyGender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BabyGender {
    Male,
    Female,
}

impl BabyGender {
    pub const ALL: [BabyGender; 2] = [BabyGender::Male, BabyGender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl FromStr for BabyGender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "baby gender", s)
    }
}

// ---------------------------------------------------------------------------
// StartingLetterType
// ---------------------------------------------------------------------------

/// How the customer wants the first letter of the name chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StartingLetterType {
    #[serde(rename = "Alphabet Based")]
    AlphabetBased,
    #[serde(rename = "Nakshatra Based")]
    NakshatraBased,
    #[serde(rename = "Rashi Based")]
    RashiBased,
}

impl StartingLetterType {
    pub const ALL: [StartingLetterType; 3] = [
        StartingLetterType::AlphabetBased,
        StartingLetterType::NakshatraBased,
        StartingLetterType::RashiBased,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AlphabetBased => "Alphabet Based",
            Self::NakshatraBased => "Nakshatra Based",
            Self::RashiBased => "Rashi Based",
        }
    }
}

impl FromStr for StartingLetterType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "starting letter type", s)
    }
}

// ---------------------------------------------------------------------------
// PreferredGod
// ---------------------------------------------------------------------------

/// Deity the family would like the name to be associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PreferredGod {
    Ganesha,
    Shiva,
    Vishnu,
    Krishna,
    Rama,
    Hanuman,
    Brahma,
    Durga,
    Lakshmi,
    Saraswati,
    Parvati,
    Kali,
    Murugan,
    Ayyappa,
    Venkateswara,
    Narasimha,
    Surya,
    Jagannath,
    #[serde(rename = "Sai Baba")]
    SaiBaba,
}

impl PreferredGod {
    pub const ALL: [PreferredGod; 19] = [
        PreferredGod::Ganesha,
        PreferredGod::Shiva,
        PreferredGod::Vishnu,
        PreferredGod::Krishna,
        PreferredGod::Rama,
        PreferredGod::Hanuman,
        PreferredGod::Brahma,
        PreferredGod::Durga,
        PreferredGod::Lakshmi,
        PreferredGod::Saraswati,
        PreferredGod::Parvati,
        PreferredGod::Kali,
        PreferredGod::Murugan,
        PreferredGod::Ayyappa,
        PreferredGod::Venkateswara,
        PreferredGod::Narasimha,
        PreferredGod::Surya,
        PreferredGod::Jagannath,
        PreferredGod::SaiBaba,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ganesha => "Ganesha",
            Self::Shiva => "Shiva",
            Self::Vishnu => "Vishnu",
            Self::Krishna => "Krishna",
            Self::Rama => "Rama",
            Self::Hanuman => "Hanuman",
            Self::Brahma => "Brahma",
            Self::Durga => "Durga",
            Self::Lakshmi => "Lakshmi",
            Self::Saraswati => "Saraswati",
            Self::Parvati => "Parvati",
            Self::Kali => "Kali",
            Self::Murugan => "Murugan",
            Self::Ayyappa => "Ayyappa",
            Self::Venkateswara => "Venkateswara",
            Self::Narasimha => "Narasimha",
            Self::Surya => "Surya",
            Self::Jagannath => "Jagannath",
            Self::SaiBaba => "Sai Baba",
        }
    }
}

impl FromStr for PreferredGod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "preferred god", s)
    }
}

// ---------------------------------------------------------------------------
// LeadSource
// ---------------------------------------------------------------------------

/// Where the customer heard about the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeadSource {
    Instagram,
    Facebook,
    #[serde(rename = "Our Website")]
    OurWebsite,
    Other,
}

impl LeadSource {
    pub const ALL: [LeadSource; 4] = [
        LeadSource::Instagram,
        LeadSource::Facebook,
        LeadSource::OurWebsite,
        LeadSource::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::OurWebsite => "Our Website",
            Self::Other => "Other",
        }
    }

    /// Social platforms ask for the customer's handle on that platform.
    pub fn is_social(&self) -> bool {
        matches!(self, Self::Instagram | Self::Facebook)
    }
}

impl FromStr for LeadSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "lead source", s)
    }
}

// ---------------------------------------------------------------------------
// TwinStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TwinStatus {
    Yes,
    No,
}

impl TwinStatus {
    pub const ALL: [TwinStatus; 2] = [TwinStatus::Yes, TwinStatus::No];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl FromStr for TwinStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "twin status", s)
    }
}

// ---------------------------------------------------------------------------
// FormVariant
// ---------------------------------------------------------------------------

/// Which revision of the form is being served.
///
/// `Premium` adds paid service selection and requires at least one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVariant {
    Classic,
    #[default]
    Premium,
}

impl FormVariant {
    pub fn has_paid_services(&self) -> bool {
        matches!(self, Self::Premium)
    }
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Premium => write!(f, "premium"),
        }
    }
}

impl FromStr for FormVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "premium" => Ok(Self::Premium),
            other => Err(CoreError::Validation(format!(
                "'{other}' is not a form variant (expected 'classic' or 'premium')"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
