use std::time::Duration;

use naamkaran_core::types::FormVariant;

/// Intake configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a
/// backend on `localhost:3000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Base URL of the registration backend.
    pub crm_api_url: String,
    /// Full URL of the geocoding autocomplete endpoint.
    pub geocoding_api_url: String,
    pub geocoding_api_key: String,
    /// Country that place suggestions are restricted to.
    pub geocoding_country: String,
    pub variant: FormVariant,
    /// Quiet period before a birthplace query is sent.
    pub suggestion_debounce: Duration,
    /// How long a success/error toast stays visible.
    pub notification_ttl: Duration,
    /// Delay between the success toast and the application id modal.
    pub modal_delay: Duration,
}

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} has an invalid value '{value}': {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            crm_api_url: "http://localhost:3000".into(),
            geocoding_api_url: "https://api.geoapify.com/v1/geocode/autocomplete".into(),
            geocoding_api_key: String::new(),
            geocoding_country: "in".into(),
            variant: FormVariant::Premium,
            suggestion_debounce: Duration::from_millis(500),
            notification_ttl: Duration::from_secs(5),
            modal_delay: Duration::from_secs(3),
        }
    }
}

impl IntakeConfig {
    /// Load configuration from the process environment (after reading any
    /// `.env` file) with defaults.
    ///
    /// | Env Var                  | Default                                            |
    /// |--------------------------|----------------------------------------------------|
    /// | `CRM_API_URL`            | `http://localhost:3000`                            |
    /// | `GEOCODING_API_URL`      | `https://api.geoapify.com/v1/geocode/autocomplete` |
    /// | `GEOCODING_API_KEY`      | empty                                              |
    /// | `GEOCODING_COUNTRY`      | `in`                                               |
    /// | `FORM_VARIANT`           | `premium`                                          |
    /// | `SUGGESTION_DEBOUNCE_MS` | `500`                                              |
    /// | `NOTIFICATION_TTL_SECS`  | `5`                                                |
    /// | `MODAL_DELAY_SECS`       | `3`                                                |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let variant = match lookup("FORM_VARIANT") {
            Some(raw) => raw.parse().map_err(|e: naamkaran_core::error::CoreError| {
                ConfigError {
                    var: "FORM_VARIANT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.variant,
        };

        Ok(Self {
            crm_api_url: lookup("CRM_API_URL").unwrap_or(defaults.crm_api_url),
            geocoding_api_url: lookup("GEOCODING_API_URL").unwrap_or(defaults.geocoding_api_url),
            geocoding_api_key: lookup("GEOCODING_API_KEY").unwrap_or(defaults.geocoding_api_key),
            geocoding_country: lookup("GEOCODING_COUNTRY").unwrap_or(defaults.geocoding_country),
            variant,
            suggestion_debounce: duration_var(
                &lookup,
                "SUGGESTION_DEBOUNCE_MS",
                Duration::from_millis,
                defaults.suggestion_debounce,
            )?,
            notification_ttl: duration_var(
                &lookup,
                "NOTIFICATION_TTL_SECS",
                Duration::from_secs,
                defaults.notification_ttl,
            )?,
            modal_delay: duration_var(
                &lookup,
                "MODAL_DELAY_SECS",
                Duration::from_secs,
                defaults.modal_delay,
            )?,
        })
    }
}

fn duration_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    unit: fn(u64) -> Duration,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.trim().parse::<u64>().map(unit).map_err(|e| ConfigError {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
