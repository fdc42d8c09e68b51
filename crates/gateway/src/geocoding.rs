//! Geocoding autocomplete client.
//!
//! Queries a GeoJSON autocomplete endpoint (Geoapify-compatible) restricted
//! to a single country and converts each returned feature into a
//! [`PlaceSuggestion`].

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::http;
use crate::PlaceSearch;

/// Place type shown when the service does not classify a result.
pub const DEFAULT_PLACE_TYPE: &str = "Location";

/// A candidate birthplace offered to the customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestion {
    /// Human-readable, fully formatted place name.
    pub display_name: String,
    /// `(longitude, latitude)` in WGS84.
    pub coordinates: (f64, f64),
    pub place_type: String,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    formatted: Option<String>,
    #[serde(default)]
    result_type: Option<String>,
}

/// A GeoJSON position may carry an altitude after longitude and latitude.
#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

impl Feature {
    /// `None` when the feature has no name or no two-dimensional position.
    fn into_suggestion(self) -> Option<PlaceSuggestion> {
        let display_name = self
            .properties
            .formatted
            .filter(|name| !name.trim().is_empty())?;
        let coordinates = match self.geometry?.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return None,
        };
        let place_type = self
            .properties
            .result_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLACE_TYPE.to_string());
        Some(PlaceSuggestion {
            display_name,
            coordinates,
            place_type,
        })
    }
}

/// Convert every usable feature, skipping malformed ones.
fn into_suggestions(collection: FeatureCollection) -> Vec<PlaceSuggestion> {
    let total = collection.features.len();
    let places: Vec<PlaceSuggestion> = collection
        .features
        .into_iter()
        .filter_map(Feature::into_suggestion)
        .collect();
    if places.len() < total {
        tracing::debug!(
            skipped = total - places.len(),
            "Skipped features without a name or position"
        );
    }
    places
}

// ---------------------------------------------------------------------------
// GeocodingApi
// ---------------------------------------------------------------------------

/// HTTP client for the autocomplete endpoint.
#[derive(Clone)]
pub struct GeocodingApi {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    country_code: String,
}

impl GeocodingApi {
    /// * `endpoint`     - full autocomplete URL, e.g.
    ///   `https://api.geoapify.com/v1/geocode/autocomplete`.
    /// * `api_key`      - key sent as the `apiKey` query parameter.
    /// * `country_code` - ISO 3166-1 alpha-2 code results are restricted to.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            country_code: country_code.into().to_lowercase(),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Issue one autocomplete query for `text`.
    pub async fn autocomplete(&self, text: &str) -> Result<Vec<PlaceSuggestion>, GatewayError> {
        let filter = format!("countrycode:{}", self.country_code);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("text", text),
                ("filter", filter.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let collection: FeatureCollection = http::parse_response(response).await?;
        Ok(into_suggestions(collection))
    }
}

impl PlaceSearch for GeocodingApi {
    async fn search(&self, text: &str) -> Result<Vec<PlaceSuggestion>, GatewayError> {
        self.autocomplete(text).await
    }
}
