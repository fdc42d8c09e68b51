//! HTTP adapters for the collaborators of the intake form.
//!
//! Each gateway wraps exactly one external dependency: the customer
//! registration API ([`crm`]) and the geocoding autocomplete service
//! ([`geocoding`]). The traits below are the seams the intake controller
//! is written against, so tests can substitute in-memory fakes.

use std::future::Future;

use naamkaran_core::record::FormRecord;

pub mod crm;
pub mod error;
pub mod geocoding;
mod http;

pub use crm::{CrmApi, FeatureCard, Receipt};
pub use error::GatewayError;
pub use geocoding::{GeocodingApi, PlaceSuggestion};

/// Registers a completed form with the backend.
pub trait SubmissionGateway: Send + Sync {
    /// Submit `record` and return the server-assigned receipt.
    fn submit(
        &self,
        record: &FormRecord,
    ) -> impl Future<Output = Result<Receipt, GatewayError>> + Send;
}

/// Turns free text into candidate places.
pub trait PlaceSearch: Send + Sync + 'static {
    fn search(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<PlaceSuggestion>, GatewayError>> + Send;
}
