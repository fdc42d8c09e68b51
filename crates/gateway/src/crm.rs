//! REST client for the customer registration backend.
//!
//! Wraps the two endpoints the intake form consumes, customer submission
//! and the informational image listing, using [`reqwest`].

use serde::Deserialize;

use naamkaran_core::record::FormRecord;

use crate::error::GatewayError;
use crate::http;
use crate::SubmissionGateway;

/// Path of the customer registration endpoint.
pub const SUBMIT_PATH: &str = "/customers/addCustomerWithAssignment";
/// Path of the feature image listing endpoint.
pub const IMAGES_PATH: &str = "/images";

/// HTTP client for the registration backend.
#[derive(Clone)]
pub struct CrmApi {
    client: reqwest::Client,
    base_url: String,
}

/// Proof that the backend accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Identifier the customer quotes in later correspondence.
    pub application_id: String,
}

/// Body returned by the registration endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    application_id: Option<String>,
    success: Option<bool>,
    message: Option<String>,
}

/// One informational card shown beside the form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureCard {
    #[serde(alias = "_id")]
    pub id: String,
    /// Base64-encoded image bytes (or an already-formed `data:` URI).
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub caption: String,
}

impl FeatureCard {
    /// Image source suitable for an `<img src>` attribute.
    pub fn data_uri(&self) -> String {
        if self.image.starts_with("data:") {
            self.image.clone()
        } else {
            format!("data:image/jpeg;base64,{}", self.image)
        }
    }
}

impl CrmApi {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register a customer.
    ///
    /// Sends `POST /customers/addCustomerWithAssignment` with the full
    /// record (including the derived `totalPrice`). Succeeds only for a 2xx
    /// response whose body carries a non-blank `applicationId` and does not
    /// report `success: false`.
    pub async fn submit_customer(&self, record: &FormRecord) -> Result<Receipt, GatewayError> {
        let response = self
            .client
            .post(format!("{}{SUBMIT_PATH}", self.base_url))
            .json(record)
            .send()
            .await?;

        let body: SubmitResponse = http::parse_response(response).await?;
        Self::into_receipt(body)
    }

    /// Fetch the informational feature cards.
    pub async fn list_images(&self) -> Result<Vec<FeatureCard>, GatewayError> {
        let response = self
            .client
            .get(format!("{}{IMAGES_PATH}", self.base_url))
            .send()
            .await?;

        http::parse_response(response).await
    }

    // ---- private helpers ----

    fn into_receipt(body: SubmitResponse) -> Result<Receipt, GatewayError> {
        if body.success == Some(false) {
            return Err(GatewayError::Rejected(
                body.message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }
        match body.application_id {
            Some(id) if !id.trim().is_empty() => Ok(Receipt { application_id: id }),
            _ => Err(GatewayError::MissingApplicationId),
        }
    }
}

impl SubmissionGateway for CrmApi {
    async fn submit(&self, record: &FormRecord) -> Result<Receipt, GatewayError> {
        let receipt = self.submit_customer(record).await?;
        tracing::debug!(application_id = %receipt.application_id, "Customer registered");
        Ok(receipt)
    }
}
