//! Response handling shared by the HTTP clients.

use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// Ensure the response has a success status code. Returns the
/// response unchanged on success, or a [`GatewayError::Api`]
/// containing the status and body text on failure.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(GatewayError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}
