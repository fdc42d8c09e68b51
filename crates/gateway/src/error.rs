/// Errors from the HTTP gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote service returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body reports failure.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// A 2xx response without the expected `applicationId`.
    #[error("Response did not include an application id")]
    MissingApplicationId,
}
