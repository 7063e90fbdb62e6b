use tourbook_core::error::CoreError;

/// Errors from the admin client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },

    /// A local rule rejected the action before any request was made.
    #[error(transparent)]
    Core(#[from] CoreError),
}
