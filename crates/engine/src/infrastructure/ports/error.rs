//! Error types for port operations.

/// Inventory API errors with context for debugging.
///
/// Surfaced opaquely to callers; the engine never decomposes or retries them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("Request to {endpoint} failed: {message}")]
    Request {
        endpoint: String,
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("Inventory API returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Could not decode response from {endpoint}: {message}")]
    Decode {
        endpoint: String,
        message: String,
    },
}

impl ApiError {
    pub fn request(endpoint: impl Into<String>, message: impl ToString) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    pub fn status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }
}
