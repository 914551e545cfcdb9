use thiserror::Error;

/// Anything that went wrong talking to the remote API.
///
/// The concrete cause is for the log; the UI shows a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be turned into a usable URL.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection, body encoding or decoding failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
}
