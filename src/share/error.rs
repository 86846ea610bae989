use thiserror::Error;

/// Failures raised while building or delivering a share link.
///
/// None of these reach the user verbatim; handlers log them and raise one
/// generic danger toast instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareError {
    /// Transport failure talking to the backend.
    #[error("request failed: {0}")]
    Request(String),

    /// Backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Response decoded but lacked the field we needed.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    /// Clipboard write was refused or is unavailable.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// Browser navigation could not be performed.
    #[error("navigation failed: {0}")]
    Navigation(String),
}

impl From<reqwest::Error> for ShareError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ShareError::Decode(err.to_string())
        } else {
            ShareError::Request(err.to_string())
        }
    }
}
