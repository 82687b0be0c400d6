use thiserror::Error;

/// Failure of a single media API step.
///
/// Values are cloneable so a failure can be held inside the orchestrator's
/// status and fanned out to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response, or the response was not HTTP 200.
    #[error("bad response from {url}: {message}")]
    BadResponse {
        url: String,
        status: Option<u16>,
        message: String,
    },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
    /// A list endpoint returned nothing where at least one element was required.
    #[error("server returned no {resource}")]
    EmptyResult { resource: String },
}

impl FetchError {
    pub fn bad_status(url: impl Into<String>, status: u16) -> Self {
        Self::BadResponse {
            url: url.into(),
            status: Some(status),
            message: format!("unexpected HTTP status {status}"),
        }
    }

    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadResponse {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn empty(resource: impl Into<String>) -> Self {
        Self::EmptyResult {
            resource: resource.into(),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::BadResponse { status, .. } => *status,
            _ => None,
        }
    }
}
