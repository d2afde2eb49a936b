//! Proxy error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned error: {status} - {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl ProxyError {
    /// HTTP status reported by the backend, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ProxyError::UpstreamError { status, .. } => Some(*status),
            ProxyError::Http(e) => e.status().map(|s| s.as_u16()),
            ProxyError::InvalidUrl(_) => None,
        }
    }
}
