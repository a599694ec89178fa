use thiserror::Error;

/// Why a player page could not be acquired. Terminal for that page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Player page request failed with {status} ({url})")]
    Status { status: u16, url: String },

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// HTTP status for non-2xx responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
