use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Network(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Invalid version constraint: {0:?}")]
    InvalidConstraint(String),

    #[error("No released WordPress version satisfies {constraint:?}")]
    NoMatch { constraint: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
