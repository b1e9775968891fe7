//! Shared HTTP client construction

use std::time::Duration;

use crate::version::error::FetchError;

const USER_AGENT: &str = concat!("wp-tasks/", env!("CARGO_PKG_VERSION"));

/// Build a client that applies `timeout` to every request
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(FetchError::Network)
}
