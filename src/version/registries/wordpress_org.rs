//! wordpress.org registry implementation
//!
//! Two endpoints are involved:
//! - the version-check API, whose first offer is the latest stable release
//! - the release archive page, scraped for every published zip

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_RELEASE_ARCHIVE_URL, DEFAULT_VERSION_CHECK_URL, FETCH_TIMEOUT_MS};
use crate::version::catalog::extract_release_versions;
use crate::version::error::FetchError;
use crate::version::registry::ReleaseRegistry;
use crate::version::types::ReleaseCatalog;

/// Response from the version-check API
#[derive(Debug, Deserialize)]
struct VersionCheckResponse {
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct Offer {
    version: String,
}

/// Registry implementation backed by wordpress.org
pub struct WordPressOrgRegistry {
    client: reqwest::Client,
    version_check_url: String,
    release_archive_url: String,
}

impl WordPressOrgRegistry {
    /// Creates a new WordPressOrgRegistry with custom endpoint URLs
    pub fn new(
        version_check_url: &str,
        release_archive_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: crate::http::build_client(timeout)?,
            version_check_url: version_check_url.to_string(),
            release_archive_url: release_archive_url.to_string(),
        })
    }

    /// Creates a registry pointing at the public wordpress.org endpoints
    pub fn official() -> Result<Self, FetchError> {
        Self::new(
            DEFAULT_VERSION_CHECK_URL,
            DEFAULT_RELEASE_ARCHIVE_URL,
            Duration::from_millis(FETCH_TIMEOUT_MS),
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("wordpress.org returned status {}: {}", status, url);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl ReleaseRegistry for WordPressOrgRegistry {
    async fn fetch_latest_version(&self) -> Result<String, FetchError> {
        let response = self.get(&self.version_check_url).await?;

        let body: VersionCheckResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                return FetchError::from(e);
            }
            warn!("Failed to parse version-check response: {}", e);
            FetchError::InvalidResponse(e.to_string())
        })?;

        let latest = body
            .offers
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::InvalidResponse("No offers in version-check response".to_string()))?;

        debug!("Latest advertised release is {}", latest.version);
        Ok(latest.version)
    }

    async fn fetch_release_catalog(&self) -> Result<ReleaseCatalog, FetchError> {
        let response = self.get(&self.release_archive_url).await?;
        let html = response.text().await?;

        let catalog = extract_release_versions(&html);
        if catalog.is_empty() {
            warn!("No release links found at {}", self.release_archive_url);
            return Err(FetchError::InvalidResponse(format!(
                "No release links found at {}",
                self.release_archive_url
            )));
        }

        debug!("Release archive lists {} builds", catalog.len());
        Ok(catalog)
    }
}
