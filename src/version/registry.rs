//! Registry trait for fetching WordPress release information

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;
use crate::version::types::ReleaseCatalog;

/// Trait for fetching release data from a remote source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseRegistry: Send + Sync {
    /// Fetches the latest stable release number, verbatim as advertised
    async fn fetch_latest_version(&self) -> Result<String, FetchError>;

    /// Fetches every published release number
    ///
    /// # Returns
    /// * `Ok(ReleaseCatalog)` - Release numbers in listing order, pre-releases included
    /// * `Err(FetchError)` - If the fetch or the parse fails
    async fn fetch_release_catalog(&self) -> Result<ReleaseCatalog, FetchError>;
}
