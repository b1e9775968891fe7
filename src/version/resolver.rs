//! Version constraint resolution
//!
//! Turns a constraint such as `*` or `v4.9.*` into a concrete release number.
//! A bare `*` is answered by the version-check API alone; anything else is
//! matched against the stable entries of the release archive, and the
//! highest match wins.

use std::sync::Arc;

use tracing::debug;

use crate::version::constraint::VersionConstraint;
use crate::version::error::ResolutionError;
use crate::version::registry::ReleaseRegistry;
use crate::version::semver::find_highest;
use crate::version::types::ReleaseVersion;

pub struct VersionResolver {
    registry: Arc<dyn ReleaseRegistry>,
}

impl VersionResolver {
    pub fn new(registry: Arc<dyn ReleaseRegistry>) -> Self {
        Self { registry }
    }

    pub async fn resolve(&self, constraint: &str) -> Result<ReleaseVersion, ResolutionError> {
        let constraint = VersionConstraint::parse(constraint)?;

        if constraint.is_latest() {
            let latest = self.registry.fetch_latest_version().await?;
            debug!("Resolved * to latest release {}", latest);
            return Ok(ReleaseVersion::new(latest));
        }

        let catalog = self.registry.fetch_release_catalog().await?;
        let candidates = catalog.stable().filter(|v| constraint.matches(v));

        let resolved = find_highest(candidates).ok_or_else(|| ResolutionError::NoMatch {
            constraint: constraint.as_str().to_string(),
        })?;

        debug!("Resolved {} to {}", constraint.as_str(), resolved);
        Ok(ReleaseVersion::new(resolved))
    }
}
