//! Release archive scraping
//!
//! The release archive page links every published build as
//! `https://wordpress.org/wordpress-<version>.zip`, next to tarballs,
//! checksums, IIS packages and the old multi-user builds. Only the plain zip
//! links carry a usable release number.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::version::types::ReleaseCatalog;

static ZIP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href\s*=\s*["']https?://wordpress\.org/wordpress-([^"'>]+?)\.zip["']"#)
        .expect("zip link pattern is valid")
});

/// Builds that are not plain core releases
const EXCLUDED_MARKERS: [&str; 2] = ["IIS", "mu"];

/// Extract release numbers from the release archive HTML, in page order.
pub fn extract_release_versions(html: &str) -> ReleaseCatalog {
    let versions = ZIP_LINK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|token| {
            let excluded = EXCLUDED_MARKERS.iter().any(|marker| token.contains(marker));
            if excluded {
                debug!("Skipping non-core build {}", token);
            }
            !excluded
        });

    ReleaseCatalog::new(versions)
}
