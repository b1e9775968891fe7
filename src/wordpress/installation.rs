//! Installed WordPress detection
//!
//! `wp-includes/version.php` exists exactly when core is installed, and it
//! assigns the release number to `$wp_version`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::VERSION_SENTINEL;
use crate::version::types::ReleaseVersion;
use crate::wordpress::error::FsError;

static WP_VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*\$wp_version\s*=\s*['"]([^'"]+)['"]\s*;"#)
        .expect("wp_version pattern is valid")
});

/// A WordPress project root
#[derive(Debug, Clone)]
pub struct Installation {
    root: PathBuf,
}

impl Installation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version_file(&self) -> PathBuf {
        self.root.join(VERSION_SENTINEL)
    }

    pub fn is_installed(&self) -> bool {
        self.version_file().is_file()
    }

    /// Read the installed release number, `None` when core is absent
    pub fn installed_version(&self) -> Result<Option<ReleaseVersion>, FsError> {
        let path = self.version_file();
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| FsError::Io {
            path: path.clone(),
            source,
        })?;

        parse_wp_version(&content)
            .map(|v| Some(ReleaseVersion::new(v)))
            .ok_or(FsError::VersionFile { path })
    }
}

/// Extract the `$wp_version` assignment from `version.php`
pub fn parse_wp_version(content: &str) -> Option<&str> {
    WP_VERSION_ASSIGNMENT
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
