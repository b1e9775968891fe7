use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Endpoints
// =============================================================================

/// Version-check API; the first offer is the latest stable release
pub const DEFAULT_VERSION_CHECK_URL: &str = "https://api.wordpress.org/core/version-check/1.7/";

/// Release archive page listing every published build
pub const DEFAULT_RELEASE_ARCHIVE_URL: &str = "https://wordpress.org/download/release-archive/";

/// Secret key service returning PHP `define()` lines
pub const DEFAULT_SALTS_URL: &str = "https://api.wordpress.org/secret-key/1.1/salt/";

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for each HTTP request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for each `wp core download` invocation in milliseconds (10 minutes)
pub const DOWNLOAD_TIMEOUT_MS: u64 = 600_000;

// =============================================================================
// Filesystem layout
// =============================================================================

/// Presence of this file means WordPress is installed
pub const VERSION_SENTINEL: &str = "wp-includes/version.php";

/// Config file looked up in the project root
pub const DEFAULT_CONFIG_FILE: &str = "wp-tasks.json";

/// Task configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TasksConfig {
    pub endpoints: EndpointsConfig,
    pub fetch_timeout_ms: u64,
    pub download_timeout_ms: u64,
    /// wp-cli executable, relative paths resolve against the project root
    pub wp_cli: PathBuf,
    /// Parent of scratch directories, defaults to the system temp dir
    pub scratch_dir: Option<PathBuf>,
    pub salts_file: PathBuf,
    pub writable_dirs: Vec<PathBuf>,
    pub prune: PruneConfig,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointsConfig::default(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            download_timeout_ms: DOWNLOAD_TIMEOUT_MS,
            wp_cli: PathBuf::from("./vendor/bin/wp"),
            scratch_dir: None,
            salts_file: PathBuf::from(".salts.php"),
            writable_dirs: vec![PathBuf::from("wp-content/uploads")],
            prune: PruneConfig::default(),
        }
    }
}

impl TasksConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_millis(self.download_timeout_ms)
    }

    /// Parent of scratch directories; a relative `scratchDir` is taken
    /// from the project root
    pub fn scratch_root(&self, root: &Path) -> PathBuf {
        match &self.scratch_dir {
            Some(dir) => root.join(dir),
            None => std::env::temp_dir(),
        }
    }

    /// Load configuration for a project.
    ///
    /// An explicit path must exist. Without one, `wp-tasks.json` in the
    /// project root is used when present, and defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Remote endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointsConfig {
    pub version_check: String,
    pub release_archive: String,
    pub salts: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            version_check: DEFAULT_VERSION_CHECK_URL.to_string(),
            release_archive: DEFAULT_RELEASE_ARCHIVE_URL.to_string(),
            salts: DEFAULT_SALTS_URL.to_string(),
        }
    }
}

/// Files removed after a fresh core download
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PruneConfig {
    /// Always removed, missing files are ignored
    pub files: Vec<PathBuf>,
    /// Removed unless `composer.json` requires the package
    pub bundled: Vec<BundledExtra>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        let files = [
            "license.txt",
            "readme.html",
            "wp-config-sample.php",
            "wp-content/plugins/hello.php",
        ];

        let mut bundled = vec![BundledExtra::new(
            "wp-content/plugins/akismet",
            "wpackagist-plugin/akismet",
        )];
        for theme in [
            "twentyseventeen",
            "twentysixteen",
            "twentyfifteen",
            "twentyfourteen",
        ] {
            bundled.push(BundledExtra::new(
                format!("wp-content/themes/{theme}"),
                format!("wpackagist-theme/{theme}"),
            ));
        }

        Self {
            files: files.into_iter().map(PathBuf::from).collect(),
            bundled,
        }
    }
}

/// A plugin or theme shipped with core
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BundledExtra {
    pub path: PathBuf,
    /// Composer package name that keeps it installed
    pub package: String,
}

impl BundledExtra {
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
        }
    }
}
