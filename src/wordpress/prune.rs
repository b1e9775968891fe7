//! Post-install pruning
//!
//! A fresh core download ships sample files and bundled extras (Akismet,
//! default themes) that projects managed through composer usually don't
//! want. Bundled extras survive only when `composer.json` names their
//! package.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PruneConfig;
use crate::wordpress::error::FsError;

const COMPOSER_FILE: &str = "composer.json";

/// Remove unwanted files from a fresh install. Returns the removed paths.
pub fn prune_install(root: &Path, config: &PruneConfig) -> Result<Vec<PathBuf>, FsError> {
    let mut removed = Vec::new();

    for file in &config.files {
        let path = root.join(file);
        match std::fs::remove_file(&path) {
            Ok(()) => removed.push(file.clone()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(FsError::Io { path, source }),
        }
    }

    let composer = read_composer(root)?;

    for extra in &config.bundled {
        if composer.contains(&extra.package) {
            debug!("Keeping {} required as {}", extra.path.display(), extra.package);
            continue;
        }

        let path = root.join(&extra.path);
        match std::fs::remove_dir_all(&path) {
            Ok(()) => removed.push(extra.path.clone()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(FsError::Io { path, source }),
        }
    }

    debug!("Pruned {} paths from {}", removed.len(), root.display());
    Ok(removed)
}

/// Raw composer.json text, empty when the project has none
fn read_composer(root: &Path) -> Result<String, FsError> {
    let path = root.join(COMPOSER_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(FsError::Io { path, source }),
    }
}
