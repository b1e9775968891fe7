use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Core download of {version} failed ({status}): {stderr}")]
    Failed {
        version: String,
        status: String,
        stderr: String,
    },

    #[error("Core download of {version} timed out after {secs}s")]
    Timeout { version: String, secs: u64 },

    #[error("Failed to stage release files at {path}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("Failed to create scratch directory in {parent}: {source}")]
    Create {
        parent: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reference download failed: {0}")]
    Download(#[source] InstallError),

    #[error("Failed to list reference files: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("Failed to remove scratch directory {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while staging a release in scratch space
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Scratch(#[from] ScratchError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read $wp_version from {path}")]
    VersionFile { path: PathBuf },
}
