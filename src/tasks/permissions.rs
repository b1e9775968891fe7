use std::path::{Path, PathBuf};

use tracing::info;

use crate::wordpress::error::FsError;

/// Mode given to writable directories
pub const WRITABLE_MODE: u32 = 0o777;

/// Ensure each directory exists and is world-writable. Returns absolute paths.
pub fn make_writable(root: &Path, dirs: &[PathBuf]) -> Result<Vec<PathBuf>, FsError> {
    let mut fixed = Vec::with_capacity(dirs.len());

    for dir in dirs {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).map_err(|source| FsError::Io {
            path: path.clone(),
            source,
        })?;
        set_mode(&path)?;
        info!("{} is writable", path.display());
        fixed.push(path);
    }

    Ok(fixed)
}

#[cfg(unix)]
fn set_mode(path: &Path) -> Result<(), FsError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(WRITABLE_MODE)).map_err(
        |source| FsError::Io {
            path: path.to_path_buf(),
            source,
        },
    )
}

#[cfg(not(unix))]
fn set_mode(path: &Path) -> Result<(), FsError> {
    tracing::warn!(
        "Skipping chmod {:o} on {}: unsupported on this platform",
        WRITABLE_MODE,
        path.display()
    );
    Ok(())
}
