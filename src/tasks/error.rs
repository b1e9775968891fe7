use thiserror::Error;

use crate::config::ConfigError;
use crate::salts::SaltsError;
use crate::version::error::{FetchError, ResolutionError};
use crate::wordpress::error::{FsError, InstallError, ScratchError, StageError};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Scratch(#[from] ScratchError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Salts(#[from] SaltsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<StageError> for TaskError {
    fn from(err: StageError) -> Self {
        match err {
            StageError::Scratch(err) => Self::Scratch(err),
            StageError::Install(err) => Self::Install(err),
        }
    }
}
