//! Security salt generation
//!
//! The secret-key service returns ready-made PHP `define()` lines. They are
//! written verbatim behind an opening `<?php` tag.

#[cfg(test)]
use mockall::automock;

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::version::error::FetchError;

#[derive(Debug, Error)]
pub enum SaltsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write salts to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for fetching a fresh set of salts
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SaltSource: Send + Sync {
    async fn fetch_salts(&self) -> Result<Vec<u8>, FetchError>;
}

/// Salt source backed by the wordpress.org secret-key API
pub struct SaltsClient {
    client: reqwest::Client,
    url: String,
}

impl SaltsClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: crate::http::build_client(timeout)?,
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl SaltSource for SaltsClient {
    async fn fetch_salts(&self) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Salt service returned status {}: {}", status, self.url);
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Fetch salts and write them to `path`
pub async fn write_salts(source: &dyn SaltSource, path: &Path) -> Result<(), SaltsError> {
    let body = source.fetch_salts().await?;

    let mut content = b"<?php\n".to_vec();
    content.extend_from_slice(&body);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| SaltsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| SaltsError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote new salts to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    const SALTS_BODY: &str = "define('AUTH_KEY',         'a$b%c');\ndefine('SECURE_AUTH_KEY',  'd^e&f');\n";

    #[tokio::test]
    async fn fetch_salts_returns_body_bytes() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/secret-key/1.1/salt/")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body(SALTS_BODY)
            .create_async()
            .await;

        let client = SaltsClient::new(
            &format!("{}/secret-key/1.1/salt/", server.url()),
            Duration::from_secs(5),
        )
        .unwrap();
        let body = client.fetch_salts().await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, SALTS_BODY.as_bytes());
    }

    #[tokio::test]
    async fn fetch_salts_returns_status_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/secret-key/1.1/salt/")
            .with_status(500)
            .create_async()
            .await;

        let client = SaltsClient::new(
            &format!("{}/secret-key/1.1/salt/", server.url()),
            Duration::from_secs(5),
        )
        .unwrap();

        let result = client.fetch_salts().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn write_salts_prefixes_php_open_tag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".salts.php");
        let mut source = MockSaltSource::new();
        source
            .expect_fetch_salts()
            .times(1)
            .returning(|| Ok(SALTS_BODY.as_bytes().to_vec()));

        write_salts(&source, &path).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("<?php\n{}", SALTS_BODY)
        );
    }

    #[tokio::test]
    async fn write_salts_leaves_file_untouched_on_fetch_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".salts.php");
        std::fs::write(&path, "<?php // previous").unwrap();
        let mut source = MockSaltSource::new();
        source
            .expect_fetch_salts()
            .returning(|| Err(FetchError::InvalidResponse("empty".to_string())));

        let result = write_salts(&source, &path).await;

        assert!(matches!(result, Err(SaltsError::Fetch(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<?php // previous");
    }
}
