//! Fetching release archives over HTTPS

use crate::error::{NumakeError, NumakeResult};
use async_trait::async_trait;

/// Upper bound on an archive body held in memory
const MAX_ARCHIVE_BYTES: u64 = 512 * 1024 * 1024;

/// Source of release archive bytes
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Fetch the full body at `url`. Non-success responses are errors.
    async fn fetch(&self, url: &str) -> NumakeResult<Vec<u8>>;
}

/// Fetcher backed by a blocking `ureq` agent on tokio's blocking pool
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn download_error(url: &str, reason: impl ToString) -> NumakeError {
    NumakeError::Download {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> NumakeResult<Vec<u8>> {
        let agent = self.agent.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || {
            // ureq reports 4xx/5xx as Error::StatusCode
            let mut response = agent
                .get(url.as_str())
                .call()
                .map_err(|e| download_error(&url, e))?;

            response
                .body_mut()
                .with_config()
                .limit(MAX_ARCHIVE_BYTES)
                .read_to_vec()
                .map_err(|e| download_error(&url, e))
        })
        .await
        .map_err(|e| NumakeError::Internal(format!("download task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_download_error() {
        let fetcher = HttpFetcher::new();
        let err = fetcher
            .fetch("http://127.0.0.1:9/nu-0.0.0.tar.gz")
            .await
            .unwrap_err();

        match err {
            NumakeError::Download { url, .. } => assert!(url.ends_with("nu-0.0.0.tar.gz")),
            other => panic!("expected download error, got {other:?}"),
        }
    }
}
