//! Public releases API implementation

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::FetchError;
use crate::version::registry::ReleaseSource;

/// Release entry from the releases API; only the tag-like name is used
#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    name: String,
}

/// Release source backed by an HTTP endpoint returning a JSON array of releases
pub struct HttpReleaseSource {
    client: reqwest::Client,
    url: String,
}

impl HttpReleaseSource {
    /// Creates a source for `url` whose requests give up after `timeout`
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("runner-upgrade-advisor/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReleaseSource for HttpReleaseSource {
    async fn fetch_release_names(&self) -> Result<Vec<String>, FetchError> {
        debug!("Fetching runner releases from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();

        if !status.is_success() {
            warn!("Releases endpoint returned status {}: {}", status, self.url);
            return Err(FetchError::UnexpectedStatus(status));
        }

        let releases: Vec<ReleaseEntry> = response.json().await.map_err(|e| {
            warn!("Failed to parse releases response: {}", e);
            FetchError::InvalidResponse(e.to_string())
        })?;

        Ok(releases.into_iter().map(|r| r.name).collect())
    }
}
