//! Source trait for fetching the published runner release list

use async_trait::async_trait;

use crate::version::error::FetchError;

/// Trait for fetching raw release names (e.g. `v16.3.0`) from a releases endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches the name of every published release
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Release names in whatever order the endpoint uses
    /// * `Err(FetchError)` - If the request or response decoding fails
    async fn fetch_release_names(&self) -> Result<Vec<String>, FetchError>;
}
