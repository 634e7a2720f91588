//! TTL-bounded cache of the published runner release list
//!
//! The cached state is an immutable [`Snapshot`] that is swapped wholesale.
//! A failed fetch stores an absent snapshot with a short expiry so the next
//! caller retries soon; a successful fetch is kept for the long TTL.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::AdvisorConfig;
use crate::version::registry::ReleaseSource;
use crate::version::semver::{Version, VersionLine};
use crate::version::types::ReleaseSet;

#[derive(Debug)]
struct Snapshot {
    releases: Option<Arc<ReleaseSet>>,
    expires_at: Instant,
}

impl Snapshot {
    fn expired() -> Self {
        Self {
            releases: None,
            expires_at: Instant::now(),
        }
    }

    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

pub struct ReleaseCatalog {
    source: Arc<dyn ReleaseSource>,
    enabled: bool,
    success_ttl: Duration,
    failure_ttl: Duration,
    state: RwLock<Arc<Snapshot>>,
    /// Serializes refreshes so concurrent callers share one fetch
    refresh: Mutex<()>,
}

impl ReleaseCatalog {
    pub fn new(source: Arc<dyn ReleaseSource>, config: &AdvisorConfig) -> Self {
        Self {
            source,
            enabled: config.enabled,
            success_ttl: config.success_ttl,
            failure_ttl: config.failure_ttl,
            state: RwLock::new(Arc::new(Snapshot::expired())),
            refresh: Mutex::new(()),
        }
    }

    /// Returns the known releases, fetching them first if the cache has expired.
    ///
    /// `None` means the last fetch failed (or fetching is disabled) and the
    /// short retry window has not elapsed yet.
    pub async fn releases(&self) -> Option<Arc<ReleaseSet>> {
        if !self.enabled {
            debug!("Runner release fetching is disabled");
            return None;
        }

        if let Some(releases) = self.fresh_releases() {
            return releases;
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(releases) = self.fresh_releases() {
            return releases;
        }

        let snapshot = self.fetch_snapshot().await;
        let releases = snapshot.releases.clone();
        *self.state.write() = Arc::new(snapshot);
        releases
    }

    /// Latest release per minor line, or `None` when releases are unavailable
    pub async fn releases_by_minor(&self) -> Option<BTreeMap<VersionLine, Version>> {
        self.releases().await.map(|set| set.by_minor().clone())
    }

    /// Expires the cache immediately; the next read fetches again
    pub fn reset(&self) {
        debug!("Resetting runner release cache");
        *self.state.write() = Arc::new(Snapshot::expired());
    }

    /// `Some` holds the cached value of a snapshot that has not expired
    fn fresh_releases(&self) -> Option<Option<Arc<ReleaseSet>>> {
        let snapshot = self.state.read().clone();
        snapshot.is_fresh().then(|| snapshot.releases.clone())
    }

    async fn fetch_snapshot(&self) -> Snapshot {
        match self.source.fetch_release_names().await {
            Ok(names) => {
                let releases = ReleaseSet::from_release_names(names);
                info!("Fetched {} runner releases", releases.len());
                Snapshot {
                    releases: Some(Arc::new(releases)),
                    expires_at: Instant::now() + self.success_ttl,
                }
            }
            Err(e) => {
                warn!(
                    "Failed to fetch runner releases, retrying in {:?}: {}",
                    self.failure_ttl, e
                );
                Snapshot {
                    releases: None,
                    expires_at: Instant::now() + self.failure_ttl,
                }
            }
        }
    }
}
