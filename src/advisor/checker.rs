//! Upgrade decision engine
//!
//! Given a runner's self-reported version, the published release list and the
//! server's own version, decides which release (if any) the runner should move
//! to:
//!
//! 1. Runners more than `backport_window` minor lines behind the newest line
//!    are pointed at the latest release of the server's line (`recommended`).
//! 2. Otherwise a newer patch on the runner's own line is `recommended`.
//! 3. A newer release on the server's line is additionally `available`.
//! 4. With nothing to suggest, the runner version itself is `not_available`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::advisor::suggestion::{Suggestions, UpgradeStatus};
use crate::version::cache::ReleaseCatalog;
use crate::version::semver::{Version, VersionLine};
use crate::version::types::ReleaseSet;

/// Default number of trailing minor lines that still receive patch releases
pub const DEFAULT_BACKPORT_WINDOW: usize = 3;

pub struct UpgradeAdvisor {
    catalog: Arc<ReleaseCatalog>,
    server_version: Version,
    backport_window: usize,
}

impl UpgradeAdvisor {
    pub fn new(catalog: Arc<ReleaseCatalog>, server_version: &str, backport_window: usize) -> Self {
        let server_version = Version::parse(server_version, true);
        if !server_version.is_valid() {
            warn!("Server version is not a valid version, server line checks are disabled");
        }

        Self {
            catalog,
            server_version,
            backport_window,
        }
    }

    pub fn server_version(&self) -> &Version {
        &self.server_version
    }

    pub fn catalog(&self) -> &ReleaseCatalog {
        &self.catalog
    }

    /// Returns upgrade suggestions for `runner_version`, highest priority first
    pub async fn check(&self, runner_version: &str) -> Suggestions {
        let runner_version = Version::parse(runner_version, true);
        if !runner_version.is_valid() {
            return Suggestions::single(runner_version, UpgradeStatus::InvalidVersion);
        }

        let Some(releases) = self.catalog.releases().await else {
            return Suggestions::single(runner_version, UpgradeStatus::Error);
        };

        let suggestions = self.suggest(&releases, &runner_version);
        debug!("Suggestions for runner {}: {:?}", runner_version, suggestions);
        suggestions
    }

    /// Returns only the primary suggestion for `runner_version`
    pub async fn suggestion(&self, runner_version: &str) -> Option<(Version, UpgradeStatus)> {
        self.check(runner_version).await.into_iter().next()
    }

    fn suggest(&self, releases: &ReleaseSet, runner_version: &Version) -> Suggestions {
        let mut suggestions = Suggestions::default();

        let recommended = self
            .backport_target(releases, runner_version, true)
            .or_else(|| self.patch_target(releases, runner_version));
        if let Some(version) = recommended {
            suggestions.insert(version, UpgradeStatus::Recommended);
        }

        if let Some(available) = self
            .server_line_latest(releases)
            .filter(|latest| *latest > runner_version)
            && !suggestions.contains(available)
        {
            suggestions.insert(available.clone(), UpgradeStatus::Available);
        }

        if suggestions.is_empty() {
            suggestions.insert(runner_version.clone(), UpgradeStatus::NotAvailable);
        }

        suggestions
    }

    /// Upgrade target for a version outside the backport window.
    ///
    /// A version on a line with no published release is judged by what the
    /// server version itself would move to, even when that target sorts below
    /// the runner; `delegate` limits that to one level.
    fn backport_target(
        &self,
        releases: &ReleaseSet,
        version: &Version,
        delegate: bool,
    ) -> Option<Version> {
        let newest = releases.newest()?;
        if version >= newest {
            return None;
        }

        match releases.line_position(version.without_patch()) {
            Some(position) => {
                if releases.line_count() - position <= self.backport_window {
                    return None;
                }
                debug!(
                    "Runner {} is outside the backport window of {} minor lines",
                    version, self.backport_window
                );
                self.server_line_latest(releases)
                    .filter(|latest| *latest > version)
                    .cloned()
            }
            None if delegate && self.server_version.is_valid() => {
                debug!(
                    "Minor line {} is unknown, deferring to server version {}",
                    version.without_patch(),
                    self.server_version
                );
                self.backport_target(releases, &self.server_version, false)
                    .or_else(|| self.server_line_latest(releases).cloned())
            }
            None => None,
        }
    }

    /// Newer release on the version's own line.
    ///
    /// When the line has no published release at all, falls back to the newest
    /// release at or below the server's line.
    fn patch_target(&self, releases: &ReleaseSet, version: &Version) -> Option<Version> {
        let candidate = match releases.latest_in_line(version.without_patch()) {
            Some(latest) => latest,
            None => releases.newest_below(self.server_line()?.next())?,
        };

        (candidate > version).then(|| candidate.clone())
    }

    fn server_line(&self) -> Option<VersionLine> {
        self.server_version
            .is_valid()
            .then(|| self.server_version.without_patch())
    }

    fn server_line_latest<'a>(&self, releases: &'a ReleaseSet) -> Option<&'a Version> {
        releases.latest_in_line(self.server_line()?)
    }
}
