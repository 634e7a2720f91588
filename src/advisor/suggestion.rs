//! Upgrade classifications and the ordered suggestion mapping

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::version::semver::Version;

/// Classification of a suggested version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeStatus {
    /// The runner version could not be parsed
    InvalidVersion,
    /// The release list is currently unavailable
    Error,
    /// Upgrade strongly advised (outside backport window or behind its own line)
    Recommended,
    /// A newer build exists on the server's line
    Available,
    /// Nothing newer to suggest
    NotAvailable,
}

impl UpgradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeStatus::InvalidVersion => "invalid_version",
            UpgradeStatus::Error => "error",
            UpgradeStatus::Recommended => "recommended",
            UpgradeStatus::Available => "available",
            UpgradeStatus::NotAvailable => "not_available",
        }
    }

    /// Returns true if the suggested version is an actual upgrade target
    pub fn is_upgrade(&self) -> bool {
        matches!(self, UpgradeStatus::Recommended | UpgradeStatus::Available)
    }
}

impl fmt::Display for UpgradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested versions in priority order; the first entry is the primary one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Suggestions(IndexMap<Version, UpgradeStatus>);

impl Suggestions {
    pub fn single(version: Version, status: UpgradeStatus) -> Self {
        let mut suggestions = Self::default();
        suggestions.insert(version, status);
        suggestions
    }

    pub(crate) fn insert(&mut self, version: Version, status: UpgradeStatus) {
        self.0.insert(version, status);
    }

    pub fn first(&self) -> Option<(&Version, UpgradeStatus)> {
        self.0.first().map(|(v, s)| (v, *s))
    }

    pub fn get(&self, version: &Version) -> Option<UpgradeStatus> {
        self.0.get(version).copied()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.0.contains_key(version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Version, UpgradeStatus)> {
        self.0.iter().map(|(v, s)| (v, *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Suggestions {
    type Item = (Version, UpgradeStatus);
    type IntoIter = indexmap::map::IntoIter<Version, UpgradeStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
