//! Common types for version management

use std::collections::BTreeMap;

use crate::version::semver::{Version, VersionLine};

/// The known universe of published runner releases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseSet {
    /// Valid releases, ascending and without duplicates
    versions: Vec<Version>,
    /// Highest release of every minor line
    by_minor: BTreeMap<VersionLine, Version>,
}

impl ReleaseSet {
    /// Builds a release set, dropping invalid versions and duplicates
    pub fn new(versions: impl IntoIterator<Item = Version>) -> Self {
        let mut versions: Vec<Version> = versions.into_iter().filter(Version::is_valid).collect();
        versions.sort();
        versions.dedup();

        // Ascending order means the last insert per line is its maximum
        let by_minor = versions
            .iter()
            .map(|v| (v.without_patch(), v.clone()))
            .collect();

        Self { versions, by_minor }
    }

    /// Builds a release set from tag-like names such as `v16.3.0`
    pub fn from_release_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| parse_release_name(name.as_ref())),
        )
    }

    /// All releases, oldest first
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Latest release of each minor line, keyed by line in ascending order
    pub fn by_minor(&self) -> &BTreeMap<VersionLine, Version> {
        &self.by_minor
    }

    pub fn newest(&self) -> Option<&Version> {
        self.versions.last()
    }

    pub fn latest_in_line(&self, line: VersionLine) -> Option<&Version> {
        self.by_minor.get(&line)
    }

    /// Position of `line` among the known minor lines (0 = oldest)
    pub fn line_position(&self, line: VersionLine) -> Option<usize> {
        self.by_minor.keys().position(|known| *known == line)
    }

    pub fn line_count(&self) -> usize {
        self.by_minor.len()
    }

    /// Newest per-line release whose line is strictly below `cutoff`
    pub fn newest_below(&self, cutoff: VersionLine) -> Option<&Version> {
        self.by_minor.range(..cutoff).next_back().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Parses a release tag name, dropping one leading non-numeric character
fn parse_release_name(name: &str) -> Version {
    let name = name.trim();
    let stripped = name
        .strip_prefix(|c: char| !c.is_ascii_digit())
        .unwrap_or(name);
    Version::parse(stripped, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s, true)
    }

    #[test]
    fn from_release_names_strips_prefix_and_sorts() {
        let set = ReleaseSet::from_release_names(["v15.2.0", "v15.0.0", "15.1.0"]);

        assert_eq!(set.versions(), &[v("15.0.0"), v("15.1.0"), v("15.2.0")]);
    }

    #[test]
    fn from_release_names_drops_unparseable_and_duplicate_entries() {
        let set = ReleaseSet::from_release_names([
            "v15.2.0",
            "latest",
            "v15.2",
            "",
            "v15.2.0",
            "vv15.3.0",
        ]);

        assert_eq!(set.versions(), &[v("15.2.0")]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn by_minor_keeps_highest_release_per_line() {
        let set = ReleaseSet::from_release_names(["v15.2.3", "v15.2.0", "v15.3.0", "v15.2.10"]);

        assert_eq!(
            set.latest_in_line(VersionLine::new(15, 2)),
            Some(&v("15.2.10"))
        );
        assert_eq!(
            set.latest_in_line(VersionLine::new(15, 3)),
            Some(&v("15.3.0"))
        );
        assert_eq!(set.latest_in_line(VersionLine::new(15, 4)), None);
        assert_eq!(set.line_count(), 2);
    }

    #[test]
    fn line_position_counts_from_oldest_line() {
        let set = ReleaseSet::from_release_names(["v14.10.0", "v15.0.0", "v14.9.1", "v15.1.0"]);

        assert_eq!(set.line_position(VersionLine::new(14, 9)), Some(0));
        assert_eq!(set.line_position(VersionLine::new(14, 10)), Some(1));
        assert_eq!(set.line_position(VersionLine::new(15, 1)), Some(3));
        assert_eq!(set.line_position(VersionLine::new(15, 2)), None);
    }

    #[test]
    fn newest_below_excludes_cutoff_line() {
        let set = ReleaseSet::from_release_names(["v15.1.2", "v15.3.0", "v15.4.1"]);

        assert_eq!(set.newest_below(VersionLine::new(15, 4)), Some(&v("15.3.0")));
        assert_eq!(set.newest_below(VersionLine::new(15, 5)), Some(&v("15.4.1")));
        assert_eq!(set.newest_below(VersionLine::new(15, 1)), None);
    }

    #[test]
    fn empty_set_has_no_newest_release() {
        let set = ReleaseSet::default();

        assert!(set.is_empty());
        assert_eq!(set.newest(), None);
        assert_eq!(set.line_count(), 0);
    }
}
