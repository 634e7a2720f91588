//! Runner version parsing and comparison
//!
//! Runner versions look like `15.2.0`, `15.9.0-rc1` or `16.0.0~beta.12.g8a2f`.
//! Parsing never fails: malformed input yields a [`Version`] whose
//! [`Version::is_valid`] returns false.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)(.*)$").expect("version pattern is a valid regex")
});

/// Pre-release or build marker following the numeric components
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suffix {
    /// Suffix that is not a valid semver pre-release (e.g. `beta~212`)
    Other(String),
    /// Suffix that follows semver pre-release rules (e.g. `rc1`, `beta.2`)
    Prerelease(semver::Prerelease),
}

impl Suffix {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim_start_matches(['-', '~', '+']);
        if raw.is_empty() {
            return None;
        }

        Some(match semver::Prerelease::new(raw) {
            Ok(pre) => Suffix::Prerelease(pre),
            Err(_) => Suffix::Other(raw.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Suffix::Other(s) => s,
            Suffix::Prerelease(pre) => pre.as_str(),
        }
    }
}

/// A (major, minor) pair grouping all patch releases of one minor line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionLine {
    pub major: u64,
    pub minor: u64,
}

impl VersionLine {
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// The minor line directly after this one
    pub fn next(self) -> Self {
        Self {
            major: self.major,
            minor: self.minor.saturating_add(1),
        }
    }
}

impl fmt::Display for VersionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A parsed runner version
///
/// Ordering is (major, minor, patch) followed by the suffix, where a plain
/// release sorts after any suffixed build of the same numbers. Invalid
/// versions sort below every valid one; callers should check
/// [`Version::is_valid`] before relying on comparisons.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    suffix: Option<Suffix>,
    valid: bool,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: None,
            valid: true,
        }
    }

    /// Parses `input` as `major.minor.patch`.
    ///
    /// With `parse_suffix`, anything after the patch number is kept as a
    /// [`Suffix`]; otherwise it is ignored.
    pub fn parse(input: &str, parse_suffix: bool) -> Self {
        let Some(caps) = VERSION_PATTERN.captures(input.trim()) else {
            return Self::invalid();
        };

        let component = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
        let (Some(major), Some(minor), Some(patch)) = (component(1), component(2), component(3))
        else {
            return Self::invalid();
        };

        let suffix = if parse_suffix {
            caps.get(4).and_then(|m| Suffix::parse(m.as_str()))
        } else {
            None
        };

        Self {
            major,
            minor,
            patch,
            suffix,
            valid: true,
        }
    }

    fn invalid() -> Self {
        Self {
            major: 0,
            minor: 0,
            patch: 0,
            suffix: None,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn suffix(&self) -> Option<&Suffix> {
        self.suffix.as_ref()
    }

    /// Grouping key for the minor line this version belongs to
    pub fn without_patch(&self) -> VersionLine {
        VersionLine::new(self.major, self.minor)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.valid.hash(state);
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.suffix.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.valid
            .cmp(&other.valid)
            .then(self.major.cmp(&other.major))
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str("Unknown");
        }

        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "-{}", suffix.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
