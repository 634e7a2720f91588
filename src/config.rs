use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::advisor::DEFAULT_BACKPORT_WINDOW;

/// Default public runner releases endpoint
pub const DEFAULT_RELEASES_URL: &str =
    "https://gitlab.com/api/v4/projects/gitlab-org%2Fgitlab-runner/releases";

/// Default lifetime of a successfully fetched release list (24 hours)
pub const DEFAULT_SUCCESS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default delay before retrying after a failed fetch
pub const DEFAULT_FAILURE_TTL: Duration = Duration::from_secs(5);

/// Default HTTP timeout for the releases request
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_RELEASES_URL: &str = "RUNNER_RELEASES_URL";
pub const ENV_RELEASES_ENABLED: &str = "RUNNER_RELEASES_ENABLED";
pub const ENV_SUCCESS_TTL_SECS: &str = "RUNNER_RELEASES_TTL_SECS";
pub const ENV_FAILURE_TTL_SECS: &str = "RUNNER_RELEASES_ERROR_TTL_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "RUNNER_RELEASES_TIMEOUT_SECS";
pub const ENV_BACKPORT_WINDOW: &str = "RUNNER_BACKPORT_WINDOW";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings shared by the release catalog and the upgrade advisor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub releases_url: String,
    /// When false, releases are never fetched and every check reports `error`
    pub enabled: bool,
    pub success_ttl: Duration,
    pub failure_ttl: Duration,
    pub fetch_timeout: Duration,
    /// Number of trailing minor lines that still receive patch releases
    pub backport_window: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            enabled: true,
            success_ttl: DEFAULT_SUCCESS_TTL,
            failure_ttl: DEFAULT_FAILURE_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            backport_window: DEFAULT_BACKPORT_WINDOW,
        }
    }
}

impl AdvisorConfig {
    /// Loads settings from the process environment, keeping defaults for unset keys
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RELEASES_URL).filter(|url| !url.trim().is_empty()) {
            config.releases_url = url;
        }
        if let Some(value) = lookup(ENV_RELEASES_ENABLED) {
            config.enabled = parse_bool(ENV_RELEASES_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_SUCCESS_TTL_SECS) {
            config.success_ttl = parse_secs(ENV_SUCCESS_TTL_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_FAILURE_TTL_SECS) {
            config.failure_ttl = parse_secs(ENV_FAILURE_TTL_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            config.fetch_timeout = parse_secs(ENV_FETCH_TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_BACKPORT_WINDOW) {
            config.backport_window = value
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_BACKPORT_WINDOW, &value))?;
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| invalid(key, value))
}

/// Returns the path to the data directory for runner-upgrade-advisor.
/// Uses $XDG_DATA_HOME/runner-upgrade-advisor if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/runner-upgrade-advisor,
/// or ./runner-upgrade-advisor if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("runner-upgrade-advisor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn from_lookup_uses_defaults_when_nothing_is_set() {
        let config = AdvisorConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, AdvisorConfig::default());
        assert_eq!(config.success_ttl, Duration::from_secs(86_400));
        assert_eq!(config.failure_ttl, Duration::from_secs(5));
        assert_eq!(config.backport_window, 3);
    }

    #[test]
    fn from_lookup_reads_every_setting() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            (ENV_RELEASES_URL, "http://localhost:8080/releases"),
            (ENV_RELEASES_ENABLED, "false"),
            (ENV_SUCCESS_TTL_SECS, "3600"),
            (ENV_FAILURE_TTL_SECS, "30"),
            (ENV_FETCH_TIMEOUT_SECS, "2"),
            (ENV_BACKPORT_WINDOW, "4"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            AdvisorConfig {
                releases_url: "http://localhost:8080/releases".to_string(),
                enabled: false,
                success_ttl: Duration::from_secs(3600),
                failure_ttl: Duration::from_secs(30),
                fetch_timeout: Duration::from_secs(2),
                backport_window: 4,
            }
        );
    }

    #[test]
    fn from_lookup_keeps_default_url_when_blank() {
        let config = AdvisorConfig::from_lookup(lookup(&[(ENV_RELEASES_URL, "  ")])).unwrap();

        assert_eq!(config.releases_url, DEFAULT_RELEASES_URL);
    }

    #[rstest]
    #[case(ENV_RELEASES_ENABLED, "maybe")]
    #[case(ENV_SUCCESS_TTL_SECS, "one day")]
    #[case(ENV_FAILURE_TTL_SECS, "-5")]
    #[case(ENV_FETCH_TIMEOUT_SECS, "")]
    #[case(ENV_BACKPORT_WINDOW, "three")]
    fn from_lookup_rejects_malformed_values(#[case] key: &'static str, #[case] value: &str) {
        let result = AdvisorConfig::from_lookup(lookup(&[(key, value)]));

        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                key,
                value: value.to_string()
            })
        );
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/runner-upgrade-advisor"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/runner-upgrade-advisor")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./runner-upgrade-advisor"));
    }
}
