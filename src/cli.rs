//! Command-line interface definition.

use std::time::Duration;

use clap::{Parser, Subcommand};
use runner_upgrade_advisor::config::{AdvisorConfig, ConfigError};

/// Checks CI runner versions against the published runner releases.
#[derive(Parser, Debug)]
#[command(name = "runner-upgrade-advisor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Releases endpoint returning a JSON array of `{"name": "vX.Y.Z"}` objects.
    #[arg(long, global = true)]
    pub releases_url: Option<String>,

    /// Number of trailing minor lines that still receive patch releases.
    #[arg(long, global = true)]
    pub backport_window: Option<usize>,

    /// HTTP timeout for fetching releases, in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest upgrades for one or more runner versions.
    Check {
        /// Versions reported by the runners (e.g. 15.2.0, 15.9.0-rc1).
        #[arg(required = true)]
        runner_versions: Vec<String>,

        /// Version of the server the runners talk to.
        #[arg(long, env = "RUNNER_ADVISOR_SERVER_VERSION")]
        server_version: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the known runner releases.
    Releases {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Builds the advisor configuration from the environment, then applies CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds a malformed value.
    pub fn advisor_config(&self) -> Result<AdvisorConfig, ConfigError> {
        let mut config = AdvisorConfig::from_env()?;

        if let Some(url) = &self.releases_url {
            config.releases_url = url.clone();
        }
        if let Some(window) = self.backport_window {
            config.backport_window = window;
        }
        if let Some(secs) = self.timeout_secs {
            config.fetch_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
