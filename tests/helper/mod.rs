//! Shared fixtures for end-to-end tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use mockito::{Mock, ServerGuard};
use runner_upgrade_advisor::{AdvisorConfig, HttpReleaseSource, ReleaseCatalog, UpgradeAdvisor};

pub const RELEASES_PATH: &str = "/api/v4/projects/gitlab-org%2Fgitlab-runner/releases";

/// Builds a releases API body listing the given versions as `v`-prefixed tags, newest first
pub fn releases_body(versions: &[&str]) -> String {
    let entries: Vec<serde_json::Value> = versions
        .iter()
        .rev()
        .map(|v| {
            serde_json::json!({
                "name": format!("v{v}"),
                "tag_name": format!("v{v}"),
                "description": format!("Runner {v}"),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

pub async fn mock_releases(server: &mut ServerGuard, versions: &[&str]) -> Mock {
    server
        .mock("GET", RELEASES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(releases_body(versions))
        .create_async()
        .await
}

pub fn test_config(server: &ServerGuard) -> AdvisorConfig {
    AdvisorConfig {
        releases_url: format!("{}{}", server.url(), RELEASES_PATH),
        fetch_timeout: Duration::from_secs(5),
        ..AdvisorConfig::default()
    }
}

pub fn create_catalog(config: &AdvisorConfig) -> Arc<ReleaseCatalog> {
    let source = HttpReleaseSource::new(&config.releases_url, config.fetch_timeout).unwrap();
    Arc::new(ReleaseCatalog::new(Arc::new(source), config))
}

pub fn create_advisor(server: &ServerGuard, server_version: &str) -> UpgradeAdvisor {
    let config = test_config(server);
    UpgradeAdvisor::new(
        create_catalog(&config),
        server_version,
        config.backport_window,
    )
}
