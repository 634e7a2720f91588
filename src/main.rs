//! runner-upgrade-advisor CLI entry point.

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use cli::{Cli, Command};
use indexmap::IndexMap;
use runner_upgrade_advisor::{
    HttpReleaseSource, ReleaseCatalog, Suggestions, UpgradeAdvisor, UpgradeStatus, Version, log,
};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct CheckReport<'a> {
    runner_version: &'a str,
    suggestions: Vec<SuggestionEntry<'a>>,
}

#[derive(Serialize)]
struct SuggestionEntry<'a> {
    version: &'a Version,
    status: UpgradeStatus,
}

#[derive(Serialize)]
struct ReleasesReport<'a> {
    releases: &'a [Version],
    latest_by_minor: IndexMap<String, &'a Version>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = log::init(&cli.log_level)?;
    info!("runner-upgrade-advisor v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.advisor_config()?;
    let source = HttpReleaseSource::new(&config.releases_url, config.fetch_timeout)?;
    info!("Using runner releases from {}", source.url());
    let catalog = Arc::new(ReleaseCatalog::new(Arc::new(source), &config));

    match cli.command {
        Command::Check {
            runner_versions,
            server_version,
            json,
        } => {
            let advisor = UpgradeAdvisor::new(catalog, &server_version, config.backport_window);
            info!("Checking runners against server version {}", advisor.server_version());
            check(&advisor, &runner_versions, json, log_path.as_deref()).await
        }
        Command::Releases { json } => releases(&catalog, json).await,
    }
}

async fn check(
    advisor: &UpgradeAdvisor,
    runner_versions: &[String],
    json: bool,
    log_path: Option<&Path>,
) -> anyhow::Result<()> {
    let results: Vec<Suggestions> =
        futures::future::join_all(runner_versions.iter().map(|v| advisor.check(v))).await;

    let failed = results
        .iter()
        .any(|suggestions| suggestions.first().map(|(_, s)| s) == Some(UpgradeStatus::Error));
    if failed && let Some(log_path) = log_path {
        eprintln!(
            "Runner releases could not be fetched, see {} for details",
            log_path.display()
        );
    }

    if json {
        let reports: Vec<CheckReport> = runner_versions
            .iter()
            .zip(&results)
            .map(|(runner_version, suggestions)| CheckReport {
                runner_version,
                suggestions: suggestions
                    .iter()
                    .map(|(version, status)| SuggestionEntry { version, status })
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (runner_version, suggestions) in runner_versions.iter().zip(&results) {
        let mut entries = suggestions.iter();
        if let Some((version, status)) = entries.next() {
            println!("{runner_version} -> {version} ({status})");
        }
        for (version, status) in entries {
            println!("{:width$}    {version} ({status})", "", width = runner_version.len());
        }
    }

    Ok(())
}

async fn releases(catalog: &ReleaseCatalog, json: bool) -> anyhow::Result<()> {
    let Some(releases) = catalog.releases().await else {
        bail!("Runner releases are currently unavailable");
    };

    if json {
        let report = ReleasesReport {
            releases: releases.versions(),
            latest_by_minor: releases
                .by_minor()
                .iter()
                .map(|(line, version)| (line.to_string(), version))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for version in releases.versions() {
        println!("{version}");
    }
    println!();
    for (line, version) in releases.by_minor() {
        println!("{line}: {version}");
    }

    Ok(())
}
