use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::config;

const LOG_FILE_NAME: &str = "runner-upgrade-advisor.log";

/// Sends JSON logs to the log file under the data directory.
///
/// Falls back to stderr when the data directory or the log file cannot be
/// created. `RUST_LOG` takes precedence over `default_level`. Returns the log
/// file path when file logging is active.
pub fn init(default_level: &str) -> anyhow::Result<Option<PathBuf>> {
    let (writer, log_path) = match open_log_file(&config::data_dir()) {
        Ok((path, file)) => (BoxMakeWriter::new(file), Some(path)),
        Err(e) => {
            eprintln!("Failed to set up log file, logging to stderr: {}", e);
            (BoxMakeWriter::new(std::io::stderr), None)
        }
    };

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .fmt_fields(JsonFields::default());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .try_init()?;

    Ok(log_path)
}

fn open_log_file(data_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    Ok((log_path, log_file))
}
