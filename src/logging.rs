//! Log subscriber setup.
//!
//! The editor owns the terminal while it runs, so events only go somewhere
//! when `--log-file` is given. Without one they are discarded.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Filter from `RUST_LOG`-style directives, falling back to `warn`.
///
/// Invalid directives are ignored.
pub fn filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn writer(log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::sink)),
    }
}

/// Build the fmt subscriber for `directives`, writing to `log_file`.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn subscriber(
    directives: &str,
    log_file: Option<&Path>,
) -> Result<impl Subscriber + Send + Sync + 'static> {
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter(directives))
        .with_ansi(false)
        .with_writer(writer(log_file)?)
        .finish())
}

/// Install the global subscriber, reading directives from `RUST_LOG`.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let directives = std::env::var("RUST_LOG").unwrap_or_default();
    tracing::subscriber::set_global_default(subscriber(&directives, log_file)?)
        .context("Failed to install log subscriber")
}
