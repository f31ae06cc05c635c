use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Where log lines may go when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Write to stderr.
    Stderr,
    /// Drop everything; the terminal is owned by the full-screen UI.
    Discard,
}

/// Install the global tracing subscriber.
///
/// Returns `false` when nothing was installed because there is no log file
/// and the fallback is [`Fallback::Discard`].
pub fn init(config: &LoggingConfig, fallback: Fallback) -> Result<bool, LoggingError> {
    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::File {
                    path: path.clone(),
                    source,
                })?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let stderr_layer = match (&file_layer, fallback) {
        (None, Fallback::Stderr) => Some(fmt::layer().with_writer(std::io::stderr)),
        _ => None,
    };

    if file_layer.is_none() && stderr_layer.is_none() {
        return Ok(false);
    }

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = select_filter(env.as_deref(), &config.filter)?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(stderr_layer),
    )
    .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(true)
}

/// `RUST_LOG` wins when it is set and non-empty; a bad value is an error
/// rather than a silent fallback to the configured filter.
fn select_filter(env: Option<&str>, configured: &str) -> Result<EnvFilter, LoggingError> {
    match env {
        Some(value) if !value.trim().is_empty() => parse_filter(value),
        _ => parse_filter(configured),
    }
}

fn parse_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|source| LoggingError::Filter {
        filter: filter.to_string(),
        source,
    })
}
