//! Tracing subscriber setup

use std::fs::File;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::{ConfigError, LoggingConfig};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unable to open log file for writing: {0}")]
    Io(#[from] std::io::Error),
    #[error("Logger already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = config.level_filter()?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .compact(),
            )
        }
        None => None,
    };
    let stdout_layer = config
        .stdout
        .then(|| fmt::layer().with_writer(std::io::stdout).with_target(false).compact());
    let stderr_layer = (config.file.is_none() && !config.stdout)
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false).compact());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .with(stderr_layer)
        .try_init()?;

    tracing::debug!(%level, "logging initialized");
    Ok(())
}
