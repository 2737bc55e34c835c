//! Structured logging setup

use std::fs::OpenOptions;
use std::sync::Mutex;

use deci_core::{DeciError, DeciResult};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::ClockConfig;

/// Environment variable overriding `log_filter`
pub const LOG_ENV: &str = "DECI_LOG";

/// Install the global `tracing` subscriber described by `config`.
///
/// Fails if a subscriber is already installed or the log file cannot be
/// opened.
pub fn init_logging(config: &ClockConfig) -> DeciResult<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| DeciError::Config(format!("log filter: {e}")))?;

    let (writer, ansi) = match &config.log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    let result = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| DeciError::Config(format!("logging: {e}")))
}
