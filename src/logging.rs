//! Tracing setup. Events go to a log file so stdout stays reserved for
//! command output.

use color_eyre::{eyre::eyre, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE: &str = "dbheroes.log";

/// Install the global subscriber writing to `dir/dbheroes.log`.
///
/// `RUST_LOG` wins over `default_level`. Keep the returned guard alive for
/// the life of the process; dropping it flushes pending events.
pub fn init(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

  let appender = tracing_appender::rolling::never(dir, LOG_FILE);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let file_layer = fmt::layer()
    .with_ansi(false)
    .with_writer(writer)
    .with_filter(filter);

  tracing_subscriber::registry()
    .with(file_layer)
    .try_init()
    .map_err(|e| eyre!("Failed to install tracing subscriber: {}", e))?;

  Ok(guard)
}
