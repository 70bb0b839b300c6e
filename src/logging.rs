//! File logging.
//!
//! The terminal is in raw mode while a game runs, so log output goes to
//! `kb-scramble.log` in `KB_SCRAMBLE_LOG_DIR` (or the system temp dir).
//! The level comes from `RUST_LOG` and defaults to info.

use crate::error::{Result, ScrambleError};
use std::env;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_DIR_VAR: &str = "KB_SCRAMBLE_LOG_DIR";
const LOG_FILE: &str = "kb-scramble.log";

fn log_dir() -> PathBuf
{
    match env::var_os(LOG_DIR_VAR) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => env::temp_dir().join("kb-scramble"),
    }
}

/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init_logging() -> Result<WorkerGuard>
{
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .map_err(|err| ScrambleError::Logging(format!("cannot create {}: {err}", dir.display())))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_writer(writer)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| ScrambleError::Logging(err.to_string()))?;

    tracing::info!("kb-scramble v{} started", env!("CARGO_PKG_VERSION"));
    Ok(guard)
}
