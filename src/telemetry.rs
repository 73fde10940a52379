use std::io;
use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::NclipError;

static TELEMETRY: OnceLock<()> = OnceLock::new();

pub fn init(verbosity: u8) -> Result<(), NclipError> {
    if TELEMETRY.get().is_some() {
        return Ok(());
    }

    let default_level = level_for_verbosity(verbosity);
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // stdout belongs to command output
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| NclipError::TelemetryInit(err.to_string()))?;

    let _ = TELEMETRY.set(());
    Ok(())
}

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
