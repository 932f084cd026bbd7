//! File-based logging using simplelog
//!
//! The terminal belongs to the game while it runs, so log records go to a
//! file: the cache directory (~/.cache/grid_snake/ on Linux) unless a path
//! is given on the command line.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

const LOG_FILE: &str = "grid_snake.log";

/// Default log file location, falling back to the working directory
fn default_log_path() -> PathBuf {
    crate::storage::paths::cache_dir()
        .map(|dir| dir.join(LOG_FILE))
        .unwrap_or_else(|_| PathBuf::from(LOG_FILE))
}

/// Map a `RUST_LOG`-style value to a level; unset or unknown means info
fn level_from(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize file-based logging and return the log file path
pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
    let log_file = path.unwrap_or_else(default_log_path);
    let level = level_from(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;
    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from() {
        assert_eq!(level_from(None), LevelFilter::Info);
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(level_from(Some(" warn ")), LevelFilter::Warn);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
        assert_eq!(level_from(Some("nonsense")), LevelFilter::Info);
    }

    #[test]
    fn test_default_log_path() {
        assert!(default_log_path().ends_with(LOG_FILE));
    }
}
