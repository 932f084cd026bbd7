//! Data and cache directory paths
//!
//! Uses the platform directories from the `dirs` crate:
//! - Linux: `~/.local/share/grid_snake/`, `~/.cache/grid_snake/`
//! - macOS: `~/Library/Application Support/grid_snake/`, `~/Library/Caches/grid_snake/`
//! - Windows: `%APPDATA%\grid_snake\`, `%LOCALAPPDATA%\grid_snake\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "grid_snake";
const SCORE_FILE: &str = "best-score.json";

/// Get the application data directory, creating it if needed
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine data directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))?;
    Ok(dir)
}

/// Get path to the best-score file
pub fn score_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(SCORE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_file_name() {
        if let Ok(path) = score_file_path() {
            assert!(path.ends_with(SCORE_FILE));
            assert!(path.parent().unwrap().ends_with(APP_NAME));
        }
    }
}
