use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::{ScoreStore, parse_score};

/// Scores kept as a flat JSON object in a single file
///
/// The file is read once when the store is opened; every `set` rewrites it.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty store; the
    /// first write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(values) => {
                    log::info!("Loaded scores from {:?}", path);
                    values
                }
                Err(e) => {
                    log::warn!("Failed to parse score file {:?}: {}", path, e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No score file at {:?}, starting fresh", path);
                Map::new()
            }
            Err(e) => {
                log::warn!("Failed to read score file {:?}: {}", path, e);
                Map::new()
            }
        };

        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> u32 {
        let parsed = match self.values.get(key) {
            None => return 0,
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => parse_score(s),
            Some(_) => None,
        };

        parsed.unwrap_or_else(|| {
            log::warn!("Ignoring malformed value for {} in {:?}", key, self.path);
            0
        })
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), Value::from(value));
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("best-score.json"));
        assert_eq!(store.get("snakeBestScore"), 0);
    }

    #[test]
    fn test_value_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("best-score.json");

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.path(), path.as_path());
        store.set("snakeBestScore", 17).unwrap();
        assert!(store.path().exists());

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("snakeBestScore"), 17);
    }

    #[test]
    fn test_string_value_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best-score.json");
        std::fs::write(&path, r#"{"snakeBestScore": "9"}"#).unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("snakeBestScore"), 9);
    }

    #[test]
    fn test_malformed_values_read_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best-score.json");
        std::fs::write(
            &path,
            r#"{"a": "abc", "b": -4, "c": [1], "d": 1.5, "e": 99999999999}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path);
        for key in ["a", "b", "c", "d", "e"] {
            assert_eq!(store.get(key), 0, "key {key}");
        }
    }

    #[test]
    fn test_invalid_json_starts_empty_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best-score.json");
        std::fs::write(&path, "this is not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get("snakeBestScore"), 0);

        store.set("snakeBestScore", 3).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["snakeBestScore"], Value::from(3));
    }

    #[test]
    fn test_other_keys_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best-score.json");
        std::fs::write(&path, r#"{"other": 5}"#).unwrap();

        let mut store = JsonFileStore::open(&path);
        store.set("snakeBestScore", 2).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("other"), 5);
        assert_eq!(reopened.get("snakeBestScore"), 2);
    }
}
