//! Best-score persistence
//!
//! The engine only sees [`ScoreStore`], a get/set-integer-by-key interface.
//! [`JsonFileStore`] backs the real game; [`MemoryStore`] backs tests.

pub mod file_store;
pub mod paths;

pub use file_store::JsonFileStore;

use anyhow::Result;
use std::collections::HashMap;

/// Integer storage keyed by name
pub trait ScoreStore {
    /// Read the value under `key`. Missing or malformed values read as 0.
    fn get(&self, key: &str) -> u32;

    /// Persist `value` under `key`
    fn set(&mut self, key: &str, value: u32) -> Result<()>;
}

/// Parse a persisted score, accepting surrounding whitespace
pub fn parse_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// In-memory store holding raw strings, like a browser's local storage
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// Number of successful `set` calls
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, which does not have to be numeric
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.values.insert(key.to_string(), raw.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> u32 {
        match self.values.get(key) {
            Some(raw) => parse_score(raw).unwrap_or_else(|| {
                log::warn!("Ignoring malformed value {:?} for {}", raw, key);
                0
            }),
            None => 0,
        }
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("12"), Some(12));
        assert_eq!(parse_score(" 7\n"), Some(7));
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("-3"), None);
        assert_eq!(parse_score("4.5"), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_memory_store_missing_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.get("snakeBestScore"), 0);
    }

    #[test]
    fn test_memory_store_malformed_reads_zero() {
        let store = MemoryStore::new().with_raw("snakeBestScore", "not a number");
        assert_eq!(store.get("snakeBestScore"), 0);
    }

    #[test]
    fn test_memory_store_set_get() {
        let mut store = MemoryStore::new();
        store.set("snakeBestScore", 42).unwrap();
        assert_eq!(store.get("snakeBestScore"), 42);
        assert_eq!(store.raw("snakeBestScore"), Some("42"));
        assert_eq!(store.writes, 1);
    }
}
