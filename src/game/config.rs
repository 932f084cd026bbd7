use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;

/// Storage key the best score is persisted under
pub const BEST_SCORE_KEY: &str = "snakeBestScore";

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub grid_size: usize,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Number of segments the snake starts with
    pub initial_snake_length: usize,
    /// Target length at game start; the snake grows into it over the first ticks
    pub initial_target_length: usize,
    /// Side of the logical square canvas, in logical pixels
    pub canvas_size: u32,
    /// Key for the persisted best score
    pub best_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tick_rate_hz: 10,
            initial_snake_length: 3,
            initial_target_length: 4,
            canvas_size: 400,
            best_score_key: BEST_SCORE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a TOML config file. Missing fields fall back to their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        log::info!("Loaded game config from {:?}", path);
        Ok(config)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 5 {
            bail!("grid size must be at least 5, got {}", self.grid_size);
        }
        if self.tick_rate_hz == 0 {
            bail!("tick rate must be greater than zero");
        }
        if self.canvas_size == 0 {
            bail!("canvas size must be greater than zero");
        }
        if self.tile_size() < 4.0 {
            bail!(
                "canvas of {} px is too small for a {}x{} grid",
                self.canvas_size,
                self.grid_size,
                self.grid_size
            );
        }
        if self.initial_snake_length == 0 {
            bail!("initial snake length must be at least 1");
        }
        if self.initial_target_length < self.initial_snake_length {
            bail!(
                "initial target length {} is shorter than the starting snake ({})",
                self.initial_target_length,
                self.initial_snake_length
            );
        }
        let head = self.start_head();
        if head.x + 1 < self.initial_snake_length as i32 {
            bail!(
                "a snake of length {} does not fit on a {}x{} grid",
                self.initial_snake_length,
                self.grid_size,
                self.grid_size
            );
        }
        Ok(())
    }

    /// Interval between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    /// Head of the starting snake: (8, 10) on the default 20x20 grid
    pub fn start_head(&self) -> Position {
        let n = self.grid_size as i32;
        Position::new(n * 2 / 5, n / 2)
    }

    /// Where food sits before the first game: the grid centre
    pub fn idle_food(&self) -> Position {
        let n = self.grid_size as i32;
        Position::new(n / 2, n / 2)
    }

    /// Size of one grid tile on the logical canvas
    pub fn tile_size(&self) -> f32 {
        self.canvas_size as f32 / self.grid_size as f32
    }
}
