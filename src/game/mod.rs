//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Timing and persistence are reached only through the `TickScheduler` and
//! `ScoreStore` traits handed to the engine.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{BEST_SCORE_KEY, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, GamePhase, GameState, Position, Snake};
