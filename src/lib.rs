//! Grid Snake - a fixed-tick snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module), driven tick by tick
//! - Tick scheduling behind a trait (scheduler module)
//! - Best-score persistence behind a trait (storage module)
//! - Canvas-style rendering rasterised into the terminal (render module)
//! - Keyboard mapping (input module) and the interactive loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod storage;
