//! Terminal rendering
//!
//! [`Scene::compose`] turns game state into shapes on a logical canvas,
//! [`BoardWidget`] rasterises them and [`Renderer`] lays out the frame with
//! the score header, controls footer and the start/game-over overlay.

pub mod board;
pub mod renderer;
pub mod scene;

pub use board::BoardWidget;
pub use renderer::{Renderer, overlay_text};
pub use scene::{Rgba, Scene, Shape, segment_alpha};
