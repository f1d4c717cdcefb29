//! The aquarium scene.
//!
//! Responsibilities:
//! - spawn the school and the keyboard-controlled main fish
//! - move, wrap and draw every fish once per frame through a `SpriteBackend`
//! - expose the whole thing as a runtime `App` (`FishTank`)

mod aquarium;
mod config;
mod fish;
mod geometry;
mod motion;
mod tank;

pub use aquarium::{Aquarium, FrameStats};
pub use config::AquariumConfig;
pub use fish::{Direction, Fish, FishDesc, Mesh};
pub use tank::FishTank;
