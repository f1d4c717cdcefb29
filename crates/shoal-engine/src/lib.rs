//! Shoal engine crate.
//!
//! A GPU-rendered aquarium: a school of drifting fish plus one keyboard-steered
//! fish, drawn with wgpu into a winit window.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod scene;
