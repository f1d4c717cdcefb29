//! Color types shared by the scene and the render pass.

mod color;

pub use color::ColorRgba;
