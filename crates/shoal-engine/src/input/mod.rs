//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s through `platform`.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{DirectionalInput, InputEvent, Key, KeyState};
