//! Time subsystem.
//!
//! Provides frame timing utilities without coupling to the runtime:
//! one `FrameClock` per render loop, `tick()` once per presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
