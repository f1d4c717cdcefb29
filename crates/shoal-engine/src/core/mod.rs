//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the scene:
//! lifecycle callbacks plus a per-frame context that hides surface handling.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
