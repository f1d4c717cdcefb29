//! GPU rendering subsystem.
//!
//! Everything between CPU-side sprite data and recorded draw calls:
//! - buffer allocation with copy alignment (`buffer`)
//! - the single sprite pipeline and its bind-group layout (`pipeline`)
//! - per-draw transforms and their uniform buffers (`transform`, `transform_pool`)
//! - the backend seam that lets the scene run without a device (`backend`)
//!
//! Convention: sprite geometry is in normalized device coordinates, +Y up.

pub mod backend;
pub mod buffer;
mod ctx;
pub mod pipeline;
pub mod transform;
pub mod transform_pool;

pub use backend::{SpriteBackend, SpritePass, WgpuBackend};
pub use ctx::{RenderCtx, RenderTarget};
pub use pipeline::{SpritePipeline, SpriteVertex};
pub use transform_pool::{TransformPool, TransformStrategy};
