//! GPU device + surface management.
//!
//! This module is responsible for:
//! - probing the host for GPU access and creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - owning the multisampled color target that frames render into before resolve
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod frame;
mod gpu;
mod init;
mod msaa;
mod surface;

pub use error::{InitError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use msaa::MultisampleTarget;
