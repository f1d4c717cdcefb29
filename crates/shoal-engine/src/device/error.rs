use thiserror::Error;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Failures of the one-time GPU setup phase.
///
/// None of these are retried. The runtime aborts initialization and the
/// binary reports the message to the user.
#[derive(Debug, Error)]
pub enum InitError {
    /// The host exposes no GPU access at all.
    #[error("Your system does not support GPU rendering")]
    Unsupported(#[source] wgpu::RequestAdapterError),

    /// A GPU exists, but none can present to the window surface.
    #[error("no GPU adapter can present to this window")]
    NoAdapter(#[source] wgpu::RequestAdapterError),

    /// The adapter refused the device request.
    #[error("failed to create wgpu device/queue")]
    NoDevice(#[source] wgpu::RequestDeviceError),

    #[error("the surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("window has zero size")]
    ZeroSizedWindow,
}

impl InitError {
    /// Whether this error means GPU rendering is unavailable on this host.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, InitError::Unsupported(_))
    }
}
