/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,

    /// View of the presentable surface image.
    pub view: wgpu::TextureView,

    /// View of the multisampled target, when multisampling is enabled.
    pub msaa_view: Option<wgpu::TextureView>,

    pub encoder: wgpu::CommandEncoder,
}
