//! Resource and pass seam between the sprite renderer and the GPU.
//!
//! The scene only talks to [`SpriteBackend`] and [`SpritePass`]. The wgpu
//! implementation lives here; tests use the recording implementation in
//! [`testing`] and never touch a device.

/// Creates the GPU resources sprite drawing needs.
pub trait SpriteBackend {
    type Buffer;
    type BindGroup;

    /// Creates a buffer of `contents.len()` bytes with `usage` and uploads `contents`.
    ///
    /// `contents.len()` is a multiple of 4; see [`crate::render::buffer`].
    fn create_buffer(
        &mut self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> Self::Buffer;

    /// Overwrites `buffer` from offset 0 with `contents` (4-byte aligned length).
    fn write_buffer(&mut self, buffer: &Self::Buffer, contents: &[u8]);

    /// Builds a bind group for the sprite layout:
    /// binding 0 = color uniform, binding 1 = transform uniform.
    fn create_bind_group(
        &mut self,
        color: &Self::Buffer,
        transform: &Self::Buffer,
    ) -> Self::BindGroup;
}

/// Records the draw commands of one sprite pass.
pub trait SpritePass<B: SpriteBackend> {
    fn set_bind_group(&mut self, bind_group: &B::BindGroup);
    fn set_vertex_buffer(&mut self, buffer: &B::Buffer);
    fn set_index_buffer(&mut self, buffer: &B::Buffer);
    fn draw_indexed(&mut self, index_count: u32);
}

// ── wgpu ──────────────────────────────────────────────────────────────────

/// [`SpriteBackend`] over a live wgpu device.
///
/// Holds cheap clones of the device, queue and the sprite bind-group layout.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
}

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout: layout.clone(),
        }
    }
}

impl SpriteBackend for WgpuBackend {
    type Buffer = wgpu::Buffer;
    type BindGroup = wgpu::BindGroup;

    fn create_buffer(
        &mut self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: contents.len() as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.queue.write_buffer(&buffer, 0, contents);
        buffer
    }

    fn write_buffer(&mut self, buffer: &wgpu::Buffer, contents: &[u8]) {
        self.queue.write_buffer(buffer, 0, contents);
    }

    fn create_bind_group(&mut self, color: &wgpu::Buffer, transform: &wgpu::Buffer) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shoal sprite bind group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: color.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: transform.as_entire_binding(),
                },
            ],
        })
    }
}

impl SpritePass<WgpuBackend> for wgpu::RenderPass<'_> {
    fn set_bind_group(&mut self, bind_group: &wgpu::BindGroup) {
        wgpu::RenderPass::set_bind_group(self, 0, bind_group, &[]);
    }

    fn set_vertex_buffer(&mut self, buffer: &wgpu::Buffer) {
        wgpu::RenderPass::set_vertex_buffer(self, 0, buffer.slice(..));
    }

    fn set_index_buffer(&mut self, buffer: &wgpu::Buffer) {
        wgpu::RenderPass::set_index_buffer(self, buffer.slice(..), wgpu::IndexFormat::Uint16);
    }

    fn draw_indexed(&mut self, index_count: u32) {
        wgpu::RenderPass::draw_indexed(self, 0..index_count, 0, 0..1);
    }
}

// ── recording (tests) ─────────────────────────────────────────────────────
