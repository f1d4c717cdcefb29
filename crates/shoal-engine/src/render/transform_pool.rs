//! Transform uniform buffers, one per draw.
//!
//! Each fish needs its own transform buffer within a frame because queue
//! writes land before the frame's commands execute. `Transient` allocates a
//! fresh buffer per fish per frame; `Pooled` keeps one slot per draw index and
//! rewrites it on later frames, so allocation stops after the first frame.

use glam::Mat4;

use super::backend::SpriteBackend;
use super::buffer;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TransformStrategy {
    /// New buffer for every fish, every frame.
    Transient,
    /// Slot ring reused across frames.
    #[default]
    Pooled,
}

/// Transform buffer handed to one fish's two draws.
pub enum TransformSlot<'a, B: SpriteBackend> {
    Fresh(B::Buffer),
    Pooled(&'a B::Buffer),
}

impl<B: SpriteBackend> TransformSlot<'_, B> {
    pub fn buffer(&self) -> &B::Buffer {
        match self {
            TransformSlot::Fresh(b) => b,
            TransformSlot::Pooled(b) => b,
        }
    }
}

pub struct TransformPool<B: SpriteBackend> {
    strategy: TransformStrategy,
    slots: Vec<B::Buffer>,
    cursor: usize,
}

impl<B: SpriteBackend> TransformPool<B> {
    pub fn new(strategy: TransformStrategy) -> Self {
        Self {
            strategy,
            slots: Vec::new(),
            cursor: 0,
        }
    }

    /// Number of pooled slots allocated so far.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Rewinds the slot cursor. Call once per frame before the first upload.
    pub fn begin_frame(&mut self) {
        self.cursor = 0;
    }

    /// Uploads `matrix` and returns the buffer holding it.
    pub fn upload(&mut self, backend: &mut B, matrix: &Mat4) -> TransformSlot<'_, B> {
        let cols = matrix.to_cols_array();

        match self.strategy {
            TransformStrategy::Transient => TransformSlot::Fresh(buffer::allocate(
                backend,
                "shoal transform",
                &cols,
                wgpu::BufferUsages::UNIFORM,
            )),
            TransformStrategy::Pooled => {
                let index = self.cursor;
                self.cursor += 1;

                if index < self.slots.len() {
                    buffer::rewrite(backend, &self.slots[index], &cols);
                } else {
                    let slot = buffer::allocate(
                        backend,
                        "shoal pooled transform",
                        &cols,
                        wgpu::BufferUsages::UNIFORM,
                    );
                    self.slots.push(slot);
                }

                TransformSlot::Pooled(&self.slots[index])
            }
        }
    }
}
