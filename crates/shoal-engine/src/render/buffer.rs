//! CPU array → GPU buffer allocation.
//!
//! Every buffer the sprite renderer uses goes through [`allocate`] (or
//! [`rewrite`] for reused transform slots). Sizes are rounded up to
//! [`BUFFER_ALIGNMENT`] because wgpu rejects copies whose length is not a
//! multiple of 4; trailing padding is zero and never read.

use std::borrow::Cow;

use bytemuck::Pod;

use super::backend::SpriteBackend;

/// Copy alignment required by wgpu queue writes, in bytes.
pub const BUFFER_ALIGNMENT: usize = wgpu::COPY_BUFFER_ALIGNMENT as usize;

/// Rounds `len` up to the next multiple of [`BUFFER_ALIGNMENT`].
#[inline]
pub const fn aligned_size(len: usize) -> usize {
    (len + BUFFER_ALIGNMENT - 1) & !(BUFFER_ALIGNMENT - 1)
}

/// Returns `bytes` unchanged if already aligned, otherwise a zero-padded copy.
pub fn aligned_bytes(bytes: &[u8]) -> Cow<'_, [u8]> {
    if bytes.len() % BUFFER_ALIGNMENT == 0 {
        return Cow::Borrowed(bytes);
    }

    let mut padded = vec![0u8; aligned_size(bytes.len())];
    padded[..bytes.len()].copy_from_slice(bytes);
    Cow::Owned(padded)
}

/// Uploads `data` into a new GPU buffer with `usage`.
///
/// The buffer is `aligned_size(size_of_val(data))` bytes; the unpadded region
/// equals `data` exactly.
pub fn allocate<B, T>(backend: &mut B, label: &str, data: &[T], usage: wgpu::BufferUsages) -> B::Buffer
where
    B: SpriteBackend + ?Sized,
    T: Pod,
{
    let bytes = aligned_bytes(bytemuck::cast_slice(data));
    debug_assert_eq!(bytes.len() % BUFFER_ALIGNMENT, 0);
    backend.create_buffer(label, &bytes, usage)
}

/// Rewrites an existing buffer created by [`allocate`] from the same-sized `data`.
pub fn rewrite<B, T>(backend: &mut B, buffer: &B::Buffer, data: &[T])
where
    B: SpriteBackend + ?Sized,
    T: Pod,
{
    let bytes = aligned_bytes(bytemuck::cast_slice(data));
    backend.write_buffer(buffer, &bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::testing::RecordingBackend;

    // ── aligned_size ──────────────────────────────────────────────────────

    #[test]
    fn aligned_size_rounds_up() {
        assert_eq!(aligned_size(0), 0);
        assert_eq!(aligned_size(1), 4);
        assert_eq!(aligned_size(10), 12);
        assert_eq!(aligned_size(12), 12);
        assert_eq!(aligned_size(30), 32);
    }

    // ── aligned_bytes ─────────────────────────────────────────────────────

    #[test]
    fn aligned_input_is_borrowed() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        assert!(matches!(aligned_bytes(&data), Cow::Borrowed(_)));
    }

    #[test]
    fn ten_bytes_pad_to_twelve_with_zeros() {
        let data: Vec<u8> = (1..=10).collect();
        let padded = aligned_bytes(&data);

        assert_eq!(padded.len(), 12);
        assert_eq!(&padded[..10], data.as_slice());
        assert_eq!(&padded[10..], &[0, 0]);
    }

    // ── allocate ──────────────────────────────────────────────────────────

    #[test]
    fn allocate_pads_odd_index_data() {
        let mut backend = RecordingBackend::default();
        let indices: [u16; 5] = [0, 1, 2, 3, 4];

        let id = allocate(&mut backend, "idx", &indices, wgpu::BufferUsages::INDEX);
        let buf = backend.buffer(id);

        assert_eq!(buf.bytes.len(), 12);
        assert_eq!(&buf.bytes[..10], bytemuck::cast_slice::<u16, u8>(&indices));
        assert_eq!(&buf.bytes[10..], &[0, 0]);
        assert_eq!(buf.usage, wgpu::BufferUsages::INDEX);
    }

    #[test]
    fn allocate_keeps_aligned_float_data() {
        let mut backend = RecordingBackend::default();
        let color = [0.25f32, 0.5, 0.75, 1.0];

        let id = allocate(&mut backend, "color", &color, wgpu::BufferUsages::UNIFORM);

        assert_eq!(backend.buffer(id).bytes, bytemuck::cast_slice::<f32, u8>(&color));
    }

    #[test]
    fn rewrite_replaces_contents_in_place() {
        let mut backend = RecordingBackend::default();
        let id = allocate(&mut backend, "m", &[1.0f32; 4], wgpu::BufferUsages::UNIFORM);

        rewrite(&mut backend, &id, &[2.0f32; 4]);

        assert_eq!(backend.buffers.len(), 1);
        assert_eq!(backend.writes, 1);
        assert_eq!(backend.buffer(id).bytes, bytemuck::cast_slice::<f32, u8>(&[2.0f32; 4]));
    }
}
