//! Fish entities and the GPU resources each one owns.

use glam::Vec3;
use rand::Rng;

use crate::coords::ColorRgba;
use crate::render::buffer;
use crate::render::{SpriteBackend, SpriteVertex};

use super::config::AquariumConfig;
use super::geometry;

/// Facing of a fish. Mirrors the geometry and signs the autonomous drift.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// Everything needed to create a fish.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FishDesc {
    /// x, y in normalized device space; z unused.
    pub position: Vec3,
    pub color: ColorRgba,
    pub scale: f32,
    pub direction: Direction,
    pub is_main: bool,
}

impl FishDesc {
    /// Random background fish: random color, position in (-1, 1)², scale in
    /// `[min_scale, max_scale)`, facing right.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &AquariumConfig) -> Self {
        let mut unit = || rng.gen_range(0.0f32..1.0);

        let color = ColorRgba::new(unit(), unit(), unit(), unit());
        let x = unit() - unit();
        let y = unit() - unit();
        let scale = (unit() * config.max_scale).max(config.min_scale);

        Self {
            position: Vec3::new(x, y, 0.0),
            color,
            scale,
            direction: Direction::Right,
            is_main: false,
        }
    }
}

/// Vertex + index buffer pair with its index count.
pub struct Mesh<B: SpriteBackend> {
    pub vertices: B::Buffer,
    pub indices: B::Buffer,
    pub index_count: u32,
}

impl<B: SpriteBackend> Mesh<B> {
    fn create(backend: &mut B, label: &str, vertices: &[SpriteVertex], indices: &[u16]) -> Self {
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "{label}: index out of range"
        );

        Self {
            vertices: buffer::allocate(backend, label, vertices, wgpu::BufferUsages::VERTEX),
            indices: buffer::allocate(backend, label, indices, wgpu::BufferUsages::INDEX),
            index_count: indices.len() as u32,
        }
    }
}

/// One animated fish.
///
/// Owns six GPU buffers for its whole lifetime: body and eye meshes plus
/// the body and eye color uniforms. Only the animation fields change after
/// creation.
pub struct Fish<B: SpriteBackend> {
    pub position: Vec3,
    pub scale: f32,
    pub direction: Direction,
    is_main: bool,

    body: Mesh<B>,
    eye: Mesh<B>,
    body_color: B::Buffer,
    eye_color: B::Buffer,
}

impl<B: SpriteBackend> Fish<B> {
    /// Builds geometry and uploads all owned buffers.
    pub fn create(backend: &mut B, desc: FishDesc) -> Self {
        debug_assert!(desc.scale > 0.0, "fish scale must be positive");
        debug_assert!(desc.color.is_finite(), "fish color must be finite");

        let body = Mesh::create(
            backend,
            "shoal fish body",
            &geometry::BODY_VERTICES,
            &geometry::BODY_INDICES,
        );
        let eye = Mesh::create(
            backend,
            "shoal fish eye",
            &geometry::eye_vertices(desc.direction),
            &geometry::EYE_INDICES,
        );

        let uniform = wgpu::BufferUsages::UNIFORM;
        let body_color = buffer::allocate(backend, "shoal fish color", &desc.color.to_array(), uniform);
        let eye_color = buffer::allocate(
            backend,
            "shoal fish eye color",
            &ColorRgba::black().to_array(),
            uniform,
        );

        Self {
            position: desc.position,
            scale: desc.scale,
            direction: desc.direction,
            is_main: desc.is_main,
            body,
            eye,
            body_color,
            eye_color,
        }
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn body(&self) -> &Mesh<B> {
        &self.body
    }

    pub fn eye(&self) -> &Mesh<B> {
        &self.eye
    }

    pub fn body_color(&self) -> &B::Buffer {
        &self.body_color
    }

    pub fn eye_color(&self) -> &B::Buffer {
        &self.eye_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::testing::RecordingBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn desc(direction: Direction) -> FishDesc {
        FishDesc {
            position: Vec3::new(0.25, -0.25, 0.0),
            color: ColorRgba::new(0.1, 0.2, 0.3, 0.4),
            scale: 0.5,
            direction,
            is_main: false,
        }
    }

    #[test]
    fn create_allocates_six_aligned_buffers() {
        let mut backend = RecordingBackend::default();
        let _fish = Fish::create(&mut backend, desc(Direction::Right));

        assert_eq!(backend.buffers.len(), 6);
        assert!(backend.buffers.iter().all(|b| b.bytes.len() % 4 == 0));
    }

    #[test]
    fn mesh_index_counts_are_fixed() {
        let mut backend = RecordingBackend::default();
        let fish = Fish::create(&mut backend, desc(Direction::Left));

        assert_eq!(fish.body().index_count, 15);
        assert_eq!(fish.eye().index_count, 6);
        // 15 u16 indices = 30 bytes, padded to 32.
        assert_eq!(backend.buffer(fish.body().indices).bytes.len(), 32);
        assert_eq!(backend.buffer(fish.body().vertices).bytes.len(), 7 * 8);
    }

    #[test]
    fn color_uniforms_hold_fish_and_black() {
        let mut backend = RecordingBackend::default();
        let fish = Fish::create(&mut backend, desc(Direction::Right));

        assert_eq!(backend.buffer(*fish.body_color()).floats(), vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(backend.buffer(*fish.eye_color()).floats(), vec![0.0, 0.0, 0.0, 1.0]);
        assert!(backend.buffer(*fish.eye_color()).usage.contains(wgpu::BufferUsages::UNIFORM));
    }

    #[test]
    fn eye_buffer_follows_direction() {
        let mut backend = RecordingBackend::default();
        let right = Fish::create(&mut backend, desc(Direction::Right));
        let left = Fish::create(&mut backend, desc(Direction::Left));

        let ry = backend.buffer(right.eye().vertices).floats()[1];
        let ly = backend.buffer(left.eye().vertices).floats()[1];
        assert!(ry > 0.0 && ly < 0.0);
    }

    #[test]
    fn random_desc_respects_bounds() {
        let config = AquariumConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let d = FishDesc::random(&mut rng, &config);
            assert!(d.position.x > -1.0 && d.position.x < 1.0);
            assert!(d.position.y > -1.0 && d.position.y < 1.0);
            assert_eq!(d.position.z, 0.0);
            assert!(d.scale >= config.min_scale && d.scale < config.max_scale);
            assert_eq!(d.direction, Direction::Right);
            assert!(!d.is_main);
        }
    }
}
