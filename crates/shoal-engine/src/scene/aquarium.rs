//! Scene context: the fish, their GPU backend and per-frame drawing.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::input::DirectionalInput;
use crate::render::transform::{rotation_jitter, sprite_transform};
use crate::render::{SpriteBackend, SpritePass, TransformPool};

use super::config::AquariumConfig;
use super::fish::{Fish, FishDesc, Mesh};
use super::motion;

/// Counters for one drawn frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub fish: u32,
    pub draw_calls: u32,
    pub bind_groups: u32,
}

/// Owns the backend, the school of autonomous fish and the single main fish.
///
/// Nothing here is global: independent aquariums can coexist, and the
/// recording backend drives the same code in tests.
pub struct Aquarium<B: SpriteBackend> {
    backend: B,
    school: Vec<Fish<B>>,
    main: Fish<B>,
    transforms: TransformPool<B>,
    rng: StdRng,
    config: AquariumConfig,
}

impl<B: SpriteBackend> Aquarium<B> {
    /// Spawns `config.school_size` random background fish plus the main fish.
    pub fn new(mut backend: B, config: AquariumConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let school: Vec<Fish<B>> = (0..config.school_size)
            .map(|_| {
                let desc = FishDesc::random(&mut rng, &config);
                Fish::create(&mut backend, desc)
            })
            .collect();
        let main = Fish::create(&mut backend, config.main_desc());

        debug_assert!(main.is_main() && school.iter().all(|f| !f.is_main()));

        Self {
            backend,
            school,
            main,
            transforms: TransformPool::new(config.transforms),
            rng,
            config,
        }
    }

    pub fn config(&self) -> &AquariumConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn school(&self) -> &[Fish<B>] {
        &self.school
    }

    pub fn main_fish(&self) -> &Fish<B> {
        &self.main
    }

    pub fn main_fish_mut(&mut self) -> &mut Fish<B> {
        &mut self.main
    }

    /// Total number of fish, main included.
    pub fn len(&self) -> usize {
        self.school.len() + 1
    }

    /// Advances and draws one frame into `pass`.
    ///
    /// Background fish move and draw in spawn order; the main fish is steered
    /// by `input` and drawn last so it stays on top. Movement always precedes
    /// the transform so the frame shows the new position.
    pub fn draw_frame<P>(&mut self, input: DirectionalInput, pass: &mut P) -> FrameStats
    where
        P: SpritePass<B> + ?Sized,
    {
        let Self {
            backend,
            school,
            main,
            transforms,
            rng,
            config,
        } = self;

        transforms.begin_frame();
        let mut stats = FrameStats::default();

        for fish in school.iter_mut() {
            motion::drift(
                &mut fish.position,
                fish.direction,
                config.drift_step,
                config.jitter_step,
                rng,
            );
            motion::wrap(&mut fish.position);

            let theta = rotation_jitter(rng, config.max_rotation_jitter);
            draw_fish(backend, transforms, fish, theta, pass, &mut stats);
        }

        motion::steer(&mut main.position, input, config.steer_step);
        motion::wrap(&mut main.position);

        let theta = rotation_jitter(rng, config.max_rotation_jitter);
        draw_fish(backend, transforms, main, theta, pass, &mut stats);

        stats
    }
}

/// Uploads one transform and issues the body and eye draws sharing it.
fn draw_fish<B, P>(
    backend: &mut B,
    transforms: &mut TransformPool<B>,
    fish: &Fish<B>,
    theta: f32,
    pass: &mut P,
    stats: &mut FrameStats,
) where
    B: SpriteBackend,
    P: SpritePass<B> + ?Sized,
{
    let matrix = sprite_transform(fish.position, fish.scale, fish.direction.sign(), theta);
    let transform = transforms.upload(backend, &matrix);

    let parts: [(&Mesh<B>, &B::Buffer); 2] = [
        (fish.body(), fish.body_color()),
        (fish.eye(), fish.eye_color()),
    ];

    for (mesh, color) in parts {
        let bind_group = backend.create_bind_group(color, transform.buffer());
        pass.set_bind_group(&bind_group);
        pass.set_vertex_buffer(&mesh.vertices);
        pass.set_index_buffer(&mesh.indices);
        pass.draw_indexed(mesh.index_count);

        stats.bind_groups += 1;
        stats.draw_calls += 1;
    }

    stats.fish += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TransformStrategy;
    use crate::render::backend::testing::{PassCommand, RecordingBackend, RecordingPass};
    use glam::Vec3;

    fn aquarium(school: usize, strategy: TransformStrategy) -> Aquarium<RecordingBackend> {
        let config = AquariumConfig::default()
            .with_school_size(school)
            .with_seed(1234)
            .with_transforms(strategy);
        Aquarium::new(RecordingBackend::default(), config)
    }

    #[test]
    fn spawns_school_plus_one_main() {
        let aq = aquarium(100, TransformStrategy::Pooled);

        assert_eq!(aq.len(), 101);
        assert_eq!(aq.school().iter().filter(|f| f.is_main()).count(), 0);
        assert!(aq.main_fish().is_main());
        assert_eq!(aq.backend().buffers.len(), 101 * 6);
    }

    #[test]
    fn one_idle_frame_issues_two_draws_per_fish() {
        let mut aq = aquarium(100, TransformStrategy::Pooled);
        let start = aq.main_fish().position;
        let mut pass = RecordingPass::default();

        let stats = aq.draw_frame(DirectionalInput::default(), &mut pass);

        assert_eq!(stats.draw_calls, 202);
        assert_eq!(stats.fish, 101);
        let draws = pass.draws();
        assert_eq!(draws.len(), 202);
        assert!(draws.chunks(2).all(|pair| pair == [15, 6]));
        assert_eq!(aq.main_fish().position, start);
    }

    #[test]
    fn draws_bind_body_then_eye_with_shared_transform() {
        let mut aq = aquarium(1, TransformStrategy::Transient);
        let mut pass = RecordingPass::default();
        aq.draw_frame(DirectionalInput::default(), &mut pass);

        let groups: Vec<_> = pass
            .commands
            .iter()
            .filter_map(|c| match c {
                PassCommand::SetBindGroup(g) => Some(*g),
                _ => None,
            })
            .collect();

        // Two fish, two bind groups each.
        assert_eq!(groups.len(), 4);
        let fish = &aq.school()[0];
        assert_eq!(groups[0].color, *fish.body_color());
        assert_eq!(groups[1].color, *fish.eye_color());
        assert_eq!(groups[0].transform, groups[1].transform);
        assert_ne!(groups[1].transform, groups[2].transform);
        assert_eq!(groups[2].color, *aq.main_fish().body_color());
    }

    #[test]
    fn main_fish_is_drawn_last() {
        let mut aq = aquarium(5, TransformStrategy::Pooled);
        let mut pass = RecordingPass::default();
        aq.draw_frame(DirectionalInput::default(), &mut pass);

        let last_vertex_buffer = pass
            .commands
            .iter()
            .rev()
            .find_map(|c| match c {
                PassCommand::SetVertexBuffer(b) => Some(*b),
                _ => None,
            });
        assert_eq!(last_vertex_buffer, Some(aq.main_fish().eye().vertices));
    }

    #[test]
    fn holding_right_moves_main_by_frames_times_step() {
        let config = AquariumConfig::default()
            .with_school_size(3)
            .with_seed(99)
            .with_steer_step(0.03);
        let mut aq = Aquarium::new(RecordingBackend::default(), config);
        let step = aq.config().steer_step;
        assert_eq!(step, 0.03);
        let frames = 20;
        let input = DirectionalInput { right: true, ..Default::default() };

        for _ in 0..frames {
            aq.draw_frame(input, &mut RecordingPass::default());
        }

        let p = aq.main_fish().position;
        assert!((p.x - frames as f32 * step).abs() < 1e-5);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn main_fish_wraps_at_edge() {
        let mut aq = aquarium(0, TransformStrategy::Pooled);
        aq.main_fish_mut().position = Vec3::new(0.99, 0.0, 0.0);
        let input = DirectionalInput { right: true, ..Default::default() };

        aq.draw_frame(input, &mut RecordingPass::default());

        assert_eq!(aq.main_fish().position.x, -1.0);
    }

    #[test]
    fn background_fish_stay_in_bounds_over_time() {
        let mut aq = aquarium(50, TransformStrategy::Pooled);
        for _ in 0..500 {
            aq.draw_frame(DirectionalInput::default(), &mut RecordingPass::default());
            for f in aq.school() {
                // Wrap may leave one axis on the edge for a single frame.
                assert!(f.position.x >= -1.0 && f.position.x <= 1.0);
                assert!(f.position.y > -1.05 && f.position.y < 1.05);
            }
        }
    }

    #[test]
    fn pooled_transforms_stop_allocating_after_first_frame() {
        let mut aq = aquarium(10, TransformStrategy::Pooled);
        aq.draw_frame(DirectionalInput::default(), &mut RecordingPass::default());
        let after_first = aq.backend().buffers.len();

        aq.draw_frame(DirectionalInput::default(), &mut RecordingPass::default());

        assert_eq!(aq.backend().buffers.len(), after_first);
        assert_eq!(after_first, 11 * 6 + 11);
    }

    #[test]
    fn transient_transforms_allocate_per_fish_per_frame() {
        let mut aq = aquarium(10, TransformStrategy::Transient);
        let static_buffers = aq.backend().buffers.len();

        aq.draw_frame(DirectionalInput::default(), &mut RecordingPass::default());
        aq.draw_frame(DirectionalInput::default(), &mut RecordingPass::default());

        assert_eq!(aq.backend().buffers.len(), static_buffers + 2 * 11);
        assert_eq!(aq.backend().bind_groups, 2 * 11 * 2);
    }
}
