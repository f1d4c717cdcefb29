use std::f32::consts::TAU;

use glam::Vec3;

use crate::coords::ColorRgba;
use crate::render::TransformStrategy;

use super::fish::{Direction, FishDesc};

/// Scene configuration.
///
/// Steps are per frame in normalized device units.
#[derive(Debug, Clone)]
pub struct AquariumConfig {
    /// Number of autonomous background fish.
    pub school_size: usize,

    /// Horizontal drift of background fish per frame (signed by direction).
    pub drift_step: f32,

    /// Scale of the zero-mean vertical noise walk of background fish.
    pub jitter_step: f32,

    /// Displacement of the main fish per frame per held arrow key.
    pub steer_step: f32,

    /// Upper bound (exclusive) of the per-draw rotation jitter, in radians.
    pub max_rotation_jitter: f32,

    /// Background fish scale is `max(min_scale, U[0,1) * max_scale)`.
    pub min_scale: f32,
    pub max_scale: f32,

    pub main_color: ColorRgba,
    pub main_scale: f32,
    pub main_direction: Direction,

    pub clear_color: ColorRgba,

    pub transforms: TransformStrategy,

    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            school_size: 100,
            drift_step: 0.01,
            jitter_step: 0.01,
            steer_step: 0.02,
            max_rotation_jitter: TAU / 100.0,
            min_scale: 0.1,
            max_scale: 0.3,
            main_color: ColorRgba::new(1.0, 0.0, 0.0, 0.5),
            main_scale: 1.0,
            main_direction: Direction::Left,
            clear_color: ColorRgba::transparent(),
            transforms: TransformStrategy::Pooled,
            seed: None,
        }
    }
}

impl AquariumConfig {
    pub fn with_school_size(mut self, n: usize) -> Self {
        self.school_size = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_transforms(mut self, strategy: TransformStrategy) -> Self {
        self.transforms = strategy;
        self
    }

    pub fn with_steer_step(mut self, step: f32) -> Self {
        self.steer_step = step;
        self
    }

    /// Descriptor of the keyboard-controlled fish, centred at the origin.
    pub fn main_desc(&self) -> FishDesc {
        FishDesc {
            position: Vec3::ZERO,
            color: self.main_color,
            scale: self.main_scale,
            direction: self.main_direction,
            is_main: true,
        }
    }
}
