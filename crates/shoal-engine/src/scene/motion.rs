//! Per-frame fish movement and toroidal wraparound.

use glam::Vec3;
use rand::Rng;

use crate::input::DirectionalInput;

use super::fish::Direction;

/// Autonomous movement: horizontal drift along `direction` plus a zero-mean
/// vertical noise walk (difference of two uniform draws, scaled).
pub fn drift<R: Rng + ?Sized>(
    position: &mut Vec3,
    direction: Direction,
    drift_step: f32,
    jitter_step: f32,
    rng: &mut R,
) {
    position.x += drift_step * direction.sign();
    position.y += jitter_step * rng.gen_range(0.0f32..1.0);
    position.y -= jitter_step * rng.gen_range(0.0f32..1.0);
}

/// Keyboard movement: `step` per held direction, axes independent.
pub fn steer(position: &mut Vec3, input: DirectionalInput, step: f32) {
    if input.up {
        position.y += step;
    }
    if input.down {
        position.y -= step;
    }
    if input.left {
        position.x -= step;
    }
    if input.right {
        position.x += step;
    }
}

/// Wraps a position that reached the edge of `(-1, 1)` to the opposite edge.
///
/// Only the first matching rule fires per call, in the order x low, x high,
/// y low, y high; a simultaneous x and y overflow wraps x this frame and y on
/// the next.
pub fn wrap(position: &mut Vec3) {
    if position.x <= -1.0 {
        position.x = 1.0;
    } else if position.x >= 1.0 {
        position.x = -1.0;
    } else if position.y <= -1.0 {
        position.y = 1.0;
    } else if position.y >= 1.0 {
        position.y = -1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f32 = 1e-6;

    // ── wrap ──────────────────────────────────────────────────────────────

    #[test]
    fn wrap_x_low_wins_over_y() {
        let mut p = Vec3::new(-1.0, -1.5, 0.0);
        wrap(&mut p);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, -1.5);
    }

    #[test]
    fn wrap_x_high() {
        let mut p = Vec3::new(1.2, 2.0, 0.0);
        wrap(&mut p);
        assert_eq!(p, Vec3::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn wrap_y_low_when_x_inside() {
        let mut p = Vec3::new(0.3, -1.0, 0.0);
        wrap(&mut p);
        assert_eq!(p, Vec3::new(0.3, 1.0, 0.0));
    }

    #[test]
    fn wrap_y_high_when_x_inside() {
        let mut p = Vec3::new(-0.3, 1.01, 0.0);
        wrap(&mut p);
        assert_eq!(p, Vec3::new(-0.3, -1.0, 0.0));
    }

    #[test]
    fn wrap_leaves_interior_alone() {
        let mut p = Vec3::new(0.99, -0.99, 0.0);
        wrap(&mut p);
        assert_eq!(p, Vec3::new(0.99, -0.99, 0.0));
    }

    #[test]
    fn double_overflow_takes_two_frames() {
        let mut p = Vec3::new(1.0, 1.0, 0.0);
        wrap(&mut p);
        assert_eq!(p, Vec3::new(-1.0, 1.0, 0.0));
        // x now sits on the low edge, so x wraps again before y is considered.
        wrap(&mut p);
        assert_eq!(p, Vec3::new(1.0, 1.0, 0.0));
    }

    // ── drift ─────────────────────────────────────────────────────────────

    #[test]
    fn drift_moves_along_direction() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut right = Vec3::ZERO;
        let mut left = Vec3::ZERO;

        drift(&mut right, Direction::Right, 0.01, 0.01, &mut rng);
        drift(&mut left, Direction::Left, 0.01, 0.01, &mut rng);

        assert!((right.x - 0.01).abs() < EPS);
        assert!((left.x + 0.01).abs() < EPS);
    }

    #[test]
    fn drift_noise_is_bounded() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let mut p = Vec3::ZERO;
            drift(&mut p, Direction::Right, 0.0, 0.01, &mut rng);
            assert!(p.y > -0.01 && p.y < 0.01);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn drift_noise_has_near_zero_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut p = Vec3::ZERO;
        let n = 10_000;
        for _ in 0..n {
            drift(&mut p, Direction::Right, 0.0, 1.0, &mut rng);
        }
        // Random walk of n steps with std ≈ 0.41 each: |sum|/n stays small.
        assert!((p.y / n as f32).abs() < 0.05);
    }

    // ── steer ─────────────────────────────────────────────────────────────

    #[test]
    fn steer_without_input_is_noop() {
        let mut p = Vec3::new(0.1, 0.2, 0.0);
        steer(&mut p, DirectionalInput::default(), 0.02);
        assert_eq!(p, Vec3::new(0.1, 0.2, 0.0));
    }

    #[test]
    fn steer_diagonal_moves_both_axes() {
        let mut p = Vec3::ZERO;
        let input = DirectionalInput { up: true, right: true, ..Default::default() };
        steer(&mut p, input, 0.02);
        assert!((p.x - 0.02).abs() < EPS);
        assert!((p.y - 0.02).abs() < EPS);
    }

    #[test]
    fn steer_opposite_keys_cancel() {
        let mut p = Vec3::ZERO;
        let input = DirectionalInput { left: true, right: true, ..Default::default() };
        steer(&mut p, input, 0.02);
        assert!(p.x.abs() < EPS);
    }
}
