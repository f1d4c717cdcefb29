//! Per-draw sprite transform.

use glam::{Mat4, Vec3, Vec4};
use rand::Rng;

/// Builds the column-major sprite transform.
///
/// The linear block mirrors by `direction`, scales uniformly by `scale` and
/// applies a small rotation `theta`; only the diagonal carries
/// `direction * scale`, the sine terms stay unscaled. Translation is `position`.
pub fn sprite_transform(position: Vec3, scale: f32, direction: f32, theta: f32) -> Mat4 {
    let (sin, cos) = theta.sin_cos();
    let diagonal = direction * scale * cos;

    Mat4::from_cols(
        Vec4::new(diagonal, -sin, 0.0, 0.0),
        Vec4::new(sin, diagonal, 0.0, 0.0),
        Vec4::new(0.0, 0.0, scale, 0.0),
        position.extend(1.0),
    )
}

/// Draws a rotation jitter angle uniformly from `[0, max)`.
pub fn rotation_jitter<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 { rng.gen_range(0.0..max) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f32 = 1e-6;

    #[test]
    fn mirrored_scaled_transform_structure() {
        let mut rng = StdRng::seed_from_u64(7);
        let theta = rotation_jitter(&mut rng, std::f32::consts::TAU / 100.0);
        let m = sprite_transform(Vec3::new(0.5, -0.5, 0.0), 2.0, -1.0, theta);

        assert_eq!(m.w_axis, Vec4::new(0.5, -0.5, 0.0, 1.0));

        // Recover cos θ from the unscaled sine term.
        let sin = m.y_axis.x;
        let cos = (1.0 - sin * sin).sqrt();
        assert!((m.x_axis.x - (-2.0 * cos)).abs() < EPS);
        assert!((m.y_axis.y - (-2.0 * cos)).abs() < EPS);
        assert!(m.x_axis.x < 0.0);
        assert_eq!(m.x_axis.y, -sin);
        assert_eq!(m.z_axis.z, 2.0);
    }

    #[test]
    fn zero_jitter_is_mirror_scale_translate() {
        let m = sprite_transform(Vec3::new(0.1, 0.2, 0.0), 0.5, 1.0, 0.0);
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!((p - Vec3::new(0.6, 0.7, 0.0)).length() < EPS);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let max = std::f32::consts::TAU / 100.0;
        for _ in 0..1000 {
            let t = rotation_jitter(&mut rng, max);
            assert!((0.0..max).contains(&t));
        }
    }

    #[test]
    fn zero_max_jitter_is_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(rotation_jitter(&mut rng, 0.0), 0.0);
    }
}
