//! Fish silhouette and eye geometry, in sprite-local units.

use crate::render::SpriteVertex;

use super::fish::Direction;

/// Seven-vertex closed outline: nose, upper body, tail, lower body.
pub const BODY_VERTICES: [SpriteVertex; 7] = [
    SpriteVertex::new(0.5, 0.0),    // nose
    SpriteVertex::new(0.2, 0.25),   // upper body
    SpriteVertex::new(-0.2, 0.15),  // upper tail base
    SpriteVertex::new(-0.4, 0.3),   // upper tail tip
    SpriteVertex::new(-0.4, -0.3),  // lower tail tip
    SpriteVertex::new(-0.2, -0.15), // lower tail base
    SpriteVertex::new(0.2, -0.25),  // lower body
];

pub const BODY_INDICES: [u16; 15] = [
    0, 1, 6, // front
    1, 2, 6, // upper mid-body
    2, 5, 6, // rear
    2, 3, 5, // tail top
    3, 4, 5, // tail fin
];

pub const EYE_INDICES: [u16; 6] = [0, 1, 3, 0, 2, 3];

pub const EYE_HALF_SIZE: f32 = 0.02;

const EYE_X: f32 = 0.2;
const EYE_Y: f32 = 0.15;

/// Eye quad for a fish facing `direction`.
///
/// The sprite transform mirrors both axes for `Direction::Left`, so the eye
/// is placed below the midline to land above it on screen.
pub fn eye_vertices(direction: Direction) -> [SpriteVertex; 4] {
    let cy = match direction {
        Direction::Right => EYE_Y,
        Direction::Left => -EYE_Y,
    };
    let h = EYE_HALF_SIZE;

    [
        SpriteVertex::new(EYE_X - h, cy - h),
        SpriteVertex::new(EYE_X - h, cy + h),
        SpriteVertex::new(EYE_X + h, cy - h),
        SpriteVertex::new(EYE_X + h, cy + h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_indices_reference_outline() {
        assert_eq!(BODY_INDICES.len(), 15);
        assert!(BODY_INDICES.iter().all(|&i| (i as usize) < BODY_VERTICES.len()));
    }

    #[test]
    fn eye_indices_reference_quad() {
        assert_eq!(EYE_INDICES.len(), 6);
        assert!(EYE_INDICES.iter().all(|&i| i < 4));
    }

    #[test]
    fn eye_mirrors_vertically_with_direction() {
        let right = eye_vertices(Direction::Right);
        let left = eye_vertices(Direction::Left);

        for (r, l) in right.iter().zip(left.iter()) {
            assert_eq!(r.pos[0], l.pos[0]);
        }
        let centre = |v: &[SpriteVertex; 4]| v.iter().map(|p| p.pos[1]).sum::<f32>() / 4.0;
        assert!((centre(&right) - EYE_Y).abs() < 1e-6);
        assert!((centre(&left) + EYE_Y).abs() < 1e-6);
    }
}
