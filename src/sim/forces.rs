//! Force terms
//!
//! Both are per-frame velocity contributions (unit mass).

use glam::Vec2;

/// Hookean pull toward home: `-offset * stiffness`
#[inline]
pub fn spring_force(offset: Vec2, stiffness: f32) -> Vec2 {
    -offset * stiffness
}

/// Push the target away from the pointer.
///
/// `center` is where the target currently is on screen, `pointer` where the
/// pointer is. Inside `radius` the magnitude grows linearly with intrusion:
/// `(radius - dist) * strength`, pointing from pointer to center. At or beyond
/// `radius` the result is exactly zero; there is no falloff.
///
/// A pointer sitting exactly on the center pushes along +X. NaN inputs fail
/// the radius comparison and yield zero.
pub fn repulsion_force(center: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let d = center - pointer;
    let dist = d.length();

    if dist.is_nan() || dist >= radius {
        return Vec2::ZERO;
    }

    let magnitude = (radius - dist) * strength;
    let direction = if dist == 0.0 {
        Vec2::X
    } else {
        Vec2::from_angle(d.y.atan2(d.x))
    };
    direction * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_points_home() {
        let f = spring_force(Vec2::new(100.0, -40.0), 0.05);
        assert!((f.x - (-5.0)).abs() < 1e-6);
        assert!((f.y - 2.0).abs() < 1e-6);
        assert_eq!(spring_force(Vec2::ZERO, 0.05), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_points_away_from_pointer() {
        // Pointer 50px to the left of the center
        let f = repulsion_force(Vec2::ZERO, Vec2::new(-50.0, 0.0), 150.0, 2.0);
        assert!((f.x - 200.0).abs() < 1e-3);
        assert!(f.y.abs() < 1e-3);
    }

    #[test]
    fn test_repulsion_magnitude_grows_with_intrusion() {
        let far = repulsion_force(Vec2::ZERO, Vec2::new(0.0, 140.0), 150.0, 2.0);
        let near = repulsion_force(Vec2::ZERO, Vec2::new(0.0, 10.0), 150.0, 2.0);
        assert!(near.length() > far.length());
        assert!((far.length() - 20.0).abs() < 1e-3);
        assert!((near.length() - 280.0).abs() < 1e-3);
    }

    #[test]
    fn test_repulsion_cutoff_is_hard() {
        let at_edge = repulsion_force(Vec2::ZERO, Vec2::new(150.0, 0.0), 150.0, 2.0);
        assert_eq!(at_edge, Vec2::ZERO);

        let just_outside = repulsion_force(Vec2::ZERO, Vec2::new(150.001, 0.0), 150.0, 2.0);
        assert_eq!(just_outside, Vec2::ZERO);

        // Just inside still pushes, with a tiny magnitude
        let just_inside = repulsion_force(Vec2::ZERO, Vec2::new(149.0, 0.0), 150.0, 2.0);
        assert!(just_inside.x < 0.0);
        assert!((just_inside.length() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_repulsion_coincident_pointer() {
        let center = Vec2::new(320.0, 240.0);
        let f = repulsion_force(center, center, 150.0, 2.0);
        assert!(f.is_finite());
        assert_eq!(f, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_repulsion_nan_pointer_is_zero() {
        let f = repulsion_force(Vec2::ZERO, Vec2::new(f32::NAN, 0.0), 150.0, 2.0);
        assert_eq!(f, Vec2::ZERO);
    }
}
