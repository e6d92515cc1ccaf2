//! Orientation quaternions.
//!
//! Conventions used throughout the workspace:
//! - storage is glam's `(x, y, z, w)`;
//! - [`compose`] is the Hamilton product `a * b`, meaning "apply `b` in the
//!   frame already rotated by `a`";
//! - body rotations are applied as `orientation = compose(orientation, delta)`.

use glam::{DQuat, DVec3};

/// Below this sine of the half angle the rotation axis is undefined.
const AXIS_EPSILON: f64 = 1e-9;

/// Builds `(sin(angle/2) * axis, cos(angle/2))`.
///
/// The caller must pass a unit axis. The result is re-normalized to keep
/// drift out of long composition chains.
pub fn axis_angle_to_quat(axis: DVec3, angle: f64) -> DQuat {
    let half = angle * 0.5;
    let (s, c) = half.sin_cos();
    let v = axis * s;
    DQuat::from_xyzw(v.x, v.y, v.z, c).normalize()
}

/// Inverse of [`axis_angle_to_quat`]; returns `(unit axis, angle in [0, 2π])`.
///
/// A rotation with no defined axis (identity or numerically close to it)
/// reports `+X` as its axis.
pub fn quat_to_axis_angle(q: DQuat) -> (DVec3, f64) {
    let q = q.normalize();
    let w = q.w.clamp(-1.0, 1.0);
    let angle = 2.0 * w.acos();
    let s = (1.0 - w * w).sqrt();
    if s < AXIS_EPSILON {
        return (DVec3::X, angle);
    }
    (DVec3::new(q.x / s, q.y / s, q.z / s), angle)
}

/// Hamilton product `a * b`. Not commutative.
pub fn compose(a: DQuat, b: DQuat) -> DQuat {
    a * b
}

/// Rotates `v` by the unit quaternion `q` (`q v q*`).
pub fn rotate_vector(q: DQuat, v: DVec3) -> DVec3 {
    q * v
}

/// Inverse rotation for unit quaternions.
pub fn conjugate(q: DQuat) -> DQuat {
    q.conjugate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn vec_close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_axis_angle_matches_formula() {
        let q = axis_angle_to_quat(DVec3::Z, FRAC_PI_2);
        let h = FRAC_PI_4;
        assert!((q.z - h.sin()).abs() < 1e-12);
        assert!((q.w - h.cos()).abs() < 1e-12);
        assert!(q.x.abs() < 1e-12 && q.y.abs() < 1e-12);
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let axis = DVec3::new(1.0, 2.0, -2.0).normalize();
        let (back_axis, back_angle) = quat_to_axis_angle(axis_angle_to_quat(axis, 1.1));
        assert!(vec_close(back_axis, axis));
        assert!((back_angle - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_identity_axis_angle_is_defined() {
        let (axis, angle) = quat_to_axis_angle(DQuat::IDENTITY);
        assert_eq!(axis, DVec3::X);
        assert!(angle.abs() < 1e-12);
    }

    #[test]
    fn test_rotate_x_about_z() {
        let q = axis_angle_to_quat(DVec3::Z, FRAC_PI_2);
        assert!(vec_close(rotate_vector(q, DVec3::X), DVec3::Y));
    }

    #[test]
    fn test_half_turn_about_x_flips_y() {
        let q = DQuat::from_xyzw(1.0, 0.0, 0.0, 0.0);
        assert!(vec_close(rotate_vector(q, DVec3::X), DVec3::X));
        assert!(vec_close(rotate_vector(q, DVec3::Y), -DVec3::Y));
    }

    #[test]
    fn test_compose_is_not_commutative() {
        let a = axis_angle_to_quat(DVec3::X, FRAC_PI_2);
        let b = axis_angle_to_quat(DVec3::Y, FRAC_PI_2);
        let ab = rotate_vector(compose(a, b), DVec3::Z);
        let ba = rotate_vector(compose(b, a), DVec3::Z);
        assert!(!vec_close(ab, ba));
    }

    #[test]
    fn test_compose_applies_right_operand_in_local_frame() {
        // Yaw a quarter turn, then pitch about the already-rotated X axis.
        let yaw = axis_angle_to_quat(DVec3::Z, FRAC_PI_2);
        let pitch = axis_angle_to_quat(DVec3::X, FRAC_PI_2);
        let q = compose(yaw, pitch);
        // Local X became world Y after the yaw, so pitching keeps it there.
        assert!(vec_close(rotate_vector(q, DVec3::X), DVec3::Y));
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = axis_angle_to_quat(DVec3::new(0.0, 0.6, 0.8), 2.3);
        let v = DVec3::new(1.5, -2.0, 0.25);
        let back = rotate_vector(conjugate(q), rotate_vector(q, v));
        assert!(vec_close(back, v));
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let step = axis_angle_to_quat(DVec3::Y, PI / 50.0);
        let mut q = DQuat::IDENTITY;
        for _ in 0..100 {
            q = compose(q, step).normalize();
        }
        assert!(vec_close(rotate_vector(q, DVec3::X), DVec3::X));
    }
}
