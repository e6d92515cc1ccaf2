use glam::DVec3;

use crate::MathError;

/// Lengths at or below this are treated as having no direction.
const DEGENERATE_LENGTH: f64 = 1e-12;

/// Returns `v / |v|`, or [`MathError::DegenerateVector`] when `v` has zero or
/// non-finite length.
pub fn try_normalize(v: DVec3) -> Result<DVec3, MathError> {
    let length = v.length();
    if !length.is_finite() || length <= DEGENERATE_LENGTH {
        return Err(MathError::DegenerateVector { length });
    }
    Ok(v / length)
}

/// Angle in radians between `a` and `b`, in `[0, π]`.
///
/// Returns `None` if either vector is degenerate. The cosine is clamped to
/// `[-1, 1]` before `acos` so nearly parallel inputs never produce NaN.
pub fn angle_between(a: DVec3, b: DVec3) -> Option<f64> {
    let denom = a.length() * b.length();
    if !denom.is_finite() || denom <= DEGENERATE_LENGTH {
        return None;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Converts spherical coordinates to cartesian.
///
/// `theta` is the azimuth in the XY plane measured from +X, `phi` the polar
/// angle measured from +Z.
pub fn spherical_to_cartesian(rho: f64, theta: f64, phi: f64) -> DVec3 {
    DVec3::new(
        rho * phi.sin() * theta.cos(),
        rho * phi.sin() * theta.sin(),
        rho * phi.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    #[test]
    fn test_normalize_unit_length() {
        let n = try_normalize(DVec3::new(3.0, 4.0, 0.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_error() {
        let err = try_normalize(DVec3::ZERO).unwrap_err();
        assert_eq!(err, MathError::DegenerateVector { length: 0.0 });
    }

    #[test]
    fn test_normalize_nan_is_error() {
        assert!(try_normalize(DVec3::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_angle_between_right_angle() {
        let angle = angle_between(DVec3::X, DVec3::new(0.0, 5.0, 0.0)).unwrap();
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_opposite() {
        let angle = angle_between(DVec3::X, -DVec3::X).unwrap();
        assert!((angle - PI).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_thirty_degrees() {
        let b = DVec3::new(FRAC_PI_6.cos(), FRAC_PI_6.sin(), 0.0) * 7.0;
        let angle = angle_between(DVec3::X, b).unwrap();
        assert!((angle - FRAC_PI_6).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_degenerate() {
        assert!(angle_between(DVec3::ZERO, DVec3::X).is_none());
        assert!(angle_between(DVec3::X, DVec3::ZERO).is_none());
    }

    #[test]
    fn test_parallel_vectors_do_not_produce_nan() {
        let a = DVec3::new(0.1, 0.2, 0.3);
        let angle = angle_between(a, a * 3.0).unwrap();
        assert!(angle.is_finite());
        assert!(angle < 1e-6);
    }

    #[test]
    fn test_spherical_poles_and_equator() {
        let north = spherical_to_cartesian(10.0, 1.234, 0.0);
        assert!((north - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-12);

        let equator = spherical_to_cartesian(2.0, FRAC_PI_2, FRAC_PI_2);
        assert!((equator - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_spherical_preserves_radius() {
        for i in 0..16 {
            let t = i as f64 * 0.4;
            let p = spherical_to_cartesian(250.0, t, t * 0.7);
            assert!((p.length() - 250.0).abs() < 1e-9);
        }
    }
}
