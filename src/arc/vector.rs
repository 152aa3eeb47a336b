//! Unit-sphere conversions and spherical interpolation

use super::Point;
use nalgebra::Vector3;

/// A point on the unit sphere.
pub type UnitVector = Vector3<f64>;

/// Angles below this are treated as coincident in `slerp`.
const SLERP_EPSILON: f64 = 1e-12;

/// Project a lon/lat pair (degrees) onto the unit sphere.
pub fn to_vector(lon: f64, lat: f64) -> UnitVector {
    let (lon, lat) = (lon.to_radians(), lat.to_radians());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Inverse of [`to_vector`]. Longitude comes back in [-180, 180].
pub fn to_lon_lat(v: &UnitVector) -> Point {
    let v = v.normalize();
    let lon = v.y.atan2(v.x);
    let lat = v.z.clamp(-1.0, 1.0).asin();
    Point::new(lon.to_degrees(), lat.to_degrees())
}

/// Angle between two vectors in radians, with the dot product clamped.
pub fn angle_between(a: &UnitVector, b: &UnitVector) -> f64 {
    a.normalize().dot(&b.normalize()).clamp(-1.0, 1.0).acos()
}

/// Spherical linear interpolation from `a` (t = 0) to `b` (t = 1).
///
/// Returns a copy of `a` when the two are (nearly) the same direction.
pub fn slerp(a: &UnitVector, b: &UnitVector, t: f64) -> UnitVector {
    let a = a.normalize();
    let b = b.normalize();
    let omega = a.dot(&b).clamp(-1.0, 1.0).acos();
    if omega < SLERP_EPSILON {
        return a;
    }
    let sin_omega = omega.sin();
    a * (((1.0 - t) * omega).sin() / sin_omega) + b * ((t * omega).sin() / sin_omega)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: &UnitVector, b: &UnitVector) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn to_vector_is_unit_length() {
        for &(lon, lat) in &[(0.0, 0.0), (133.7751, -25.2744), (-95.7, 37.1), (180.0, 90.0)] {
            assert!((to_vector(lon, lat).norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn to_vector_axes() {
        assert!(close(&to_vector(0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0)));
        assert!(close(&to_vector(90.0, 0.0), &Vector3::new(0.0, 1.0, 0.0)));
        assert!(close(&to_vector(0.0, 90.0), &Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn lon_lat_round_trip() {
        let mut lon = -180.0;
        while lon <= 180.0 {
            let mut lat = -85.0;
            while lat <= 85.0 {
                let p = to_lon_lat(&to_vector(lon, lat));
                let dlon = (p.lon - lon).rem_euclid(360.0);
                assert!(dlon < 1e-9 || (360.0 - dlon) < 1e-9, "lon {lon} -> {}", p.lon);
                assert!((p.lat - lat).abs() < 1e-9);
                lat += 17.0;
            }
            lon += 15.0;
        }
    }

    #[test]
    fn to_lon_lat_normalizes_input() {
        let p = to_lon_lat(&(to_vector(40.0, 10.0) * 3.5));
        assert!((p.lon - 40.0).abs() < EPS);
        assert!((p.lat - 10.0).abs() < EPS);
    }

    #[test]
    fn slerp_identical_vectors() {
        let a = to_vector(133.7751, -25.2744);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert!(close(&slerp(&a, &a, t), &a));
        }
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = to_vector(0.0, 0.0);
        let b = to_vector(90.0, 0.0);
        assert!(close(&slerp(&a, &b, 0.0), &a));
        assert!(close(&slerp(&a, &b, 1.0), &b));
        let mid = to_lon_lat(&slerp(&a, &b, 0.5));
        assert!((mid.lon - 45.0).abs() < EPS);
        assert!(mid.lat.abs() < EPS);
    }

    #[test]
    fn slerp_stays_on_sphere() {
        let a = to_vector(-70.0, 40.0);
        let b = to_vector(120.0, -30.0);
        for i in 0..=20 {
            let v = slerp(&a, &b, f64::from(i) / 20.0);
            assert!((v.norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn angle_between_quarter_turn() {
        let a = to_vector(0.0, 0.0);
        let b = to_vector(0.0, 90.0);
        assert!((angle_between(&a, &b) - std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!(angle_between(&a, &a).abs() < 1e-6);
    }
}
