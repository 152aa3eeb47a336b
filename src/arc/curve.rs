//! Sampled spherical Bézier arcs between two map points

use super::crossing::{CrossingPolicy, Route};
use super::params::CurveParams;
use super::unwrap::LonUnwrapper;
use super::vector::{slerp, to_lon_lat, to_vector, UnitVector};
use super::{normalize_longitude, Point};
use log::debug;
use nalgebra::Vector3;

/// Below this the endpoint cross product has no usable direction.
const NORMAL_EPSILON: f64 = 1e-12;

/// Quadratic Bézier on the sphere: three slerps through the control point.
pub fn spherical_quadratic_bezier(a: &UnitVector, c: &UnitVector, b: &UnitVector, t: f64) -> UnitVector {
    let p0 = slerp(a, c, t);
    let p1 = slerp(c, b, t);
    slerp(&p0, &p1, t).normalize()
}

/// Unit normal of the plane through `a`, `b` and the centre, or the north
/// pole when the two are (anti)parallel.
fn bulge_normal(a: &UnitVector, b: &UnitVector) -> UnitVector {
    let n = a.cross(b);
    if n.norm() < NORMAL_EPSILON {
        Vector3::z()
    } else {
        n.normalize()
    }
}

fn control_point(
    a: &UnitVector,
    b: &UnitVector,
    mean_lat: f64,
    params: CurveParams,
    route: Option<Route>,
) -> UnitVector {
    let normal = bulge_normal(a, b);
    let sign = f64::from(params.direction);
    match route {
        Some(route) => {
            let w = to_vector(route.waypoint_lon, mean_lat);
            let mid = ((slerp(a, &w, 0.5) + slerp(&w, b, 0.5)) / 2.0).normalize();
            (mid + normal * (sign * params.height * 0.5)).normalize()
        }
        None => (slerp(a, b, 0.5) + normal * (sign * params.height)).normalize(),
    }
}

/// Sample `samples + 1` points of a curved arc from `origin` to `dest`.
///
/// Longitudes of the result are continuous, so they may run past ±180.
pub fn curved_arc_points(
    origin: Point,
    dest: Point,
    params: CurveParams,
    samples: usize,
    policy: &dyn CrossingPolicy,
) -> Vec<Point> {
    let samples = samples.max(1);
    let origin = Point::new(normalize_longitude(origin.lon), origin.lat);
    let dest = Point::new(normalize_longitude(dest.lon), dest.lat);
    let route = policy.route(origin, dest);
    if let Some(route) = route {
        debug!(
            "detouring ({:.2}, {:.2}) -> ({:.2}, {:.2}) via lon {}",
            origin.lon, origin.lat, dest.lon, dest.lat, route.waypoint_lon
        );
    }

    let a = to_vector(origin.lon, origin.lat);
    let b = to_vector(dest.lon, dest.lat);
    let c = control_point(&a, &b, (origin.lat + dest.lat) / 2.0, params, route);

    let mut unwrapper = LonUnwrapper::new(origin.lon, route.map(|r| r.travel));
    (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            let p = to_lon_lat(&spherical_quadratic_bezier(&a, &c, &b, t));
            Point::new(unwrapper.next(p.lon), p.lat)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::crossing::{FarSideDetour, NoDetour};

    const AUSTRALIA: Point = Point::new(133.7751, -25.2744);
    const USA: Point = Point::new(-95.7129, 37.0902);
    const JAPAN: Point = Point::new(138.2529, 36.2048);

    fn params(height: f64, direction: i8) -> CurveParams {
        CurveParams { height, direction }
    }

    fn same_place(p: Point, q: Point) -> bool {
        let dlon = (p.lon - q.lon).rem_euclid(360.0);
        (dlon < 1e-6 || 360.0 - dlon < 1e-6) && (p.lat - q.lat).abs() < 1e-6
    }

    #[test]
    fn bezier_hits_endpoints() {
        let a = to_vector(10.0, 20.0);
        let b = to_vector(60.0, -5.0);
        let c = to_vector(40.0, 30.0);
        assert!((spherical_quadratic_bezier(&a, &c, &b, 0.0) - a).norm() < 1e-9);
        assert!((spherical_quadratic_bezier(&a, &c, &b, 1.0) - b).norm() < 1e-9);
    }

    #[test]
    fn bulge_normal_falls_back_for_antipodes() {
        let a = to_vector(0.0, 0.0);
        let b = to_vector(180.0, 0.0);
        assert_eq!(bulge_normal(&a, &b), Vector3::z());
        assert_eq!(bulge_normal(&a, &a), Vector3::z());
    }

    #[test]
    fn far_side_scenario_runs_west_through_waypoint() {
        let pts = curved_arc_points(AUSTRALIA, USA, params(0.2, 1), 24, &FarSideDetour::default());
        assert_eq!(pts.len(), 25);
        assert!((pts[0].lon - 133.7751).abs() < 1e-6);
        assert!((pts[24].lon + 95.7129).abs() < 1e-6);
        assert!((pts[24].lat - 37.0902).abs() < 1e-6);
        for pair in pts.windows(2) {
            assert!(pair[1].lon < pair[0].lon, "{:?}", pair);
        }
        // passes the waypoint region around lon 10
        assert!(pts.iter().any(|p| (p.lon - 10.0).abs() < 15.0));
    }

    #[test]
    fn far_side_reverse_increases() {
        let pts = curved_arc_points(USA, AUSTRALIA, params(0.2, -1), 24, &FarSideDetour::default());
        for pair in pts.windows(2) {
            assert!(pair[1].lon > pair[0].lon, "{:?}", pair);
        }
        assert!(same_place(pts[24], AUSTRALIA));
    }

    #[test]
    fn near_pair_stays_in_one_band() {
        let pts = curved_arc_points(AUSTRALIA, JAPAN, params(0.15, -1), 24, &FarSideDetour::default());
        assert_eq!(pts.len(), 25);
        assert!(same_place(pts[0], AUSTRALIA));
        assert!(same_place(pts[24], JAPAN));
        let min = pts.iter().map(|p| p.lon).fold(f64::INFINITY, f64::min);
        let max = pts.iter().map(|p| p.lon).fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min < 30.0);
        assert!(pts.iter().all(|p| p.lon > 120.0 && p.lon < 160.0));
    }

    #[test]
    fn direction_flips_the_bulge() {
        let policy = NoDetour;
        let left = curved_arc_points(AUSTRALIA, JAPAN, params(0.2, 1), 8, &policy);
        let right = curved_arc_points(AUSTRALIA, JAPAN, params(0.2, -1), 8, &policy);
        let straight = curved_arc_points(AUSTRALIA, JAPAN, params(0.0, 1), 8, &policy);
        let (l, r, s) = (left[4].lon, right[4].lon, straight[4].lon);
        assert!((l - s) * (r - s) < 0.0, "{l} {r} {s}");
    }

    #[test]
    fn no_detour_policy_takes_the_pacific() {
        let pts = curved_arc_points(AUSTRALIA, USA, params(0.2, 1), 24, &NoDetour);
        // eastward across the antimeridian, unwrapped past 180
        assert!(pts.iter().any(|p| p.lon > 180.0));
        assert!(same_place(pts[24], USA));
    }

    #[test]
    fn unnormalized_endpoints_are_wrapped_first() {
        let pts = curved_arc_points(Point::new(493.7751, -25.2744), JAPAN, params(0.1, 1), 4, &NoDetour);
        assert!((pts[0].lon - 133.7751).abs() < 1e-6);
    }

    #[test]
    fn zero_samples_still_gives_both_endpoints() {
        let pts = curved_arc_points(AUSTRALIA, JAPAN, params(0.1, 1), 0, &NoDetour);
        assert_eq!(pts.len(), 2);
        assert!(same_place(pts[1], JAPAN));
    }

    #[test]
    fn coincident_endpoints_do_not_produce_nan() {
        let pts = curved_arc_points(AUSTRALIA, AUSTRALIA, params(0.2, 1), 6, &NoDetour);
        assert!(pts.iter().all(|p| p.lon.is_finite() && p.lat.is_finite()));
    }
}
