//! Curve generation and clipping for flow arcs
//!
//! Each submodule covers one stage: sphere math, crossing routes, sampling,
//! longitude unwrapping, clipping and per-flow curve parameters.

pub mod clip;
pub mod crossing;
pub mod curve;
pub mod params;
pub mod unwrap;
pub mod vector;

use serde::Serialize;

/// A (longitude, latitude) pair in degrees.
///
/// Longitude may leave [-180, 180] after unwrapping so that a path stays
/// continuous across the antimeridian.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Wrap a longitude into [-180, 180].
pub fn normalize_longitude(mut lon: f64) -> f64 {
    while lon > 180.0 {
        lon -= 360.0;
    }
    while lon < -180.0 {
        lon += 360.0;
    }
    lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_longitude_wraps_both_sides() {
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(540.0), 180.0);
        assert_eq!(normalize_longitude(45.5), 45.5);
    }

    #[test]
    fn normalize_longitude_keeps_edges() {
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
    }
}
