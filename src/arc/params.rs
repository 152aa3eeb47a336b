//! Per-flow curvature: longer flows bulge more, neighbours bulge opposite ways

use super::vector::{angle_between, to_vector};
use super::Point;
use serde::Deserialize;

/// Bulge magnitude and side for one arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveParams {
    pub height: f64,
    /// +1 or -1.
    pub direction: i8,
}

/// height = min(base + scale * sqrt(distance / max_distance), max)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeightProfile {
    pub base: f64,
    pub scale: f64,
    pub max: f64,
}

impl Default for HeightProfile {
    fn default() -> Self {
        Self { base: 0.1, scale: 0.2, max: 0.32 }
    }
}

impl HeightProfile {
    fn height(&self, normalized_distance: f64) -> f64 {
        (self.base + self.scale * normalized_distance.sqrt()).min(self.max)
    }
}

/// Assign curve parameters to every destination of a batch sharing `home`.
///
/// Heights are relative to the farthest destination in the batch, so the
/// distances are collected before any height is computed.
pub fn assign_curve_params(home: Point, dests: &[Point], profile: &HeightProfile) -> Vec<CurveParams> {
    let home = to_vector(home.lon, home.lat);
    let distances: Vec<f64> = dests
        .iter()
        .map(|d| angle_between(&home, &to_vector(d.lon, d.lat)))
        .collect();

    let max = distances.iter().copied().fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    distances
        .iter()
        .enumerate()
        .map(|(i, d)| CurveParams {
            height: profile.height(d / max),
            direction: if i % 2 == 0 { 1 } else { -1 },
        })
        .collect()
}
