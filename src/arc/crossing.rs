//! Crossing policies: which endpoint pairs detour through a waypoint
//!
//! The map is cut at the antimeridian, so a flow from the home country to the
//! far side of the Pacific is drawn the long way round, through a waypoint on
//! the Africa/Europe side of the globe.

use super::Point;
use serde::Deserialize;

/// Which way longitude should move along a detoured path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Travel {
    Decreasing,
    Increasing,
}

/// A forced detour for one endpoint pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Route {
    pub waypoint_lon: f64,
    pub travel: Travel,
}

/// Decides whether a pair of (normalized) endpoints needs a detour.
pub trait CrossingPolicy {
    fn route(&self, origin: Point, dest: Point) -> Option<Route>;
}

/// Never detours; every arc follows its own great circle.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDetour;

impl CrossingPolicy for NoDetour {
    fn route(&self, _origin: Point, _dest: Point) -> Option<Route> {
        None
    }
}

/// Detour for pairs with one endpoint east of `east_min` and the other west
/// of `west_max`.
///
/// The default thresholds are tuned by eye for an Australian home location,
/// they are not derived from the geometry.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FarSideDetour {
    pub east_min: f64,
    pub west_max: f64,
    pub waypoint_lon: f64,
}

impl Default for FarSideDetour {
    fn default() -> Self {
        Self {
            east_min: 100.0,
            west_max: -20.0,
            waypoint_lon: 10.0,
        }
    }
}

impl CrossingPolicy for FarSideDetour {
    fn route(&self, origin: Point, dest: Point) -> Option<Route> {
        let travel = if origin.lon > self.east_min && dest.lon < self.west_max {
            Travel::Decreasing
        } else if origin.lon < self.west_max && dest.lon > self.east_min {
            Travel::Increasing
        } else {
            return None;
        };
        Some(Route { waypoint_lon: self.waypoint_lon, travel })
    }
}
