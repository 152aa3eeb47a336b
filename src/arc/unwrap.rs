//! Longitude continuity along a sampled path

use super::crossing::Travel;

/// Shifts each incoming longitude by multiples of 360 so consecutive samples
/// never jump across the map edge.
///
/// With a known `travel` direction a sample that steps backwards is pushed a
/// full turn forward first; the 180-degree bound is applied afterwards.
#[derive(Clone, Debug)]
pub struct LonUnwrapper {
    prev: f64,
    travel: Option<Travel>,
    started: bool,
}

impl LonUnwrapper {
    /// `start` is the normalized origin longitude.
    pub fn new(start: f64, travel: Option<Travel>) -> Self {
        Self { prev: start, travel, started: false }
    }

    pub fn next(&mut self, raw: f64) -> f64 {
        let first = !self.started;
        self.started = true;

        let mut lon = raw;
        match self.travel {
            Some(travel) => {
                if !first {
                    match travel {
                        Travel::Decreasing if lon > self.prev => lon -= 360.0,
                        Travel::Increasing if lon < self.prev => lon += 360.0,
                        _ => {}
                    }
                }
                lon = self.bound(lon);
            }
            None if !first => lon = self.bound(lon),
            None => {}
        }

        self.prev = lon;
        lon
    }

    fn bound(&self, mut lon: f64) -> f64 {
        while lon > self.prev + 180.0 {
            lon -= 360.0;
        }
        while lon < self.prev - 180.0 {
            lon += 360.0;
        }
        lon
    }
}
