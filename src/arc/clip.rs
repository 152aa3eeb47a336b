//! Cohen–Sutherland clipping of sampled paths against the map window

use super::Point;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Axis-aligned lon/lat window in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub const WORLD: BoundingBox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);

    pub const fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    fn region(&self, p: Point) -> u8 {
        let mut code = INSIDE;
        if p.lon < self.xmin {
            code |= LEFT;
        } else if p.lon > self.xmax {
            code |= RIGHT;
        }
        if p.lat < self.ymin {
            code |= BOTTOM;
        } else if p.lat > self.ymax {
            code |= TOP;
        }
        code
    }

    pub fn contains(&self, p: Point) -> bool {
        self.region(p) == INSIDE
    }
}

/// Clip one segment to `bbox`. `None` when no part of it is visible.
pub fn clip_segment(p0: Point, p1: Point, bbox: &BoundingBox) -> Option<(Point, Point)> {
    let (mut p0, mut p1) = (p0, p1);
    let mut c0 = bbox.region(p0);
    let mut c1 = bbox.region(p1);

    loop {
        if (c0 | c1) == INSIDE {
            return Some((p0, p1));
        }
        if (c0 & c1) != 0 {
            return None;
        }

        let out = if c0 != INSIDE { c0 } else { c1 };
        let (dx, dy) = (p1.lon - p0.lon, p1.lat - p0.lat);
        let cut = if out & TOP != 0 {
            Point::new(p0.lon + dx * (bbox.ymax - p0.lat) / dy, bbox.ymax)
        } else if out & BOTTOM != 0 {
            Point::new(p0.lon + dx * (bbox.ymin - p0.lat) / dy, bbox.ymin)
        } else if out & RIGHT != 0 {
            Point::new(bbox.xmax, p0.lat + dy * (bbox.xmax - p0.lon) / dx)
        } else {
            Point::new(bbox.xmin, p0.lat + dy * (bbox.xmin - p0.lon) / dx)
        };

        if out == c0 {
            p0 = cut;
            c0 = bbox.region(p0);
        } else {
            p1 = cut;
            c1 = bbox.region(p1);
        }
    }
}

/// Split a path into the runs that are visible inside `bbox`.
///
/// A run ends when a pair is rejected outright or when the path leaves the
/// window. Runs with fewer than two points are dropped.
pub fn clip_polyline(points: &[Point], bbox: &BoundingBox) -> Vec<Vec<Point>> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut runs = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for pair in points.windows(2) {
        let Some((a, b)) = clip_segment(pair[0], pair[1], bbox) else {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        };

        if current.last() != Some(&a) {
            current.push(a);
        }
        current.push(b);

        if !bbox.contains(pair[1]) {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.retain(|run| run.len() >= 2);
    runs
}
