//! Map window from a TopoJSON asset
//!
//! Only the parts needed for the extent are read: the optional `bbox`, the
//! quantization `transform` and the delta-encoded `arcs`.

use crate::arc::clip::BoundingBox;
use crate::error::{Result, TradeArcError};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Topology {
    pub bbox: Option<Vec<f64>>,
    pub transform: Option<Transform>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Deserialize)]
pub struct Transform {
    #[serde(default = "unit_scale")]
    pub scale: [f64; 2],
    #[serde(default)]
    pub translate: [f64; 2],
}

fn unit_scale() -> [f64; 2] {
    [1.0, 1.0]
}

impl Topology {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| TradeArcError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| TradeArcError::json(path, e))
    }

    /// The declared `bbox`, else the extent of the decoded arcs, else the
    /// whole world.
    pub fn bounding_box(&self) -> BoundingBox {
        if let Some(&[xmin, ymin, xmax, ymax]) = self.bbox.as_deref() {
            return BoundingBox::new(xmin, ymin, xmax, ymax);
        }
        let Some(transform) = &self.transform else {
            debug!("topology has neither bbox nor transform, using world extent");
            return BoundingBox::WORLD;
        };

        let [sx, sy] = transform.scale;
        let [tx, ty] = transform.translate;
        let mut bbox = BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for arc in &self.arcs {
            let (mut x, mut y) = (0.0, 0.0);
            for position in arc {
                let [dx, dy, ..] = position.as_slice() else {
                    continue;
                };
                x += dx;
                y += dy;
                let (lon, lat) = (x * sx + tx, y * sy + ty);
                bbox.xmin = bbox.xmin.min(lon);
                bbox.xmax = bbox.xmax.max(lon);
                bbox.ymin = bbox.ymin.min(lat);
                bbox.ymax = bbox.ymax.max(lat);
            }
        }

        if bbox.xmin > bbox.xmax || bbox.ymin > bbox.ymax {
            debug!("topology arcs are empty, using world extent");
            return BoundingBox::WORLD;
        }
        bbox
    }
}

/// Read a TopoJSON file and return its map window.
pub fn load_bounding_box(path: &Path) -> Result<BoundingBox> {
    let bbox = Topology::load(path)?.bounding_box();
    info!(
        "map bbox from {}: ({:.3}, {:.3}, {:.3}, {:.3})",
        path.display(),
        bbox.xmin,
        bbox.ymin,
        bbox.xmax,
        bbox.ymax
    );
    Ok(bbox)
}

/// Replace the longitude range so that unwrapped paths are not cut at the
/// antimeridian. Latitudes are kept.
pub fn extend_for_wrap(bbox: BoundingBox, west: f64, east: f64) -> BoundingBox {
    BoundingBox::new(west, bbox.ymin, east, bbox.ymax)
}
