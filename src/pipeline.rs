//! Flow records to clipped, flattened arc segments

use crate::arc::clip::{clip_polyline, BoundingBox};
use crate::arc::crossing::CrossingPolicy;
use crate::arc::curve::curved_arc_points;
use crate::arc::params::assign_curve_params;
use crate::arc::Point;
use crate::config::CurveConfig;
use crate::error::{require_input, Result};
use crate::flows::{read_json, write_json, FlowRecord, FlowSegment};
use crate::topology::{extend_for_wrap, load_bounding_box};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Curve, clip and flatten every record. Output order follows input order.
pub fn generate_segments(
    records: &[FlowRecord],
    bbox: &BoundingBox,
    config: &CurveConfig,
    policy: &dyn CrossingPolicy,
) -> Vec<FlowSegment> {
    let dests: Vec<Point> = records.iter().map(FlowRecord::dest).collect();
    let params = assign_curve_params(config.home, &dests, &config.height);

    let mut out = Vec::new();
    for (record, params) in records.iter().zip(params) {
        let path = curved_arc_points(record.origin(), record.dest(), params, config.samples, policy);
        let runs = clip_polyline(&path, bbox);
        debug!(
            "{} {}: {} samples, {} visible run(s)",
            record.country,
            record.year,
            path.len(),
            runs.len()
        );
        for run in runs {
            let total = run.len() - 1;
            out.extend(
                run.windows(2)
                    .enumerate()
                    .map(|(i, pair)| FlowSegment::new(record, pair[0], pair[1], i, total)),
            );
        }
    }
    out
}

/// One `curves` run: a topology asset and the flow files to rewrite.
pub struct CurveJob {
    pub topology: PathBuf,
    pub flows: Vec<PathBuf>,
    /// Where to write each flow file's segments; `None` rewrites in place.
    pub outputs: Option<Vec<PathBuf>>,
}

impl CurveJob {
    fn output_for(&self, index: usize) -> &Path {
        self.outputs
            .as_ref()
            .and_then(|outs| outs.get(index))
            .unwrap_or(&self.flows[index])
    }

    /// Every input is checked and read before the first file is written.
    pub fn run(&self, config: &CurveConfig, policy: &dyn CrossingPolicy) -> Result<Vec<(PathBuf, usize)>> {
        require_input("topology", &self.topology)?;
        for path in &self.flows {
            require_input("flow data", path)?;
        }

        let bbox = load_bounding_box(&self.topology)?;
        let window = extend_for_wrap(bbox, config.wrap_west, config.wrap_east);
        info!(
            "extended bbox for flows: ({}, {}, {}, {})",
            window.xmin, window.ymin, window.xmax, window.ymax
        );

        let batches = self
            .flows
            .iter()
            .map(|path| read_json::<Vec<FlowRecord>>(path))
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(batches.len());
        for (index, records) in batches.iter().enumerate() {
            let segments = generate_segments(records, &window, config, policy);
            let output = self.output_for(index);
            write_json(output, &segments)?;
            info!(
                "wrote {} segments for {} flows to {}",
                segments.len(),
                records.len(),
                output.display()
            );
            written.push((output.to_path_buf(), segments.len()));
        }
        Ok(written)
    }
}
