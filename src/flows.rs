//! Flow records in and flow segments out, as JSON files

use crate::arc::Point;
use crate::error::{Result, TradeArcError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// One trade flow between two countries in one year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub country: String,
    pub year: i32,
    pub value: f64,
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub dest_lon: f64,
    pub dest_lat: f64,
}

impl FlowRecord {
    pub fn origin(&self) -> Point {
        Point::new(self.origin_lon, self.origin_lat)
    }

    pub fn dest(&self) -> Point {
        Point::new(self.dest_lon, self.dest_lat)
    }
}

/// One drawable piece of a clipped flow arc.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowSegment {
    pub country: String,
    pub year: i32,
    pub value: f64,
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub dest_lon: f64,
    pub dest_lat: f64,
    pub segment: usize,
    pub total_segments: usize,
}

impl FlowSegment {
    pub fn new(record: &FlowRecord, from: Point, to: Point, segment: usize, total_segments: usize) -> Self {
        Self {
            country: record.country.clone(),
            year: record.year,
            value: record.value,
            origin_lon: from.lon,
            origin_lat: from.lat,
            dest_lon: to.lon,
            dest_lat: to.lat,
            segment,
            total_segments,
        }
    }
}

pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| TradeArcError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| TradeArcError::json(path, e))
}

/// Write `value` as pretty JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| TradeArcError::json(path, e))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TradeArcError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| TradeArcError::io(path, e))
}

/// Counts shown after a flow file has been written.
#[derive(Debug, PartialEq)]
pub struct FlowSummary {
    pub records: usize,
    pub countries: Vec<String>,
    pub years: Option<(i32, i32)>,
}

pub fn summarize(records: &[FlowRecord]) -> FlowSummary {
    let countries: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let years = records.iter().map(|r| r.year).fold(None, |acc, y| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    });
    FlowSummary {
        records: records.len(),
        countries: countries.into_iter().map(str::to_string).collect(),
        years,
    }
}
