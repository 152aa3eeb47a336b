//! Raw trade tables to flow records
//!
//! The source CSVs are statistical-office exports: a block of preamble rows,
//! one row of period headers ("July 2018 to December 2018", ...) and one row
//! per partner country, values in millions.

pub mod countries;

use crate::config::{FlowKind, PrepareConfig};
use crate::error::{Result, TradeArcError};
use crate::flows::FlowRecord;
use countries::{coordinates, normalize_country_name};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").expect("valid year pattern"));

/// Yearly total for one partner country, in billions.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeRow {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// Last four-digit year mentioned in a period header.
pub fn parse_period_year(period: &str) -> Option<i32> {
    YEAR.find_iter(period).last()?.as_str().parse().ok()
}

fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "np" {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| *v > 0.0)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extract yearly per-country totals from a raw trade table.
///
/// `None` means the header row carries no period years at all. A table whose
/// rows all fall under the thresholds gives `Some` of an empty list.
pub fn extract_trade_table<R: Read>(
    reader: R,
    config: &PrepareConfig,
) -> std::result::Result<Option<Vec<TradeRow>>, csv::Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let rows = csv.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let Some(header) = rows.get(config.header_row) else {
        return Ok(None);
    };
    let periods: Vec<(usize, i32)> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(col, period)| parse_period_year(period).map(|year| (col, year)))
        .collect();
    let (Some(first), Some(last)) = (periods.first(), periods.last()) else {
        return Ok(None);
    };
    debug!("found {} periods from {} to {}", periods.len(), first.1, last.1);

    // (year, country) keeps the output sorted the way it is written
    let mut totals: BTreeMap<(i32, String), f64> = BTreeMap::new();
    for row in rows.iter().skip(config.data_start_row) {
        let Some(raw) = row.get(0).filter(|c| !c.trim().is_empty()) else {
            continue;
        };
        let country = normalize_country_name(raw);
        if country.contains("Total") || country.contains("All Countries") {
            continue;
        }
        for &(col, year) in &periods {
            if let Some(value) = row.get(col).and_then(parse_cell) {
                *totals.entry((year, country.clone())).or_insert(0.0) += value;
            }
        }
    }

    Ok(Some(
        totals
            .into_iter()
            .map(|((year, country), millions)| TradeRow { country, year, value: round_cents(millions / 1000.0) })
            .filter(|row| row.value >= config.min_value && row.year >= config.min_year)
            .collect(),
    ))
}

/// Read and extract a trade table from disk.
pub fn load_trade_table(path: &Path, config: &PrepareConfig) -> Result<Vec<TradeRow>> {
    let file = std::fs::File::open(path).map_err(|e| TradeArcError::io(path, e))?;
    let rows = extract_trade_table(file, config)
        .map_err(|e| TradeArcError::csv(path, e))?
        .ok_or_else(|| {
            TradeArcError::InvalidCsv(format!(
                "{} has no period years in header row {}",
                path.display(),
                config.header_row
            ))
        })?;
    if rows.is_empty() {
        warn!(
            "{}: no rows at or above {} billion from {} on",
            path.display(),
            config.min_value,
            config.min_year
        );
        return Ok(rows);
    }
    let countries: BTreeSet<&str> = rows.iter().map(|r| r.country.as_str()).collect();
    info!("extracted {} records for {} countries from {}", rows.len(), countries.len(), path.display());
    Ok(rows)
}

/// Attach coordinates to trade rows.
///
/// Returns the records plus the names that had no coordinates; the home
/// country's own row is skipped.
pub fn build_flow_records(
    rows: &[TradeRow],
    kind: FlowKind,
    home_country: &str,
) -> Result<(Vec<FlowRecord>, BTreeSet<String>)> {
    let home = coordinates(home_country).ok_or_else(|| TradeArcError::UnknownHome(home_country.to_string()))?;
    let mut records = Vec::with_capacity(rows.len());
    let mut missing = BTreeSet::new();

    for row in rows {
        let Some(partner) = coordinates(&row.country) else {
            missing.insert(row.country.clone());
            continue;
        };
        if row.country == home_country {
            continue;
        }
        let (origin, dest) = match kind {
            FlowKind::Exports => (home, partner),
            FlowKind::Imports => (partner, home),
        };
        records.push(FlowRecord {
            country: row.country.clone(),
            year: row.year,
            value: row.value,
            origin_lon: origin.lon,
            origin_lat: origin.lat,
            dest_lon: dest.lon,
            dest_lat: dest.lat,
        });
    }
    Ok((records, missing))
}
