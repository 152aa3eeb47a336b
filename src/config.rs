use crate::arc::params::HeightProfile;
use crate::arc::Point;

/// Configuration for arc generation
#[derive(Clone, Debug)]
pub struct CurveConfig {
    pub samples: usize,       // Points per arc minus one
    pub home: Point,          // Shared end of every flow, drives curve heights
    pub height: HeightProfile,
    pub wrap_west: f64,       // Extended window longitudes
    pub wrap_east: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            samples: 24,
            home: Point::new(133.7751, -25.2744),  // Australia
            height: HeightProfile::default(),
            wrap_west: -360.0,
            wrap_east: 270.0,
        }
    }
}

/// Direction of a trade table relative to the home country
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    Exports,  // home -> partner
    Imports,  // partner -> home
}

impl FlowKind {
    pub fn label(&self) -> &'static str {
        match self {
            FlowKind::Exports => "exports",
            FlowKind::Imports => "imports",
        }
    }
}

/// Configuration for turning raw trade tables into flow records
#[derive(Clone, Debug)]
pub struct PrepareConfig {
    pub header_row: usize,      // Row holding the period headers
    pub data_start_row: usize,
    pub min_value: f64,         // Billions
    pub min_year: i32,
    pub home_country: String,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            header_row: 7,
            data_start_row: 8,
            min_value: 5.0,
            min_year: 2019,
            home_country: "Australia".to_string(),
        }
    }
}
