use crate::arc::crossing::FarSideDetour;
use crate::arc::params::HeightProfile;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub curves: CurveSettings,
    #[serde(default)]
    pub prepare: PrepareSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub exports_csv: PathBuf,
    pub imports_csv: PathBuf,
    pub exports_json: PathBuf,
    pub imports_json: PathBuf,
    pub topology: PathBuf,   // TopoJSON world map used for the clip window
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            exports_csv: PathBuf::from("data/merch_exports_raw.csv"),
            imports_csv: PathBuf::from("data/merch_imports_raw.csv"),
            exports_json: PathBuf::from("data/NEW_flow_lines_exports.json"),
            imports_json: PathBuf::from("data/NEW_flow_lines_imports.json"),
            topology: PathBuf::from("js/ne_110m_admin_0_countries.topojson"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CurveSettings {
    pub samples: Option<usize>,
    pub wrap_west: Option<f64>,
    pub wrap_east: Option<f64>,
    pub height: Option<HeightProfile>,
    pub detour: Option<FarSideDetour>,  // Far-side crossing thresholds
}

#[derive(Debug, Default, Deserialize)]
pub struct PrepareSettings {
    pub home_country: Option<String>,
    pub min_value: Option<f64>,
    pub min_year: Option<i32>,
    pub header_row: Option<usize>,
    pub data_start_row: Option<usize>,
}

impl Settings {
    /// Load from an explicit file, or the user config file when `None`.
    /// A missing file gives defaults; an unreadable one is reported and ignored.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = explicit.map_or_else(Self::config_path, Path::to_path_buf);
        if !path.exists() {
            if explicit.is_some() {
                warn!("settings file {} not found, using defaults", path.display());
            }
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tradearcs")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.paths.topology, PathBuf::from("js/ne_110m_admin_0_countries.topojson"));
        assert!(settings.curves.samples.is_none());
        assert!(settings.prepare.home_country.is_none());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let settings = Settings::parse(
            r#"
[paths]
topology = "maps/world.json"

[curves]
samples = 48
height = { max = 0.4 }
detour = { waypoint_lon = 20.0 }

[prepare]
min_year = 2021
"#,
        )
        .unwrap();
        assert_eq!(settings.paths.topology, PathBuf::from("maps/world.json"));
        assert_eq!(settings.paths.exports_json, PathBuf::from("data/NEW_flow_lines_exports.json"));
        assert_eq!(settings.curves.samples, Some(48));
        let height = settings.curves.height.unwrap();
        assert_eq!(height.max, 0.4);
        assert_eq!(height.base, 0.1);
        let detour = settings.curves.detour.unwrap();
        assert_eq!(detour.waypoint_lon, 20.0);
        assert_eq!(detour.east_min, 100.0);
        assert_eq!(settings.prepare.min_year, Some(2021));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Settings::parse("[curves]\nsamples = \"many\"").is_err());
    }

    #[test]
    fn load_falls_back_on_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("config.toml");
        fs::write(&bad, "not = [valid").unwrap();
        assert!(Settings::load(Some(&bad)).curves.samples.is_none());
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).curves.samples.is_none());
    }

    #[test]
    fn config_path_is_namespaced() {
        assert!(Settings::config_path().ends_with("tradearcs/config.toml"));
    }
}
