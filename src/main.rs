mod arc;
mod config;
mod error;
mod flows;
mod pipeline;
mod settings;
mod topology;
mod trade;

use arc::crossing::{CrossingPolicy, NoDetour};
use arc::curve::curved_arc_points;
use arc::params::CurveParams;
use arc::Point;
use clap::{CommandFactory, Parser, Subcommand};
use config::{CurveConfig, FlowKind, PrepareConfig};
use error::{require_input, Result, TradeArcError};
use log::{error, info, warn, LevelFilter};
use pipeline::CurveJob;
use settings::Settings;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tradearcs")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.2.0")]
#[command(about = "Curved, antimeridian-aware trade flow arcs for world maps", long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/tradearcs/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn raw export/import CSV tables into flow record JSON
    Prepare {
        #[arg(long)]
        exports_csv: Option<PathBuf>,

        #[arg(long)]
        imports_csv: Option<PathBuf>,

        #[arg(long)]
        exports_json: Option<PathBuf>,

        #[arg(long)]
        imports_json: Option<PathBuf>,

        /// Smallest yearly total to keep, in billions
        #[arg(long)]
        min_value: Option<f64>,

        /// Earliest year to keep
        #[arg(long)]
        min_year: Option<i32>,

        /// Home country every flow starts or ends at
        #[arg(long)]
        home: Option<String>,
    },

    /// Replace flow record files with clipped curved segments
    Curves {
        /// TopoJSON map that defines the clip window
        #[arg(short, long)]
        topology: Option<PathBuf>,

        /// Flow record file (repeatable; default: exports and imports files)
        #[arg(short, long = "flows")]
        flows: Vec<PathBuf>,

        /// Write segments here instead of over the flow file (one per --flows)
        #[arg(short, long = "output")]
        outputs: Vec<PathBuf>,

        /// Points per arc minus one
        #[arg(short, long)]
        samples: Option<usize>,

        /// Draw far-side flows across the Pacific instead of detouring
        #[arg(long)]
        no_detour: bool,

        /// Home country used to scale curve heights
        #[arg(long)]
        home: Option<String>,
    },

    /// Print one sampled arc as JSON
    Arc {
        /// Origin as LON,LAT
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,

        /// Destination as LON,LAT
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,

        #[arg(long, default_value = "0.2")]
        height: f64,

        /// Bulge side, 1 or -1
        #[arg(short, long, default_value = "1", allow_hyphen_values = true, value_parser = parse_direction)]
        direction: i8,

        #[arg(short, long, default_value = "24")]
        samples: usize,

        #[arg(long)]
        no_detour: bool,
    },
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (lon, lat) = s.split_once(',').ok_or_else(|| format!("expected LON,LAT, got {s:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range"));
    }
    Ok(Point::new(lon, lat))
}

fn parse_direction(s: &str) -> std::result::Result<i8, String> {
    match s.trim() {
        "1" => Ok(1),
        "-1" => Ok(-1),
        other => Err(format!("expected 1 or -1, got {other:?}")),
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn home_country(settings: &Settings, flag: Option<String>) -> String {
    flag.or_else(|| settings.prepare.home_country.clone())
        .unwrap_or_else(|| PrepareConfig::default().home_country)
}

fn curve_config(settings: &Settings, samples: Option<usize>, home: Option<String>) -> Result<CurveConfig> {
    let defaults = CurveConfig::default();
    let home_name = home_country(settings, home);
    let home = trade::countries::coordinates(&home_name).ok_or(TradeArcError::UnknownHome(home_name))?;
    let curves = &settings.curves;
    Ok(CurveConfig {
        samples: samples.or(curves.samples).unwrap_or(defaults.samples),
        home,
        height: curves.height.unwrap_or(defaults.height),
        wrap_west: curves.wrap_west.unwrap_or(defaults.wrap_west),
        wrap_east: curves.wrap_east.unwrap_or(defaults.wrap_east),
    })
}

/// The built-in detour thresholds only fit the default home country.
fn detour_needs_tuning(settings: &Settings, home_name: &str, no_detour: bool) -> bool {
    !no_detour && settings.curves.detour.is_none() && home_name != PrepareConfig::default().home_country
}

fn crossing_policy(settings: &Settings, no_detour: bool) -> Box<dyn CrossingPolicy> {
    if no_detour {
        Box::new(NoDetour)
    } else {
        Box::new(settings.curves.detour.unwrap_or_default())
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref());
    let paths = &settings.paths;

    match cli.command {
        Commands::Prepare {
            exports_csv,
            imports_csv,
            exports_json,
            imports_json,
            min_value,
            min_year,
            home,
        } => {
            let defaults = PrepareConfig::default();
            let config = PrepareConfig {
                header_row: settings.prepare.header_row.unwrap_or(defaults.header_row),
                data_start_row: settings.prepare.data_start_row.unwrap_or(defaults.data_start_row),
                min_value: min_value.or(settings.prepare.min_value).unwrap_or(defaults.min_value),
                min_year: min_year.or(settings.prepare.min_year).unwrap_or(defaults.min_year),
                home_country: home_country(&settings, home),
            };
            let jobs = [
                (
                    FlowKind::Exports,
                    exports_csv.unwrap_or_else(|| paths.exports_csv.clone()),
                    exports_json.unwrap_or_else(|| paths.exports_json.clone()),
                ),
                (
                    FlowKind::Imports,
                    imports_csv.unwrap_or_else(|| paths.imports_csv.clone()),
                    imports_json.unwrap_or_else(|| paths.imports_json.clone()),
                ),
            ];
            for (kind, csv, _) in &jobs {
                require_input(kind.label(), csv)?;
            }

            // Read and convert everything before the first write
            let mut missing = BTreeSet::new();
            let mut outputs = Vec::with_capacity(jobs.len());
            for (kind, csv, json) in &jobs {
                let rows = trade::load_trade_table(csv, &config)?;
                let (records, unknown) = trade::build_flow_records(&rows, *kind, &config.home_country)?;
                missing.extend(unknown);
                outputs.push((*kind, json, records));
            }

            for (kind, json, records) in &outputs {
                flows::write_json(json, records)?;
                let summary = flows::summarize(records);
                info!("{}: wrote {} flow lines to {}", kind.label(), summary.records, json.display());
                info!("{}: {} countries: {}", kind.label(), summary.countries.len(), summary.countries.join(", "));
                if let Some((first, last)) = summary.years {
                    info!("{}: years {} to {}", kind.label(), first, last);
                }
            }

            if !missing.is_empty() {
                let names: Vec<_> = missing.into_iter().collect();
                warn!("{} countries missing coordinates: {}", names.len(), names.join(", "));
            }
        }
        Commands::Curves {
            topology,
            flows,
            outputs,
            samples,
            no_detour,
            home,
        } => {
            let flows = if flows.is_empty() {
                vec![paths.exports_json.clone(), paths.imports_json.clone()]
            } else {
                flows
            };
            if !outputs.is_empty() && outputs.len() != flows.len() {
                Cli::command()
                    .error(
                        clap::error::ErrorKind::WrongNumberOfValues,
                        format!("{} --output paths given for {} flow files", outputs.len(), flows.len()),
                    )
                    .exit();
            }

            let home_name = home_country(&settings, home);
            if detour_needs_tuning(&settings, &home_name, no_detour) {
                warn!(
                    "default far-side detour thresholds are tuned for {}; set [curves.detour] for {}",
                    PrepareConfig::default().home_country,
                    home_name
                );
            }
            let config = curve_config(&settings, samples, Some(home_name))?;
            let policy = crossing_policy(&settings, no_detour);
            let job = CurveJob {
                topology: topology.unwrap_or_else(|| paths.topology.clone()),
                flows,
                outputs: (!outputs.is_empty()).then_some(outputs),
            };
            let written = job.run(&config, policy.as_ref())?;
            info!("done: {} file(s) written", written.len());
        }
        Commands::Arc {
            from,
            to,
            height,
            direction,
            samples,
            no_detour,
        } => {
            let params = CurveParams { height, direction };
            let policy = crossing_policy(&settings, no_detour);
            let points = curved_arc_points(from, to, params, samples, policy.as_ref());
            let json = serde_json::to_string_pretty(&points).map_err(|e| TradeArcError::json("<stdout>", e))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn points_parse_from_lon_lat() {
        assert_eq!(parse_point("-95.7129,37.0902"), Ok(Point::new(-95.7129, 37.0902)));
        assert_eq!(parse_point(" 10 , -5 "), Ok(Point::new(10.0, -5.0)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("east,5").is_err());
        assert!(parse_point("10,95").is_err());
    }

    #[test]
    fn directions_parse_as_signs() {
        assert_eq!(parse_direction("1"), Ok(1));
        assert_eq!(parse_direction("-1"), Ok(-1));
        assert!(parse_direction("0").is_err());
        assert!(parse_direction("left").is_err());

        let cli = Cli::try_parse_from(["tradearcs", "arc", "--from", "0,0", "--to", "10,0", "-d", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Arc { direction: -1, .. }));
        assert!(Cli::try_parse_from(["tradearcs", "arc", "--from", "0,0", "--to", "10,0", "-d", "2"]).is_err());
    }

    #[test]
    fn detour_thresholds_flagged_for_other_homes() {
        let settings = Settings::parse("").unwrap();
        assert!(!detour_needs_tuning(&settings, "Australia", false));
        assert!(detour_needs_tuning(&settings, "South Korea", false));
        assert!(!detour_needs_tuning(&settings, "South Korea", true));

        let tuned = Settings::parse("[curves]\ndetour = { east_min = 150.0 }").unwrap();
        assert!(!detour_needs_tuning(&tuned, "South Korea", false));
    }

    #[test]
    fn curve_config_layers_flag_over_settings() {
        let settings = Settings::parse("[curves]\nsamples = 12\nwrap_east = 300.0").unwrap();
        let config = curve_config(&settings, None, None).unwrap();
        assert_eq!(config.samples, 12);
        assert_eq!(config.wrap_east, 300.0);
        assert_eq!(config.wrap_west, -360.0);
        assert_eq!(curve_config(&settings, Some(6), None).unwrap().samples, 6);
    }

    #[test]
    fn home_country_drives_curve_home() {
        let settings = Settings::parse("[prepare]\nhome_country = \"Japan\"").unwrap();
        assert_eq!(curve_config(&settings, None, None).unwrap().home, Point::new(138.2529, 36.2048));

        let settings = Settings::parse("[prepare]\nhome_country = \"Atlantis\"").unwrap();
        assert!(matches!(curve_config(&settings, None, None), Err(TradeArcError::UnknownHome(_))));

        let flagged = curve_config(&settings, None, Some("China".to_string())).unwrap();
        assert_eq!(flagged.home, Point::new(104.1954, 35.8617));
    }
}
