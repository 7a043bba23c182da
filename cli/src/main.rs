mod chart;
mod history;
mod tables;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use fleetdash_core::usecase::driver_directory::DriverDirectoryUseCase;
use fleetdash_core::usecase::maintenance_history::MaintenanceHistoryUseCase;
use fleetdash_core::{parse_driver_query, DriverRepository, FileFleetRepository, FleetConfig, Vehicle, VehicleRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "FLEETDASH_LOG";

#[derive(Parser)]
#[command(name = "fleetdash")]
#[command(about = "Fleet maintenance summaries and driver lookup", long_about = None)]
struct Cli {
    /// Directory holding vehicles.json, drivers.json and maintenance.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List vehicles
    Vehicles,
    /// Yearly and monthly maintenance summary (whole fleet when no vehicle is given)
    History {
        /// Vehicle id, id prefix, plate or name
        vehicle: Option<String>,
        /// Only show this year's months
        #[arg(long)]
        year: Option<i32>,
        /// Number of ranked parts per period
        #[arg(long)]
        top: Option<usize>,
        /// Print the raw summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Monthly cost bar chart
    Chart {
        /// Vehicle id, id prefix, plate or name
        vehicle: Option<String>,
    },
    /// Filter drivers (usage: drivers doe status:ACTIVE); only `status:` is read as a key
    Drivers {
        /// Search words and key:value filters
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Browse drivers with live search
    Browse,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_vehicle(repo: &FileFleetRepository, key: &str) -> Result<Vehicle> {
    repo.find(key)?
        .ok_or_else(|| anyhow!("No vehicle matches '{}'", key))
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = FleetConfig::load()?.with_data_dir(cli.data_dir);
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");
    let repo = FileFleetRepository::new(&config.data_dir);

    match cli.command {
        Some(Commands::Vehicles) => {
            let vehicles = VehicleRepository::list(&repo)?;
            if vehicles.is_empty() {
                println!("No vehicles found in {}.", repo.data_dir().display());
            } else {
                tables::print_vehicles(&vehicles);
            }
        },
        Some(Commands::History { vehicle, year, top, json }) => {
            let usecase = MaintenanceHistoryUseCase::new(&repo);
            let (title, aggregation) = match vehicle {
                Some(key) => {
                    let v = resolve_vehicle(&repo, &key)?;
                    (format!("{} ({})", v.name, v.plate), usecase.history_for_vehicle(&v.id)?)
                }
                None => ("Whole fleet".to_string(), usecase.fleet_history()?),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&aggregation)?);
            } else {
                history::show_history(&title, &aggregation, year, top.unwrap_or(config.top_parts));
            }
        },
        Some(Commands::Chart { vehicle }) => {
            let usecase = MaintenanceHistoryUseCase::new(&repo);
            let (title, aggregation) = match vehicle {
                Some(key) => {
                    let v = resolve_vehicle(&repo, &key)?;
                    (v.name.clone(), usecase.history_for_vehicle(&v.id)?)
                }
                None => ("Whole fleet".to_string(), usecase.fleet_history()?),
            };
            chart::run(&title, &aggregation, config.top_parts)?;
        },
        Some(Commands::Drivers { args }) => {
            let query = parse_driver_query(&args, &config.default_status)?;
            let usecase = DriverDirectoryUseCase::new(&repo);
            let found = usecase.search(&query)?;
            if found.is_empty() {
                println!("No drivers match.");
            } else {
                tables::print_drivers(&found);
            }
        },
        Some(Commands::Browse) | None => {
            // The browser is the default view.
            let all = DriverRepository::list(&repo)?;
            tui::run(all, &config.default_status)?;
        }
    }
    Ok(())
}
