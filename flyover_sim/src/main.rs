//! Flyover Simulator CLI
//!
//! Fly named scenarios or typed addresses in virtual time and verify the
//! camera choreography.

use clap::Parser;
use flyover_core::{resolve_waypoints, AddressBook, FlyoverConfig};
use flyover_sim::scenarios::ScenarioId;
use flyover_sim::{GazetteerGeocoder, ScenarioResult, ScenarioRunner, TimelineExport};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Flyover camera sequencing simulator
#[derive(Parser, Debug)]
#[command(name = "flyover-sim")]
#[command(about = "Replay map flyovers in virtual time and check the camera timeline", long_about = None)]
struct Args {
    /// Seed for randomized scenarios (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Scenario to run (empty, single_stop, bay_hop, west_coast, grand_tour,
    /// antimeridian, polar_route, revisit, random_tour, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Address to fly over, in order (repeatable); replaces --scenario
    #[arg(short, long = "address")]
    addresses: Vec<String>,

    /// Address book to load addresses from and save them to
    #[arg(long)]
    address_book: Option<PathBuf>,

    /// Camera distance from each waypoint in meters
    #[arg(long, default_value = "3000")]
    altitude: f64,

    /// Duration budget per leg in seconds
    #[arg(short, long, default_value = "120")]
    duration: f64,

    /// Pass raw atan2 headings in (-180, 180] to the camera instead of [0, 360)
    #[arg(long)]
    raw_headings: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export the recorded camera timeline to a JSON file
    #[arg(long)]
    export: Option<String>,
}

/// Loads the address list to fly: command line first, then the address book.
///
/// Blank entries are kept so the book is saved back as it was typed;
/// geocoding skips them.
fn collect_addresses(args: &Args, book: Option<&AddressBook>) -> Vec<String> {
    if !args.addresses.is_empty() {
        return args.addresses.clone();
    }

    match book.map(AddressBook::load) {
        Some(Ok(saved)) => saved,
        Some(Err(e)) => {
            warn!("Could not read address book: {}", e);
            Vec::new()
        }
        None => Vec::new(),
    }
}

async fn fly_addresses(runner: &ScenarioRunner, addresses: &[String]) -> ScenarioResult {
    let geocoder = GazetteerGeocoder::new();
    let route = resolve_waypoints(&geocoder, addresses).await;

    for missing in &route.unresolved {
        warn!("Skipping unresolved address: {}", missing);
    }
    if !route.is_flyable() {
        warn!(
            "Only {} address(es) resolved; at least 2 are needed, no flyover will occur",
            route.waypoints.len()
        );
        info!("Known places: {}", geocoder.known_places().join(", "));
    }

    runner.run_waypoints("addresses", route.waypoints).await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging (RUST_LOG overrides --verbose)
    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if !args.json {
        info!("Flyover Simulator v0.1.0");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    } else {
        args.seed
    };

    let config = FlyoverConfig {
        normalize_heading: !args.raw_headings,
        ..Default::default()
    };
    let runner = ScenarioRunner::new(seed)
        .with_altitude(args.altitude)
        .with_duration(args.duration)
        .with_config(config);

    let book = match &args.address_book {
        Some(path) => match AddressBook::open(path) {
            Ok(book) => Some(book),
            Err(e) => {
                error!("Failed to open address book {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let addresses = collect_addresses(&args, book.as_ref());
    let mut all_results: Vec<ScenarioResult> = Vec::new();

    let typed = addresses.iter().filter(|a| !a.trim().is_empty()).count();
    if typed > 0 {
        if let Some(book) = &book {
            if let Err(e) = book.save(&addresses) {
                warn!("Failed to save addresses: {}", e);
            }
        }

        info!("Flying over {} address(es)", typed);
        all_results.push(fly_addresses(&runner, &addresses).await);
    } else {
        let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
            ScenarioId::all()
        } else {
            vec![args.scenario.parse().unwrap_or_else(|e| {
                let names: Vec<&str> = ScenarioId::all().iter().map(|s| s.name()).collect();
                eprintln!("Error: {}", e);
                eprintln!("Available scenarios: {}, all", names.join(", "));
                std::process::exit(1);
            })]
        };

        for scenario in scenarios {
            all_results.push(runner.run(scenario).await);
        }
    }

    // Handle --export for a single run
    if let Some(export_path) = &args.export {
        if all_results.len() != 1 {
            eprintln!("Error: --export only supports a single scenario, not 'all'");
            std::process::exit(1);
        }

        let export = TimelineExport::from_result(&all_results[0]);
        match export.write_to_file(export_path) {
            Ok(()) => info!("Exported {} camera calls to {}", export.events.len(), export_path),
            Err(e) => error!("Failed to write export: {:?}", e),
        }
    }

    let total = all_results.len();
    let failed_count = all_results.iter().filter(|r| !r.passed).count();

    if args.json {
        // JSON output for CI parsing
        let summary = serde_json::json!({
            "total": total,
            "passed": total - failed_count,
            "failed": failed_count,
            "results": all_results.iter().map(|r| {
                serde_json::json!({
                    "scenario": r.scenario,
                    "seed": r.seed,
                    "passed": r.passed,
                    "waypoints": r.waypoints,
                    "legs": r.legs,
                    "reorientations": r.reorientations,
                    "distance_km": r.distance_km,
                    "flight_time_secs": r.flight_time_secs,
                    "failure_reason": r.failure_reason,
                })
            }).collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to encode summary: {}", e),
        }
    } else {
        for result in &all_results {
            if result.passed {
                info!(
                    "✓ {} (seed={}) PASSED - {} legs, {:.1} km, {:.0}s",
                    result.scenario,
                    result.seed,
                    result.legs,
                    result.distance_km,
                    result.flight_time_secs
                );
            } else {
                error!(
                    "✗ {} (seed={}) FAILED: {}",
                    result.scenario,
                    result.seed,
                    result.failure_reason.as_deref().unwrap_or("unknown")
                );
            }
        }

        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if failed_count == 0 {
            info!("✅ All {} runs passed!", total);
        } else {
            error!("❌ {}/{} runs failed!", failed_count, total);
        }
    }

    // Exit with proper code for CI
    if failed_count > 0 {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_book_entries_keep_blanks() {
        let book = AddressBook::open_temporary().unwrap();
        let typed = vec!["Paris".to_string(), "".to_string(), "Rome".to_string()];
        book.save(&typed).unwrap();

        let args = Args::parse_from(["flyover-sim"]);
        let loaded = collect_addresses(&args, Some(&book));
        assert_eq!(loaded, typed);

        book.save(&loaded).unwrap();
        assert_eq!(book.load().unwrap(), typed);
    }

    #[test]
    fn test_command_line_addresses_win() {
        let book = AddressBook::open_temporary().unwrap();
        book.save(&["Paris".to_string()]).unwrap();

        let args = Args::parse_from(["flyover-sim", "-a", "Tokyo", "-a", "Sydney"]);
        assert_eq!(collect_addresses(&args, Some(&book)), vec!["Tokyo", "Sydney"]);
    }

    #[test]
    fn test_default_book_has_nothing_to_fly() {
        let book = AddressBook::open_temporary().unwrap();
        let args = Args::parse_from(["flyover-sim"]);

        let loaded = collect_addresses(&args, Some(&book));
        assert_eq!(loaded, vec!["", ""]);
        assert!(!loaded.iter().any(|a| !a.trim().is_empty()));
    }
}
