// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use etops_core::impact::ImpactReport;
use etops_core::loader::{builtin_catalog, load_catalog};
use etops_core::{Catalog, EtopsEvaluator, GameConfig, Route, RoundOutcome, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding the ETOPS, scoring and routing rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Aircraft table (CSV). Uses the built-in fleet when omitted
    #[arg(long, requires = "airports_csv")]
    aircraft_csv: Option<PathBuf>,

    /// Airport table (CSV). Uses the built-in airports when omitted
    #[arg(long, requires = "aircraft_csv")]
    airports_csv: Option<PathBuf>,

    /// Seed for route generation, for replayable challenges
    #[arg(long, env = "ETOPS_SEED")]
    seed: Option<u64>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the aircraft in the fleet
    Fleet,
    /// List the airports routes are drawn from
    Airports,
    /// Check a single route for an aircraft
    Check {
        /// Aircraft name, e.g. "787-9"
        aircraft: String,
        /// Origin airport code
        from: String,
        /// Destination airport code
        to: String,
    },
    /// Fly a ten-route challenge with one aircraft
    Play {
        /// Aircraft name, e.g. "A350-900"
        aircraft: String,
        /// Print the score history as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialise terminal logger")
}

fn load(cli: &Cli) -> Result<(Catalog, GameConfig)> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let catalog = match (&cli.aircraft_csv, &cli.airports_csv) {
        (Some(aircraft), Some(airports)) => load_catalog(aircraft, airports)
            .with_context(|| format!("Failed to load {:?} and {:?}", aircraft, airports))?,
        _ => builtin_catalog().context("Built-in catalog is invalid")?,
    };
    log::debug!(
        "Loaded {} aircraft and {} airports",
        catalog.aircraft().len(),
        catalog.airports().len()
    );
    Ok((catalog, config))
}

fn print_route(route: &Route) {
    println!(
        "  {} -> {}  {:.0} km, worst-case diversion {:.0} km ({:.0} min single-engine)",
        route.origin.label(),
        route.destination.label(),
        route.distance_km,
        route.max_diversion_km,
        route.required_minutes
    );
}

fn print_outcome(outcome: &RoundOutcome) {
    let event = &outcome.event;
    println!("Round {}:", event.route_index);
    print_route(&outcome.route);
    println!("  {}", event.verdict.describe());
    println!(
        "  CO2 {:.0} kg ({:.1} kg/pax), tier {}",
        outcome.impact.total_co2_kg, outcome.impact.co2_per_passenger_kg, event.co2_tier
    );
    println!(
        "  {} => {:+} (total {})",
        outcome.delta.rationale, event.delta, event.cumulative_score
    );
    for rec in &outcome.recommendations {
        println!("  hint: {}", rec);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let (catalog, config) = load(&cli)?;

    match &cli.command {
        Commands::Fleet => {
            println!(
                "{:<12} {:<10} {:>6} {:>8} {:>6} {:>9}",
                "Model", "Maker", "ETOPS", "km/h", "Seats", "CO2 kg/km"
            );
            for a in catalog.aircraft() {
                println!(
                    "{:<12} {:<10} {:>6} {:>8.0} {:>6} {:>9.1}",
                    a.name,
                    a.manufacturer,
                    a.etops_minutes,
                    a.cruise_speed_kmh,
                    a.capacity,
                    a.co2_kg_per_km
                );
            }
        }
        Commands::Airports => {
            for apt in catalog.airports() {
                println!(
                    "{:<4} {:<32} {:>9.4} {:>10.4}  {}",
                    apt.code, apt.name, apt.lat, apt.lon, apt.region
                );
            }
        }
        Commands::Check { aircraft, from, to } => {
            let aircraft = catalog
                .find_aircraft(aircraft)
                .ok_or_else(|| anyhow::anyhow!("Unknown aircraft '{}'", aircraft))?;
            let origin = catalog
                .find_airport(from)
                .ok_or_else(|| anyhow::anyhow!("Unknown airport '{}'", from))?;
            let destination = catalog
                .find_airport(to)
                .ok_or_else(|| anyhow::anyhow!("Unknown airport '{}'", to))?;

            let route = Route::between(origin, destination, &config.etops)?;
            let evaluator = EtopsEvaluator::new(config.etops)?;
            let verdict = evaluator.evaluate(aircraft, &route)?;
            let tier = config.scoring.classify(aircraft, &route);
            let impact = ImpactReport::compute(aircraft, route.distance_km, config.passengers);

            println!("{} (ETOPS {}):", aircraft.name, aircraft.etops_minutes);
            print_route(&route);
            println!("  {}", verdict.describe());
            println!(
                "  ETOPS radius {:.0} km around each alternate",
                config.etops.etops_radius_km(aircraft.etops_minutes)
            );
            println!(
                "  Fuel {:.0} L, CO2 {:.0} kg ({:.1} kg/pax), tier {}, SDG {:.1}/10",
                impact.total_fuel_l,
                impact.total_co2_kg,
                impact.co2_per_passenger_kg,
                tier,
                impact.sdg_score
            );
            println!(
                "  vs. driving: {:.1}% {}",
                impact.reduction_vs_car_pct.abs(),
                if impact.reduction_vs_car_pct >= 0.0 {
                    "less CO2"
                } else {
                    "more CO2"
                }
            );
            for rec in impact.recommendations(&verdict) {
                println!("  hint: {}", rec);
            }
        }
        Commands::Play { aircraft, json } => {
            let rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut session = Session::new(Arc::new(catalog), config, rng)?;
            session.start(aircraft)?;

            while !session.is_complete() {
                let outcome = session.submit_decision()?;
                if !*json {
                    print_outcome(&outcome);
                }
            }

            if *json {
                println!("{}", serde_json::to_string_pretty(session.history())?);
            } else {
                let summary = session.summary();
                println!(
                    "Final score: {} / {} ({} of {} routes ETOPS compliant; CO2 tiers L/M/H {}/{}/{})",
                    summary.total_score,
                    summary.best_possible,
                    summary.compliant_rounds,
                    summary.rounds_played,
                    summary.low_co2_rounds,
                    summary.medium_co2_rounds,
                    summary.high_co2_rounds
                );
            }
        }
    }

    Ok(())
}
