//! # Sumo Controller
//!
//! Runs the SEARCH / ATTACK / EDGE_RECOVERY loop against the simulated ring.
//!
//! Configuration comes from a single TOML file (`[shared]`, `[controller]`,
//! `[arena]`); a missing file at the default path falls back to defaults.
//! CLI flags override the file.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use sumo_common::config::{ConfigError, SumoConfig, load_config};
use sumo_common::consts::DEFAULT_CONFIG_PATH;
use sumo_common::control::Profile;
use sumo_common::driver::RobotDriver;
use sumo_controller::{SeededDirections, SumoController};
use sumo_hal::BoutOutcome;
use sumo_hal::drivers::simulation::create_driver;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Sumo robot controller
#[derive(Parser, Debug)]
#[command(name = "sumo_controller")]
#[command(version)]
#[command(about = "Search / attack / edge-recovery control loop for a sumo robot")]
struct Args {
    /// Path to the configuration TOML.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Strategy profile (classic, spin, spin_jog); `[controller.strategy]` keys still apply on top.
    #[arg(short, long)]
    profile: Option<Profile>,

    /// Seed for left/right choices; overrides the file.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many cycles.
    #[arg(long)]
    cycles: Option<u64>,

    /// Pace the simulation with the wall clock.
    #[arg(long)]
    realtime: bool,

    /// Skip the start delay.
    #[arg(long)]
    no_start_delay: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = resolve_config(&args);

    let level = match (&config, args.verbose) {
        (_, true) => Level::DEBUG,
        (Ok(cfg), false) => cfg.shared.log_level.into(),
        (Err(_), false) => Level::INFO,
    };
    setup_tracing(level, args.json);

    info!("Sumo Controller v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|cfg| run(&args, cfg));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Sumo Controller shutdown complete");
}

/// Load the file (defaults when the default path is absent) and apply CLI overrides.
fn resolve_config(args: &Args) -> Result<SumoConfig, ConfigError> {
    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound) if args.config.as_path() == Path::new(DEFAULT_CONFIG_PATH) => {
            SumoConfig::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(profile) = args.profile {
        config.controller.profile = profile;
    }
    if args.seed.is_some() {
        config.controller.seed = args.seed;
    }
    if args.no_start_delay {
        config.controller.start_delay_ms = 0;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args, config: SumoConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Config OK: robot={}, profile={}, attack<{}cm, white>{}, cycle={}ms",
        config.shared.robot_name,
        config.controller.profile.name(),
        config.controller.attack_distance_cm,
        config.controller.white_threshold,
        config.controller.cycle_time_ms,
    );

    let driver = create_driver(&config.arena, args.realtime)?;
    let directions = SeededDirections::new(config.controller.seed);
    info!("Direction seed: {}", directions.seed());

    let mut controller = SumoController::new(driver, directions, config.controller)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    controller.startup();
    let stats = controller
        .run_while(&running, args.cycles, |sim| !sim.outcome().is_decided())
        .clone();

    info!(
        "Stats: cycles={} attacks={} jogs={} (aborted {}) edges={} faults: distance={} reflectance={} actuator={} time={:.2?}",
        stats.cycles,
        stats.attacks_started,
        stats.jogs_run,
        stats.jogs_aborted,
        stats.edge_recoveries,
        stats.distance_faults,
        stats.reflectance_faults,
        stats.actuator_faults,
        stats.commanded,
    );

    match controller.driver().outcome() {
        BoutOutcome::Won => info!("Bout result: opponent pushed out"),
        BoutOutcome::Lost => warn!("Bout result: robot left the ring"),
        BoutOutcome::Undecided => info!("Bout result: undecided"),
    }
    if let Some(diag) = controller.driver().diagnostics() {
        info!(
            "Driver: {} commands written, simulated {:.2?}",
            diag.commands_written, diag.elapsed
        );
    }

    controller.shutdown()?;
    Ok(())
}

/// Setup tracing subscriber.
fn setup_tracing(level: Level, json: bool) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
