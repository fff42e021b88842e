//! Integration test: complete bouts on the simulated ring.
//!
//! Runs startup and the control loop until the bout is decided or a cycle
//! limit is hit, then checks the outcome and the accumulated statistics.

use std::io::Write;
use std::sync::atomic::AtomicBool;

use sumo_common::arena::ArenaConfig;
use sumo_common::config::load_config;
use sumo_common::control::{ControllerConfig, Profile};
use sumo_common::drive::WheelSpeeds;
use sumo_common::driver::{DistanceSensor, RobotDriver};
use sumo_controller::{SeededDirections, SumoController};
use sumo_hal::BoutOutcome;
use sumo_hal::drivers::simulation::create_driver;
use tempfile::NamedTempFile;

use super::support::{SimController, quick_config, sim_controller};

// ── Helpers ─────────────────────────────────────────────────────────

fn run_bout(c: &mut SimController, max_cycles: u64) -> BoutOutcome {
    let running = AtomicBool::new(true);
    c.startup();
    c.run_while(&running, Some(max_cycles), |sim| !sim.outcome().is_decided());
    c.driver().outcome()
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn classic_charges_opponent_out() {
    let mut c = sim_controller(quick_config(Profile::Classic), ArenaConfig::default());
    let outcome = run_bout(&mut c, 400);

    assert_eq!(outcome, BoutOutcome::Won);
    assert!(c.stats().cycles < 400);
    assert_eq!(c.stats().attacks_started, 1);
    assert_eq!(c.stats().edge_recoveries, 0);
    assert_eq!(c.last_command(), WheelSpeeds::STOP);
}

#[test]
fn bout_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[shared]
robot_name = "file-bot"

[controller]
profile = "classic"
start_delay_ms = 0
opening_advance_ms = 0
seed = 3
"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).unwrap();
    let driver = create_driver(&config.arena, false).unwrap();
    let directions = SeededDirections::new(config.controller.seed);
    let mut c: SimController = SumoController::new(driver, directions, config.controller).unwrap();

    assert_eq!(run_bout(&mut c, 400), BoutOutcome::Won);
    assert_eq!(c.config().profile, Profile::Classic);
}

#[test]
fn spin_bout_stays_in_ring() {
    let mut c = sim_controller(quick_config(Profile::Spin), ArenaConfig::default());
    let outcome = run_bout(&mut c, 600);

    assert_ne!(outcome, BoutOutcome::Lost);
    assert!(c.stats().attacks_started >= 1);
    assert!(c.driver().ring().pose().radius() < 77.0);
}

#[test]
fn empty_ring_patrol_never_leaves() {
    for profile in [Profile::Classic, Profile::Spin, Profile::SpinJog] {
        let arena = ArenaConfig {
            opponent: None,
            ..Default::default()
        };
        let mut c = sim_controller(quick_config(profile), arena);
        let outcome = run_bout(&mut c, 400);

        assert_eq!(outcome, BoutOutcome::Undecided, "{profile:?}");
        assert_eq!(c.stats().cycles, 400);
        assert_eq!(c.stats().attacks_started, 0);
    }
}

#[test]
fn creep_reaches_the_rim_and_recovers() {
    let arena = ArenaConfig {
        opponent: None,
        ..Default::default()
    };
    let mut c = sim_controller(quick_config(Profile::Classic), arena);
    run_bout(&mut c, 200);
    assert!(c.stats().edge_recoveries >= 1);
}

#[test]
fn same_seed_same_bout() {
    let play = || {
        let mut c = sim_controller(quick_config(Profile::Spin), ArenaConfig::default());
        run_bout(&mut c, 300);
        let pose = c.driver().ring().pose();
        (c.stats().clone(), pose.x, pose.y, pose.heading)
    };
    assert_eq!(play(), play());
}

#[test]
fn startup_sequence_advances_before_the_loop() {
    let config = ControllerConfig {
        start_delay_ms: 3000,
        opening_advance_ms: 333,
        ..quick_config(Profile::Spin)
    };
    let arena = ArenaConfig {
        opponent: None,
        ..Default::default()
    };
    let mut c = sim_controller(config, arena);
    c.startup();

    let sim = c.driver();
    assert!(sim.ring().pose().x > 0.0);
    assert_eq!(sim.diagnostics().unwrap().elapsed.as_millis(), 3333);
    assert_eq!(c.stats().cycles, 0);
}

#[test]
fn shutdown_stops_and_releases_driver() {
    let mut c = sim_controller(quick_config(Profile::Spin), ArenaConfig::default());
    c.step();
    c.shutdown().unwrap();
    assert_eq!(c.last_command(), WheelSpeeds::STOP);

    let mut driver = c.into_driver();
    assert!(driver.read_distance_cm().is_err());
}
