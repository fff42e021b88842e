//! Integration test: single-cycle scenarios on the simulated ring.
//!
//! 1. Nothing in range → sweep, stay in SEARCH
//! 2. Opponent ahead → reverse sweep, enter ATTACK
//! 3. Sensor over the rim → reverse, turn, forced SEARCH
//! 4. Sensor and actuator faults are absorbed and counted

use std::time::Duration;

use sumo_common::arena::{ArenaConfig, OpponentConfig};
use sumo_common::control::Profile;
use sumo_common::drive::{SpeedLevel, SpinDirection, WheelSpeeds};
use sumo_common::error::CycleFault;
use sumo_common::state::{Behavior, JogState};
use sumo_hal::{BoutOutcome, FaultInjection};

use super::support::{arena_with_robot, quick_config, sim_controller};

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn empty_ring_keeps_searching() {
    let arena = ArenaConfig {
        opponent: None,
        ..Default::default()
    };
    let mut c = sim_controller(quick_config(Profile::Spin), arena);

    for _ in 0..10 {
        let report = c.step();
        assert_eq!(report.behavior, Behavior::Search);
        assert_eq!(report.next, Behavior::Search);
        assert_eq!(report.snapshot.distance_cm, 255);
        let command = report.command.unwrap();
        assert!(command.spin_direction().is_some());
    }
    assert_eq!(c.stats().attacks_started, 0);
}

#[test]
fn opponent_ahead_starts_attack() {
    let mut c = sim_controller(quick_config(Profile::Spin), ArenaConfig::default());

    let report = c.step();
    assert_eq!(report.snapshot.distance_cm, 25);
    assert!(report.attack_started);
    assert_eq!(report.next, Behavior::Attack);
    assert_eq!(
        report.command,
        Some(WheelSpeeds::spin(SpinDirection::CounterClockwise, SpeedLevel::Fast))
    );
    assert_eq!(report.elapsed, Duration::from_millis(130));
    assert_eq!(c.stats().attacks_started, 1);
}

#[test]
fn jog_profile_arms_and_runs_the_jog() {
    let mut c = sim_controller(quick_config(Profile::SpinJog), ArenaConfig::default());

    let entry = c.step();
    assert!(entry.attack_started);
    assert_eq!(c.state().jog, JogState::Pending);

    let jog = c.step();
    assert!(jog.jog_run);
    assert!(!jog.jog_aborted);
    // 100 + 200 + 200 ms jog plus the tick
    assert_eq!(jog.elapsed, Duration::from_millis(550));
    assert_eq!(c.state().jog, JogState::Done);
    assert_eq!(c.stats().jogs_run, 1);
}

#[test]
fn rim_under_sensor_triggers_recovery() {
    let mut arena = arena_with_robot(66.0, 0.0, 0.0);
    arena.opponent = None;
    let mut c = sim_controller(quick_config(Profile::Classic), arena);

    let report = c.step();
    assert!(report.edge_recovery);
    assert!(report.snapshot.reflectance > 40);
    assert_eq!(report.next, Behavior::Search);
    assert_eq!(
        report.command,
        Some(WheelSpeeds::spin(SpinDirection::Clockwise, SpeedLevel::Medium))
    );
    // 300 ms reverse, 300 ms held turn, 50 ms tick
    assert_eq!(report.elapsed, Duration::from_millis(650));

    let sim = c.driver();
    assert!(sim.ring().pose().radius() < 66.0);
    assert_eq!(sim.outcome(), BoutOutcome::Undecided);
}

#[test]
fn recovery_wins_over_attack() {
    // running along the rim with the opponent ahead and slightly inside
    let mut arena = arena_with_robot(71.6, 0.0, 90.0);
    arena.opponent = Some(OpponentConfig {
        x_cm: 66.0,
        y_cm: 30.0,
        radius_cm: 10.0,
    });
    let mut c = sim_controller(quick_config(Profile::Classic), arena);

    let report = c.step();
    assert!(report.snapshot.distance_cm < 30);
    assert!(report.attack_started);
    assert!(report.edge_recovery);
    assert_eq!(report.next, Behavior::Search);
    assert_eq!(c.stats().edge_recoveries, 1);
}

#[test]
fn distance_faults_hold_and_are_counted() {
    let mut c = sim_controller(quick_config(Profile::Spin), ArenaConfig::default());
    c.driver_mut().inject_faults(FaultInjection {
        distance_failures: 3,
        ..Default::default()
    });

    for _ in 0..3 {
        let report = c.step();
        assert!(report.faults.contains(CycleFault::DISTANCE_READ));
        assert_eq!(report.command, None);
        assert_eq!(report.next, Behavior::Search);
    }
    let report = c.step();
    assert!(report.faults.is_empty());
    assert!(report.attack_started);
    assert_eq!(c.stats().distance_faults, 3);
}

#[test]
fn reflectance_fault_skips_edge_check() {
    let mut arena = arena_with_robot(66.0, 0.0, 0.0);
    arena.opponent = None;
    let mut c = sim_controller(quick_config(Profile::Spin), arena);
    c.driver_mut().inject_faults(FaultInjection {
        reflectance_failures: 1,
        ..Default::default()
    });

    let report = c.step();
    assert!(!report.edge_recovery);
    assert!(report.faults.contains(CycleFault::REFLECTANCE_READ));

    let report = c.step();
    assert!(report.edge_recovery);
}

#[test]
fn actuator_fault_does_not_stop_the_loop() {
    let mut c = sim_controller(quick_config(Profile::Spin), ArenaConfig::default());
    c.driver_mut().inject_faults(FaultInjection {
        actuator_failures: 1,
        ..Default::default()
    });

    let report = c.step();
    assert!(report.faults.contains(CycleFault::ACTUATOR_WRITE));
    assert_eq!(report.next, Behavior::Attack);

    let report = c.step();
    assert!(!report.faults.contains(CycleFault::ACTUATOR_WRITE));
    assert_eq!(c.stats().actuator_faults, 1);
}
