//! Shared fixtures: controllers bound to the ring simulation.

use sumo_common::arena::{ArenaConfig, RobotConfig};
use sumo_common::control::{ControllerConfig, Profile};
use sumo_controller::{SeededDirections, SumoController};
use sumo_hal::SimulationDriver;

pub type SimController = SumoController<SimulationDriver, SeededDirections>;

/// Controller config with no start delay and no opening advance.
pub fn quick_config(profile: Profile) -> ControllerConfig {
    ControllerConfig {
        profile,
        start_delay_ms: 0,
        opening_advance_ms: 0,
        seed: Some(7),
        ..Default::default()
    }
}

/// Default arena with the robot placed at `(x, y)` facing `heading_deg`.
pub fn arena_with_robot(x_cm: f64, y_cm: f64, heading_deg: f64) -> ArenaConfig {
    ArenaConfig {
        robot: RobotConfig {
            x_cm,
            y_cm,
            heading_deg,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn sim_controller(config: ControllerConfig, arena: ArenaConfig) -> SimController {
    let driver = SimulationDriver::new(arena).unwrap();
    let directions = SeededDirections::new(config.seed);
    SumoController::new(driver, directions, config).unwrap()
}
