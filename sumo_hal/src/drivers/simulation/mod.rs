//! Simulation driver module.
//!
//! Software stand-in for the robot: a ring with a white rim, our robot and
//! a passive opponent. Used for development, tests and the default binary
//! run.

mod driver;
mod physics;

pub use driver::{FaultInjection, SimulationDriver};
pub use physics::{BoutOutcome, DifferentialDrive, Opponent, Pose, RingSimulator, wrap_angle};

use sumo_common::arena::ArenaConfig;
use sumo_common::error::DriverError;

/// Factory function to create a simulation driver instance.
pub fn create_driver(config: &ArenaConfig, realtime: bool) -> Result<SimulationDriver, DriverError> {
    Ok(SimulationDriver::new(config.clone())?.with_realtime(realtime))
}
