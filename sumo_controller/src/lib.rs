//! # Sumo Controller Library
//!
//! Reactive control loop for a two-wheeled sumo robot with a forward sonar
//! and a downward reflectance sensor. Each cycle reads both sensors, runs
//! the active behavior and commands the wheels.
//!
//! ## Behaviors
//!
//! 1. **Search**: sweep (or creep) until the opponent is in range
//! 2. **Attack**: full speed ahead, optionally after a counter-sweep and jog
//! 3. **EdgeRecovery**: back off the white rim and turn; always ends in Search
//!
//! ## Layout
//!
//! - [`behavior`] - pure decision functions and timed-action plans
//! - [`cycle`] - the cycle runner bound to a `RobotDriver`
//! - [`random`] - seeded direction sources
//! - [`error`] - setup/teardown errors

pub mod behavior;
pub mod cycle;
pub mod error;
pub mod random;

pub use behavior::{ControllerState, Decision};
pub use cycle::{CycleReport, CycleStats, SumoController};
pub use error::ControllerError;
pub use random::{ScriptedDirections, SeededDirections};
