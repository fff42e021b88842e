//! # Sumo HAL Library
//!
//! Platform drivers for the sumo controller. Drivers implement the
//! `RobotDriver` trait defined in `sumo_common::driver`.
//!
//! # Module Structure
//!
//! - [`drivers`] - Driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    sumo_hal                               │
//! │  ┌──────────────────┐        ┌─────────────────────────┐  │
//! │  │ SimulationDriver │───────►│ RingSimulator           │  │
//! │  │ (RobotDriver)    │        │ drive / sonar / rim     │  │
//! │  └──────────────────┘        └─────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod drivers;

pub use crate::drivers::simulation::{BoutOutcome, FaultInjection, SimulationDriver};
