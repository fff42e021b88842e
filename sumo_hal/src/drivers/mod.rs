//! Robot driver implementations.
//!
//! - [`simulation`] - Ring simulation for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement `RobotDriver` (and its sensor, drive-train and delay
//!    supertraits) from `sumo_common::driver`
//! 3. Export it here

pub mod simulation;
