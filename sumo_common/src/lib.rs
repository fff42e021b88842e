//! Sumo Common Library
//!
//! Shared types, constants, configuration loading and platform traits for
//! all sumo workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Speed levels, thresholds and default timings
//! - [`drive`] - Bounded wheel speed commands and spin directions
//! - [`state`] - Behavior enums and the per-cycle sensor snapshot
//! - [`control`] - Controller tuning, strategies and profiles
//! - [`arena`] - Simulated ring configuration
//! - [`config`] - TOML configuration loading
//! - [`driver`] - Sensor, drive train, delay and robot driver traits
//! - [`error`] - Sensor / actuator / driver errors and cycle fault flags
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use sumo_common::prelude::*;
//!
//! let sweep = WheelSpeeds::spin(SpinDirection::Clockwise, SpeedLevel::Fast);
//! assert_eq!(sweep.spin_direction(), Some(SpinDirection::Clockwise));
//! ```

pub mod arena;
pub mod config;
pub mod consts;
pub mod control;
pub mod drive;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod state;
