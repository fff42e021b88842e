//! Prelude module for common re-exports.
//!
//! ```rust
//! use sumo_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::arena::{ArenaConfig, OpponentConfig, RobotConfig};
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig, SumoConfig};
pub use crate::control::{
    ControllerConfig, EdgeTurn, Profile, SearchPattern, Strategy, SweepPolicy,
};

// ─── Commands & State ───────────────────────────────────────────────
pub use crate::drive::{SpeedLevel, SpinDirection, WheelSpeeds};
pub use crate::state::{Behavior, JogState, SensorSnapshot};

// ─── Platform ───────────────────────────────────────────────────────
pub use crate::driver::{
    Delay, DirectionSource, DistanceSensor, DriveTrain, DriverDiagnostics, ReflectanceSensor,
    RobotDriver,
};
pub use crate::error::{ActuatorWriteError, CycleFault, DriverError, SensorKind, SensorReadError};
