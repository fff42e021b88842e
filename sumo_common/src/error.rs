//! Error types for sensor, actuator and driver operations.
//!
//! Sensor and actuator errors never stop the control loop: a failed distance
//! read holds the last command, a failed reflectance read skips the edge
//! override for that cycle, a failed wheel write is logged and the next
//! cycle writes again. [`CycleFault`] summarizes what went wrong in one cycle.

use bitflags::bitflags;
use thiserror::Error;

/// Which sensor a read error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Distance,
    Reflectance,
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distance => f.write_str("distance"),
            Self::Reflectance => f.write_str("reflectance"),
        }
    }
}

/// A sensor could not deliver a reading this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorReadError {
    /// Sensor did not answer in time.
    #[error("{0} sensor timed out")]
    Timeout(SensorKind),

    /// Sensor answered with a value outside its range.
    #[error("{sensor} sensor returned out-of-range value {value}")]
    OutOfRange {
        /// Sensor that produced the value.
        sensor: SensorKind,
        /// Raw value received.
        value: i32,
    },

    /// Sensor is unplugged or not initialized.
    #[error("{0} sensor disconnected")]
    Disconnected(SensorKind),
}

impl SensorReadError {
    /// Sensor the error refers to.
    pub const fn sensor(&self) -> SensorKind {
        match self {
            Self::Timeout(s) | Self::Disconnected(s) => *s,
            Self::OutOfRange { sensor, .. } => *sensor,
        }
    }
}

/// The drive train rejected a wheel command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorWriteError {
    /// Motor controller reported a stall.
    #[error("{0} wheel stalled")]
    Stalled(&'static str),

    /// Motor controller is unreachable.
    #[error("motor controller unreachable: {0}")]
    Unreachable(String),
}

/// Driver lifecycle failures (init / shutdown).
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// Driver initialization failed.
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Driver configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

bitflags! {
    /// Faults observed during a single control cycle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CycleFault: u8 {
        /// Distance read failed; last command held.
        const DISTANCE_READ    = 0x01;
        /// Reflectance read failed; no edge override this cycle.
        const REFLECTANCE_READ = 0x02;
        /// At least one wheel write failed.
        const ACTUATOR_WRITE   = 0x04;
    }
}

impl CycleFault {
    /// Fault flag for a failed read of `sensor`.
    #[inline]
    pub const fn for_sensor(sensor: SensorKind) -> Self {
        match sensor {
            SensorKind::Distance => Self::DISTANCE_READ,
            SensorKind::Reflectance => Self::REFLECTANCE_READ,
        }
    }
}

impl Default for CycleFault {
    fn default() -> Self {
        Self::empty()
    }
}
