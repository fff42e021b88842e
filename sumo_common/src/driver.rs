//! Platform traits consumed by the controller.
//!
//! This module defines:
//! - `DistanceSensor`, `ReflectanceSensor` - the two sensors polled per cycle
//! - `DriveTrain` - differential-drive actuator
//! - `Delay` - blocking sleep primitive
//! - `DirectionSource` - pseudo-random bit source for left/right choices
//! - `RobotDriver` - a complete platform (sensors + drive train + delay)

use std::time::Duration;

use crate::drive::WheelSpeeds;
use crate::error::{ActuatorWriteError, DriverError, SensorReadError};

/// Forward-looking sonar.
pub trait DistanceSensor {
    /// Distance to the nearest object in front [cm].
    fn read_distance_cm(&mut self) -> Result<u16, SensorReadError>;
}

/// Downward-looking reflectance sensor.
pub trait ReflectanceSensor {
    /// Reflected light intensity, 0 (black) – 100 (white).
    fn read_reflectance(&mut self) -> Result<u8, SensorReadError>;
}

/// Two-wheel differential drive.
///
/// Writes take effect immediately and persist until the next write.
pub trait DriveTrain {
    fn set_wheel_speeds(&mut self, speeds: WheelSpeeds) -> Result<(), ActuatorWriteError>;
}

/// Blocking delay relative to the control thread.
pub trait Delay {
    fn sleep(&mut self, duration: Duration);
}

/// Pseudo-random bit source, seeded once at construction.
pub trait DirectionSource {
    fn next_bit(&mut self) -> bool;
}

/// Optional driver diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DriverDiagnostics {
    /// Wheel writes accepted.
    pub commands_written: u64,
    /// Sensor reads that failed.
    pub sensor_faults: u64,
    /// Wheel writes that failed.
    pub actuator_faults: u64,
    /// Time the platform has been driven for.
    pub elapsed: Duration,
}

/// A complete robot platform.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the control loop starts
/// 2. sensor reads, wheel writes and sleeps - from the control loop
/// 3. `shutdown()` - Called after the loop exits (wheels already stopped)
pub trait RobotDriver: DistanceSensor + ReflectanceSensor + DriveTrain + Delay {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Prepare the platform.
    ///
    /// # Errors
    /// Return `DriverError::InitFailed` if the platform cannot be driven.
    fn init(&mut self) -> Result<(), DriverError>;

    /// Release the platform.
    fn shutdown(&mut self) -> Result<(), DriverError>;

    /// Get driver-specific diagnostics.
    /// Default: None
    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        None
    }
}

impl<T: DirectionSource + ?Sized> DirectionSource for &mut T {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }
}

impl<T: DirectionSource + ?Sized> DirectionSource for Box<T> {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }
}
