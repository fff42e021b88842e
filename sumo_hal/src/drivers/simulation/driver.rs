//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `RobotDriver` trait on top of a
//! [`RingSimulator`]. Sleeping advances simulated time; in realtime mode it
//! also blocks the calling thread for the same duration.

use std::time::{Duration, Instant};

use sumo_common::arena::ArenaConfig;
use sumo_common::drive::WheelSpeeds;
use sumo_common::driver::{
    Delay, DistanceSensor, DriveTrain, DriverDiagnostics, ReflectanceSensor, RobotDriver,
};
use sumo_common::error::{ActuatorWriteError, DriverError, SensorKind, SensorReadError};
use tracing::{debug, info, trace};

use super::physics::{BoutOutcome, RingSimulator};

/// Scripted failures: the next `n` operations of each kind fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultInjection {
    pub distance_failures: u32,
    pub reflectance_failures: u32,
    pub actuator_failures: u32,
}

/// Simulation driver implementing the RobotDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Initialized flag
    initialized: bool,
    /// Block for real on sleep
    realtime: bool,
    /// Ring physics
    ring: RingSimulator,
    /// Pending injected faults
    faults: FaultInjection,
    /// Counters reported through `diagnostics()`
    diag: DriverDiagnostics,
    /// Wall-clock start (realtime mode)
    start_time: Option<Instant>,
}

impl SimulationDriver {
    /// Create a simulation driver for a validated arena.
    pub fn new(config: ArenaConfig) -> Result<Self, DriverError> {
        config.validate().map_err(DriverError::ConfigError)?;
        Ok(Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            initialized: false,
            realtime: false,
            ring: RingSimulator::new(config),
            faults: FaultInjection::default(),
            diag: DriverDiagnostics::default(),
            start_time: None,
        })
    }

    /// Pace sleeps with the wall clock.
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Queue failures for the next operations.
    pub fn inject_faults(&mut self, faults: FaultInjection) {
        self.faults = faults;
    }

    #[inline]
    pub fn ring(&self) -> &RingSimulator {
        &self.ring
    }

    #[inline]
    pub fn outcome(&self) -> BoutOutcome {
        self.ring.outcome()
    }

    fn check_initialized(&self, sensor: SensorKind) -> Result<(), SensorReadError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SensorReadError::Disconnected(sensor))
        }
    }
}

/// Consume one pending failure, if any.
fn take(counter: &mut u32) -> bool {
    if *counter > 0 {
        *counter -= 1;
        true
    } else {
        false
    }
}

impl DistanceSensor for SimulationDriver {
    fn read_distance_cm(&mut self) -> Result<u16, SensorReadError> {
        self.check_initialized(SensorKind::Distance)?;
        if take(&mut self.faults.distance_failures) {
            self.diag.sensor_faults += 1;
            return Err(SensorReadError::Timeout(SensorKind::Distance));
        }
        Ok(self.ring.sonar_cm())
    }
}

impl ReflectanceSensor for SimulationDriver {
    fn read_reflectance(&mut self) -> Result<u8, SensorReadError> {
        self.check_initialized(SensorKind::Reflectance)?;
        if take(&mut self.faults.reflectance_failures) {
            self.diag.sensor_faults += 1;
            return Err(SensorReadError::Timeout(SensorKind::Reflectance));
        }
        Ok(self.ring.reflectance())
    }
}

impl DriveTrain for SimulationDriver {
    fn set_wheel_speeds(&mut self, speeds: WheelSpeeds) -> Result<(), ActuatorWriteError> {
        if !self.initialized {
            return Err(ActuatorWriteError::Unreachable(
                "simulation driver not initialized".to_string(),
            ));
        }
        if take(&mut self.faults.actuator_failures) {
            self.diag.actuator_faults += 1;
            return Err(ActuatorWriteError::Stalled("left"));
        }
        trace!("Wheels {speeds}");
        self.ring.set_command(speeds);
        self.diag.commands_written += 1;
        Ok(())
    }
}

impl Delay for SimulationDriver {
    fn sleep(&mut self, duration: Duration) {
        self.ring.advance(duration);
        if self.realtime {
            std::thread::sleep(duration);
        }
    }
}

impl RobotDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self) -> Result<(), DriverError> {
        let pose = self.ring.pose();
        info!(
            "Initializing simulation driver: robot at ({:.1}, {:.1}) heading {:.0}°, opponent {}",
            pose.x,
            pose.y,
            pose.heading.to_degrees(),
            if self.ring.opponent().is_some() { "present" } else { "absent" },
        );
        self.start_time = Some(Instant::now());
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        info!("Shutting down simulation driver");
        self.ring.set_command(WheelSpeeds::STOP);
        if let Some(start) = self.start_time.take() {
            debug!(
                "Simulated {:.2?} in {:.2?} wall time",
                self.ring.elapsed(),
                start.elapsed()
            );
        }
        self.initialized = false;
        Ok(())
    }

    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        Some(DriverDiagnostics {
            elapsed: self.ring.elapsed(),
            ..self.diag.clone()
        })
    }
}
