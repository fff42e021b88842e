//! Control cycle: read → decide → edge check → command → tick.
//!
//! ## Cycle Body
//! 1. Read the sonar. On failure the previous command stays on the wheels
//!    and no behavior is evaluated.
//! 2. Evaluate the current behavior and run its timed prelude. A white
//!    floor seen by a `CheckEdge` step abandons the rest of the prelude.
//! 3. Read the reflectance sensor. White floor replaces the behavior's
//!    command with an edge recovery; a failed read skips the check.
//! 4. Issue the cycle's resting command.
//! 5. Sleep `cycle_time_ms`.
//!
//! ## Startup
//! `start_delay_ms` of stillness, then a straight medium advance for
//! `opening_advance_ms`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sumo_common::config::ConfigError;
use sumo_common::control::ControllerConfig;
use sumo_common::drive::{SpeedLevel, WheelSpeeds};
use sumo_common::driver::{DirectionSource, RobotDriver};
use sumo_common::error::CycleFault;
use sumo_common::state::{Behavior, JogState, SensorSnapshot};
use tracing::{debug, info, trace, warn};

use crate::behavior::{
    ControllerState, Decision, Plan, Step, evaluate_attack, evaluate_edge, evaluate_search,
};
use crate::error::ControllerError;

/// Cycles between periodic statistics logs.
pub const STATS_LOG_INTERVAL: u64 = 200;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// Counters accumulated over a bout. O(1) per cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Cycles executed.
    pub cycles: u64,
    /// SEARCH → ATTACK transitions.
    pub attacks_started: u64,
    /// Jogs started.
    pub jogs_run: u64,
    /// Jogs cut short by the border.
    pub jogs_aborted: u64,
    /// Edge recoveries run.
    pub edge_recoveries: u64,
    /// Cycles with a failed distance read.
    pub distance_faults: u64,
    /// Cycles with a failed reflectance read.
    pub reflectance_faults: u64,
    /// Cycles with at least one failed wheel write.
    pub actuator_faults: u64,
    /// Time spent in timed actions and cycle ticks.
    pub commanded: Duration,
}

impl CycleStats {
    /// Zeroed counters.
    pub const fn new() -> Self {
        Self {
            cycles: 0,
            attacks_started: 0,
            jogs_run: 0,
            jogs_aborted: 0,
            edge_recoveries: 0,
            distance_faults: 0,
            reflectance_faults: 0,
            actuator_faults: 0,
            commanded: Duration::ZERO,
        }
    }

    /// Fold one cycle report into the counters.
    #[inline]
    pub fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.attacks_started += u64::from(report.attack_started);
        self.jogs_run += u64::from(report.jog_run);
        self.jogs_aborted += u64::from(report.jog_aborted);
        self.edge_recoveries += u64::from(report.edge_recovery);
        self.distance_faults += u64::from(report.faults.contains(CycleFault::DISTANCE_READ));
        self.reflectance_faults += u64::from(report.faults.contains(CycleFault::REFLECTANCE_READ));
        self.actuator_faults += u64::from(report.faults.contains(CycleFault::ACTUATOR_WRITE));
        self.commanded += report.elapsed;
    }

    /// Total sensor-fault cycles.
    #[inline]
    pub const fn sensor_faults(&self) -> u64 {
        self.distance_faults + self.reflectance_faults
    }
}

/// What happened during one `step()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Behavior at the start of the cycle.
    pub behavior: Behavior,
    /// Behavior the next cycle starts in.
    pub next: Behavior,
    /// Resting command issued this cycle; `None` when the last one was held.
    pub command: Option<WheelSpeeds>,
    /// Readings taken this cycle (stale values where a read failed).
    pub snapshot: SensorSnapshot,
    /// Edge recovery ran (end-of-cycle check or aborted jog).
    pub edge_recovery: bool,
    /// This cycle moved SEARCH → ATTACK.
    pub attack_started: bool,
    /// The jog prelude was started this cycle.
    pub jog_run: bool,
    /// The jog was abandoned at the border.
    pub jog_aborted: bool,
    /// Faults seen this cycle.
    pub faults: CycleFault,
    /// Time slept this cycle, tick included.
    pub elapsed: Duration,
}

/// Outcome of running a prelude.
enum PlanOutcome {
    Completed,
    /// White floor seen by a `CheckEdge` step, with the reading.
    Edge(u8),
}

// ─── Controller ─────────────────────────────────────────────────────

/// The SEARCH / ATTACK / EDGE_RECOVERY controller bound to a platform.
pub struct SumoController<D: RobotDriver, R: DirectionSource> {
    driver: D,
    directions: R,
    config: ControllerConfig,
    state: ControllerState,
    snapshot: SensorSnapshot,
    last_command: WheelSpeeds,
    stats: CycleStats,
}

impl<D: RobotDriver, R: DirectionSource> SumoController<D, R> {
    /// Validate the configuration, initialize the platform and stop the wheels.
    pub fn new(mut driver: D, directions: R, config: ControllerConfig) -> Result<Self, ControllerError> {
        config
            .validate()
            .map_err(|e| ControllerError::Config(ConfigError::ValidationError(e)))?;

        info!(
            "Initializing controller with driver '{}' v{}...",
            driver.name(),
            driver.version()
        );
        driver.init()?;

        let strategy = config.strategy();
        debug!(
            "Strategy: search={:?} sweep={:?}/{:?} reverse_before_attack={} jog={} edge_turn={:?}",
            strategy.search,
            strategy.sweep_direction,
            strategy.sweep_policy,
            strategy.reverse_before_attack,
            strategy.jog_on_attack,
            strategy.edge_turn,
        );

        let mut controller = Self {
            driver,
            directions,
            state: ControllerState::initial(&strategy),
            config,
            snapshot: SensorSnapshot::default(),
            last_command: WheelSpeeds::STOP,
            stats: CycleStats::new(),
        };
        let mut faults = CycleFault::empty();
        controller.command(WheelSpeeds::STOP, &mut faults);
        Ok(controller)
    }

    #[inline]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    #[inline]
    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
    }

    /// Last command accepted by the drive train.
    #[inline]
    pub fn last_command(&self) -> WheelSpeeds {
        self.last_command
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Start delay, then the opening advance.
    pub fn startup(&mut self) {
        let delay = self.config.start_delay();
        if !delay.is_zero() {
            info!("Waiting {} ms before the opening move", delay.as_millis());
            self.driver.sleep(delay);
        }

        let advance = self.config.opening_advance();
        if !advance.is_zero() {
            let mut faults = CycleFault::empty();
            self.command(WheelSpeeds::forward(SpeedLevel::Medium), &mut faults);
            self.driver.sleep(advance);
            debug!("Opening advance done ({} ms)", advance.as_millis());
        }
        info!("Bout started in {}", self.state.behavior);
    }

    /// Execute one control cycle.
    pub fn step(&mut self) -> CycleReport {
        let acted = self.state.behavior;
        let mut report = CycleReport {
            behavior: acted,
            next: acted,
            command: None,
            snapshot: self.snapshot,
            edge_recovery: false,
            attack_started: false,
            jog_run: false,
            jog_aborted: false,
            faults: CycleFault::empty(),
            elapsed: Duration::ZERO,
        };

        // 1. distance
        let decision = match self.driver.read_distance_cm() {
            Ok(distance_cm) => {
                self.snapshot.distance_cm = distance_cm;
                Some(self.evaluate(distance_cm))
            }
            Err(e) => {
                warn!("Distance read failed, holding {}: {e}", self.last_command);
                report.faults |= CycleFault::for_sensor(e.sensor());
                None
            }
        };

        // 2. behavior prelude
        let mut resting: Option<Decision> = None;
        let mut recovery: Option<Decision> = None;
        if let Some(decision) = decision {
            report.attack_started = acted == Behavior::Search && decision.next.behavior == Behavior::Attack;
            report.jog_run = acted == Behavior::Attack && self.state.jog == JogState::Pending;

            match self.execute(&decision.prelude, &mut report) {
                PlanOutcome::Completed => resting = Some(decision),
                PlanOutcome::Edge(reflectance) => {
                    debug!("Border seen during jog (reflectance {reflectance}), aborting");
                    report.jog_aborted = report.jog_run;
                    recovery = evaluate_edge(
                        decision.next,
                        reflectance,
                        &self.config,
                        &mut self.directions,
                    );
                }
            }
        }

        // 3. end-of-cycle edge check
        if recovery.is_none() {
            let current = resting.as_ref().map_or(self.state, |d| d.next);
            match self.driver.read_reflectance() {
                Ok(reflectance) => {
                    self.snapshot.reflectance = reflectance;
                    recovery = evaluate_edge(current, reflectance, &self.config, &mut self.directions);
                }
                Err(e) => {
                    warn!("Reflectance read failed, no edge check this cycle: {e}");
                    report.faults |= CycleFault::for_sensor(e.sensor());
                }
            }
        }

        // 4. command
        if let Some(recovery) = recovery {
            debug!(
                "Edge recovery from {} (reflectance {})",
                acted, self.snapshot.reflectance
            );
            self.state = self.state.with_behavior(Behavior::EdgeRecovery);
            self.execute(&recovery.prelude, &mut report);
            self.command(recovery.command, &mut report.faults);
            self.state = recovery.next;
            report.command = Some(recovery.command);
            report.edge_recovery = true;
        } else if let Some(decision) = resting {
            self.command(decision.command, &mut report.faults);
            self.state = decision.next;
            report.command = Some(decision.command);
        }

        // 5. tick
        let tick = self.config.cycle_time();
        self.driver.sleep(tick);
        report.elapsed += tick;

        report.next = self.state.behavior;
        report.snapshot = self.snapshot;
        self.stats.record(&report);

        if report.attack_started {
            info!(
                "Target at {} cm, attacking (cycle {})",
                self.snapshot.distance_cm, self.stats.cycles
            );
        } else if report.next != acted {
            debug!("{} -> {}", acted, report.next);
        }
        trace!(
            "cycle {}: {} d={} r={} cmd={:?} faults={:?}",
            self.stats.cycles,
            report.behavior,
            self.snapshot.distance_cm,
            self.snapshot.reflectance,
            report.command,
            report.faults,
        );

        report
    }

    /// Run cycles until `running` clears or `max_cycles` is reached, then stop the wheels.
    pub fn run(&mut self, running: &AtomicBool, max_cycles: Option<u64>) -> &CycleStats {
        self.run_while(running, max_cycles, |_| true)
    }

    /// Like [`run`](Self::run), also stopping when `keep_going` returns false.
    pub fn run_while<F>(&mut self, running: &AtomicBool, max_cycles: Option<u64>, mut keep_going: F) -> &CycleStats
    where
        F: FnMut(&D) -> bool,
    {
        info!("Entering control loop (cycle {} ms)", self.config.cycle_time_ms);
        let limit = max_cycles.map(|n| self.stats.cycles.saturating_add(n));

        while running.load(Ordering::SeqCst) {
            if limit.is_some_and(|limit| self.stats.cycles >= limit) {
                debug!("Cycle limit reached");
                break;
            }
            if !keep_going(&self.driver) {
                debug!("Run condition cleared");
                break;
            }

            self.step();

            if self.stats.cycles % STATS_LOG_INTERVAL == 0 {
                debug!(
                    "Stats: cycles={} attacks={} edges={} jogs={} sensor_faults={} actuator_faults={}",
                    self.stats.cycles,
                    self.stats.attacks_started,
                    self.stats.edge_recoveries,
                    self.stats.jogs_run,
                    self.stats.sensor_faults(),
                    self.stats.actuator_faults,
                );
            }
        }

        let mut faults = CycleFault::empty();
        self.command(WheelSpeeds::STOP, &mut faults);
        info!("Control loop exited after {} cycles", self.stats.cycles);
        &self.stats
    }

    /// Stop the wheels and release the platform.
    pub fn shutdown(&mut self) -> Result<(), ControllerError> {
        let mut faults = CycleFault::empty();
        self.command(WheelSpeeds::STOP, &mut faults);
        self.driver.shutdown()?;
        info!("Driver '{}' shut down", self.driver.name());
        Ok(())
    }

    /// Give the platform back.
    pub fn into_driver(self) -> D {
        self.driver
    }

    fn evaluate(&mut self, distance_cm: u16) -> Decision {
        match self.state.behavior {
            Behavior::Attack => {
                evaluate_attack(self.state, distance_cm, &self.config, &mut self.directions)
            }
            Behavior::Search | Behavior::EdgeRecovery => {
                evaluate_search(self.state, distance_cm, &self.config)
            }
        }
    }

    /// Run a prelude. `CheckEdge` steps stop at a white floor.
    fn execute(&mut self, plan: &Plan, report: &mut CycleReport) -> PlanOutcome {
        for step in plan.steps() {
            match *step {
                Step::Drive { speeds, hold } => {
                    self.command(speeds, &mut report.faults);
                    self.driver.sleep(hold);
                    report.elapsed += hold;
                }
                Step::CheckEdge => match self.driver.read_reflectance() {
                    Ok(reflectance) => {
                        self.snapshot.reflectance = reflectance;
                        if self.snapshot.on_white(self.config.white_threshold) {
                            return PlanOutcome::Edge(reflectance);
                        }
                    }
                    Err(e) => {
                        warn!("Reflectance read failed during maneuver: {e}");
                        report.faults |= CycleFault::for_sensor(e.sensor());
                    }
                },
            }
        }
        PlanOutcome::Completed
    }

    fn command(&mut self, speeds: WheelSpeeds, faults: &mut CycleFault) {
        match self.driver.set_wheel_speeds(speeds) {
            Ok(()) => self.last_command = speeds,
            Err(e) => {
                warn!("Wheel write {speeds} failed: {e}");
                *faults |= CycleFault::ACTUATOR_WRITE;
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
