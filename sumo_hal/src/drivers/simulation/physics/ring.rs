//! Ring, opponent and sensor models.

use std::time::Duration;

use sumo_common::arena::ArenaConfig;
use sumo_common::drive::WheelSpeeds;
use tracing::info;

use super::drive::{DifferentialDrive, Pose, wrap_angle};

/// Bout result as seen by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoutOutcome {
    #[default]
    Undecided,
    /// Opponent left the ring.
    Won,
    /// We left the ring.
    Lost,
}

impl BoutOutcome {
    #[inline]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

/// Passive round opponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opponent {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Complete ring state.
#[derive(Debug, Clone)]
pub struct RingSimulator {
    config: ArenaConfig,
    pose: Pose,
    drive: DifferentialDrive,
    opponent: Option<Opponent>,
    outcome: BoutOutcome,
    elapsed: Duration,
    /// Sub-step remainder carried between `advance` calls [s].
    carry: f64,
}

impl RingSimulator {
    pub fn new(config: ArenaConfig) -> Self {
        let robot = &config.robot;
        Self {
            pose: Pose::new(robot.x_cm, robot.y_cm, robot.heading_deg),
            drive: DifferentialDrive::new(robot),
            opponent: config.opponent.as_ref().map(|o| Opponent {
                x: o.x_cm,
                y: o.y_cm,
                radius: o.radius_cm,
            }),
            outcome: BoutOutcome::Undecided,
            elapsed: Duration::ZERO,
            carry: 0.0,
            config,
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn opponent(&self) -> Option<Opponent> {
        self.opponent
    }

    #[inline]
    pub fn outcome(&self) -> BoutOutcome {
        self.outcome
    }

    /// Simulated time so far.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn set_command(&mut self, speeds: WheelSpeeds) {
        self.drive.set_command(speeds);
    }

    /// Integrate `duration` in fixed sub-steps.
    pub fn advance(&mut self, duration: Duration) {
        let step = self.config.physics_step_ms / 1000.0;
        let mut remaining = duration.as_secs_f64() + self.carry;
        while remaining >= step {
            self.substep(step);
            remaining -= step;
        }
        self.carry = remaining;
        self.elapsed += duration;
    }

    fn substep(&mut self, dt: f64) {
        self.drive.step(&mut self.pose, dt);
        self.resolve_contact();
        self.update_outcome();
    }

    /// Push the opponent out of our body along the center line.
    fn resolve_contact(&mut self) {
        let Some(ref mut opp) = self.opponent else {
            return;
        };
        let dx = opp.x - self.pose.x;
        let dy = opp.y - self.pose.y;
        let dist = dx.hypot(dy);
        let min_dist = opp.radius + self.config.robot.radius_cm;
        if dist < min_dist && dist > f64::EPSILON {
            let push = min_dist - dist;
            opp.x += dx / dist * push;
            opp.y += dy / dist * push;
        }
    }

    fn update_outcome(&mut self) {
        if self.outcome.is_decided() {
            return;
        }
        let ring = self.config.ring_radius_cm;
        if self.pose.radius() > ring {
            self.outcome = BoutOutcome::Lost;
            info!("Robot left the ring at {:.1?}", self.elapsed);
        } else if let Some(opp) = self.opponent {
            if opp.x.hypot(opp.y) > ring {
                self.outcome = BoutOutcome::Won;
                info!("Opponent pushed out at {:.1?}", self.elapsed);
            }
        }
    }

    /// Sonar reading [cm]: gap to the opponent inside the cone, else max range.
    pub fn sonar_cm(&self) -> u16 {
        let range = self.config.robot.sonar_range_cm;
        let Some(opp) = self.opponent else {
            return range;
        };
        let dx = opp.x - self.pose.x;
        let dy = opp.y - self.pose.y;
        let bearing = wrap_angle(dy.atan2(dx) - self.pose.heading);
        if bearing.abs() > self.config.robot.sonar_half_angle_deg.to_radians() {
            return range;
        }
        let gap = (dx.hypot(dy) - opp.radius).max(0.0);
        if gap >= f64::from(range) {
            range
        } else {
            gap.round() as u16
        }
    }

    /// Reflectance under the edge sensor.
    pub fn reflectance(&self) -> u8 {
        let (sx, sy) = self.pose.ahead(self.config.robot.edge_sensor_offset_cm);
        let inner = self.config.ring_radius_cm - self.config.rim_width_cm;
        if sx.hypot(sy) >= inner {
            self.config.rim_reflectance
        } else {
            self.config.surface_reflectance
        }
    }
}
