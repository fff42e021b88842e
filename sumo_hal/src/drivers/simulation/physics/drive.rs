//! Differential-drive body model.
//!
//! Wheel surface speed follows the command through a first-order lag
//! (`motor_time_constant_ms`, 0 = instant). Kinematics are integrated with
//! a plain Euler step; the arena keeps steps small.

use std::f64::consts::PI;

use sumo_common::arena::RobotConfig;
use sumo_common::consts::MAX_SPEED;
use sumo_common::drive::WheelSpeeds;

/// Planar pose. Heading in radians, counter-clockwise positive, 0 along +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        Self {
            x,
            y,
            heading: heading_deg.to_radians(),
        }
    }

    /// Distance from the ring center.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Point `distance` ahead along the heading.
    #[inline]
    pub fn ahead(&self, distance: f64) -> (f64, f64) {
        (
            self.x + distance * self.heading.cos(),
            self.y + distance * self.heading.sin(),
        )
    }
}

/// Wrap an angle into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Two motors with lag plus the kinematic integration.
#[derive(Debug, Clone)]
pub struct DifferentialDrive {
    track_width: f64,
    max_wheel_speed: f64,
    /// Motor time constant [s].
    tau: f64,
    /// Commanded surface speeds [cm/s], forward positive.
    target: (f64, f64),
    /// Actual surface speeds [cm/s], forward positive.
    actual: (f64, f64),
}

impl DifferentialDrive {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            track_width: config.track_width_cm,
            max_wheel_speed: config.max_wheel_speed_cm_s,
            tau: config.motor_time_constant_ms / 1000.0,
            target: (0.0, 0.0),
            actual: (0.0, 0.0),
        }
    }

    /// Latch a wheel command. Negative command values drive forward.
    pub fn set_command(&mut self, speeds: WheelSpeeds) {
        self.target = (
            self.surface_speed(speeds.left()),
            self.surface_speed(speeds.right()),
        );
    }

    fn surface_speed(&self, command: i16) -> f64 {
        -f64::from(command) / f64::from(MAX_SPEED) * self.max_wheel_speed
    }

    /// Actual wheel speeds `(left, right)` [cm/s].
    #[inline]
    pub fn wheel_speeds(&self) -> (f64, f64) {
        self.actual
    }

    /// Forward speed of the body center [cm/s].
    #[inline]
    pub fn linear_speed(&self) -> f64 {
        (self.actual.0 + self.actual.1) / 2.0
    }

    /// Yaw rate [rad/s], counter-clockwise positive.
    #[inline]
    pub fn yaw_rate(&self) -> f64 {
        (self.actual.1 - self.actual.0) / self.track_width
    }

    /// Advance motors and pose by `dt` seconds.
    pub fn step(&mut self, pose: &mut Pose, dt: f64) {
        if self.tau > 0.0 {
            let alpha = 1.0 - (-dt / self.tau).exp();
            self.actual.0 += (self.target.0 - self.actual.0) * alpha;
            self.actual.1 += (self.target.1 - self.actual.1) * alpha;
        } else {
            self.actual = self.target;
        }

        let v = self.linear_speed();
        let omega = self.yaw_rate();
        pose.x += v * pose.heading.cos() * dt;
        pose.y += v * pose.heading.sin() * dt;
        pose.heading = wrap_angle(pose.heading + omega * dt);
    }
}
