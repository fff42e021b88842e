//! Simulated ring configuration (`[arena]` table).
//!
//! Geometry is in centimeters, angles in degrees, origin at the ring center,
//! heading 0° along +x, counter-clockwise positive.
//!
//! # TOML Example
//!
//! ```toml
//! [arena]
//! ring_radius_cm = 77.0
//! rim_width_cm = 5.0
//!
//! [arena.robot]
//! heading_deg = 0.0
//! motor_time_constant_ms = 100.0
//!
//! [arena.opponent]
//! x_cm = 35.0
//! y_cm = 0.0
//! ```

use serde::{Deserialize, Serialize};

/// Ring (dohyo) description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Outer radius of the ring, rim included [cm].
    pub ring_radius_cm: f64,
    /// Width of the white border [cm].
    pub rim_width_cm: f64,
    /// Reflectance of the playing surface.
    pub surface_reflectance: u8,
    /// Reflectance of the border (and anything beyond it).
    pub rim_reflectance: u8,
    /// Physics integration step [ms].
    pub physics_step_ms: f64,
    pub robot: RobotConfig,
    /// Opponent; `None` for an empty ring.
    pub opponent: Option<OpponentConfig>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            ring_radius_cm: 77.0,
            rim_width_cm: 5.0,
            surface_reflectance: 8,
            rim_reflectance: 85,
            physics_step_ms: 5.0,
            robot: RobotConfig::default(),
            opponent: Some(OpponentConfig::default()),
        }
    }
}

/// Our robot: pose and drive characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotConfig {
    pub x_cm: f64,
    pub y_cm: f64,
    pub heading_deg: f64,
    /// Body radius used for contact [cm].
    pub radius_cm: f64,
    /// Distance between the wheels [cm].
    pub track_width_cm: f64,
    /// Wheel surface speed at full command [cm/s].
    pub max_wheel_speed_cm_s: f64,
    /// First-order motor response time constant [ms]; 0 = instant.
    pub motor_time_constant_ms: f64,
    /// Reflectance sensor distance ahead of the center [cm].
    pub edge_sensor_offset_cm: f64,
    /// Sonar maximum range [cm].
    pub sonar_range_cm: u16,
    /// Sonar half cone angle [deg].
    pub sonar_half_angle_deg: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            x_cm: 0.0,
            y_cm: 0.0,
            heading_deg: 0.0,
            radius_cm: 8.0,
            track_width_cm: 12.0,
            max_wheel_speed_cm_s: 50.0,
            motor_time_constant_ms: 100.0,
            edge_sensor_offset_cm: 8.0,
            sonar_range_cm: 255,
            sonar_half_angle_deg: 15.0,
        }
    }
}

/// Passive opponent that can be pushed around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpponentConfig {
    pub x_cm: f64,
    pub y_cm: f64,
    pub radius_cm: f64,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            x_cm: 35.0,
            y_cm: 0.0,
            radius_cm: 10.0,
        }
    }
}

impl ArenaConfig {
    /// Validate geometry.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.ring_radius_cm > 0.0) {
            return Err(format!("ring_radius_cm {} must be > 0", self.ring_radius_cm));
        }
        if !(self.rim_width_cm > 0.0 && self.rim_width_cm < self.ring_radius_cm) {
            return Err(format!(
                "rim_width_cm {} out of range (0, {})",
                self.rim_width_cm, self.ring_radius_cm
            ));
        }
        if self.surface_reflectance > 100 || self.rim_reflectance > 100 {
            return Err("reflectance values must be within [0, 100]".to_string());
        }
        if !(self.physics_step_ms > 0.0 && self.physics_step_ms <= 50.0) {
            return Err(format!(
                "physics_step_ms {} out of range (0, 50]",
                self.physics_step_ms
            ));
        }
        let r = &self.robot;
        if !(r.track_width_cm > 0.0) || !(r.radius_cm > 0.0) {
            return Err("robot track_width_cm and radius_cm must be > 0".to_string());
        }
        if !(r.max_wheel_speed_cm_s > 0.0) {
            return Err("robot max_wheel_speed_cm_s must be > 0".to_string());
        }
        if r.motor_time_constant_ms < 0.0 {
            return Err("robot motor_time_constant_ms must be >= 0".to_string());
        }
        if !(r.sonar_half_angle_deg > 0.0 && r.sonar_half_angle_deg < 90.0) {
            return Err(format!(
                "sonar_half_angle_deg {} out of range (0, 90)",
                r.sonar_half_angle_deg
            ));
        }
        if r.x_cm.hypot(r.y_cm) >= self.ring_radius_cm {
            return Err("robot must start inside the ring".to_string());
        }
        if let Some(ref o) = self.opponent {
            if !(o.radius_cm > 0.0) {
                return Err("opponent radius_cm must be > 0".to_string());
            }
            if (o.x_cm - r.x_cm).hypot(o.y_cm - r.y_cm) < o.radius_cm + r.radius_cm {
                return Err("opponent overlaps the robot at start".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arena_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_robot_outside_ring() {
        let mut cfg = ArenaConfig::default();
        cfg.robot.x_cm = 90.0;
        assert!(cfg.validate().unwrap_err().contains("inside the ring"));
    }

    #[test]
    fn rejects_overlapping_opponent() {
        let mut cfg = ArenaConfig::default();
        cfg.opponent = Some(OpponentConfig {
            x_cm: 5.0,
            y_cm: 0.0,
            radius_cm: 10.0,
        });
        assert!(cfg.validate().unwrap_err().contains("overlaps"));
    }

    #[test]
    fn rejects_wide_rim() {
        let cfg = ArenaConfig {
            rim_width_cm: 80.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
