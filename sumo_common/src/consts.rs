//! System-wide constants for the sumo workspace.
//!
//! Single source of truth for speed levels, thresholds and timings.
//! Imported by all crates; no duplication permitted.

use static_assertions::const_assert;

// ─── Speed ──────────────────────────────────────────────────────────

/// Largest wheel speed magnitude accepted by the drive train.
pub const MAX_SPEED: i16 = 100;

/// Slow speed magnitude (creeping forward while searching).
pub const SPEED_SLOW: i16 = 30;

/// Medium speed magnitude (edge reverse, edge turn, opening advance).
pub const SPEED_MEDIUM: i16 = 60;

/// Fast speed magnitude (sweep, attack, jog).
pub const SPEED_FAST: i16 = 100;

// ─── Thresholds ─────────────────────────────────────────────────────

/// Default distance below which the robot attacks [cm].
pub const ATTACK_DISTANCE_CM: u16 = 30;

/// Default reflectance above which the floor is considered white.
pub const WHITE_THRESHOLD: u8 = 40;

/// Full-scale reflectance reading.
pub const REFLECTANCE_MAX: u8 = 100;

/// Distance reported by a sonar that sees nothing [cm].
pub const SONAR_NO_TARGET_CM: u16 = 255;

// ─── Timing [ms] ────────────────────────────────────────────────────

/// Inter-cycle delay.
pub const CYCLE_TIME_MS: u32 = 50;

/// Counter-sweep before committing to an attack.
pub const REVERSE_BEFORE_ATTACK_MS: u32 = 80;

/// Reverse phase of an edge recovery.
pub const EDGE_REVERSE_MS: u32 = 300;

/// Held edge turn (only for strategies that hold it).
pub const EDGE_TURN_MS: u32 = 300;

/// Jog sharp-turn duration (the turn back lasts twice as long).
pub const JOG_TURN_MS: u32 = 100;

/// Jog forward duration.
pub const JOG_FORWARD_MS: u32 = 200;

/// Wait before moving after power-on (competition start rule).
pub const START_DELAY_MS: u32 = 3000;

/// Straight advance right after the start delay.
pub const OPENING_ADVANCE_MS: u32 = 333;

/// Bounds for `cycle_time_ms`.
pub const CYCLE_TIME_MS_MIN: u32 = 1;
pub const CYCLE_TIME_MS_MAX: u32 = 1000;

/// Upper bound for any single timed action.
pub const TIMED_ACTION_MS_MAX: u32 = 10_000;

/// Upper bound for the start delay.
pub const START_DELAY_MS_MAX: u32 = 60_000;

// ─── Plans ──────────────────────────────────────────────────────────

/// Capacity of a single decision plan (the jog needs five steps).
pub const MAX_PLAN_STEPS: usize = 8;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/sumo.toml";

const_assert!(SPEED_SLOW < SPEED_MEDIUM);
const_assert!(SPEED_MEDIUM < SPEED_FAST);
const_assert!(SPEED_FAST <= MAX_SPEED);
const_assert!(WHITE_THRESHOLD < REFLECTANCE_MAX);
const_assert!(MAX_PLAN_STEPS >= 5);
