//! Behavior enums and the per-cycle sensor snapshot.

use serde::{Deserialize, Serialize};

// ─── Behavior ───────────────────────────────────────────────────────

/// Top-level behavior of the robot.
///
/// Exactly one behavior is active per cycle. `EdgeRecovery` is only active
/// while a recovery maneuver executes and always hands back to `Search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Behavior {
    /// Sweeping or creeping while looking for the opponent.
    #[default]
    Search,
    /// Driving straight at the opponent.
    Attack,
    /// Backing away from the ring border.
    EdgeRecovery,
}

impl Behavior {
    /// Lowercase name used in logs.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Attack => "attack",
            Self::EdgeRecovery => "edge_recovery",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One-shot jog maneuver bookkeeping for an attack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JogState {
    /// Jog still owed for the current attack entry.
    Pending,
    /// Jog done (or not wanted) for the current attack entry.
    #[default]
    Done,
}

// ─── Sensor Snapshot ────────────────────────────────────────────────

/// Latest sensor readings, refreshed once per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Sonar distance [cm].
    pub distance_cm: u16,
    /// Downward reflectance (0–100).
    pub reflectance: u8,
}

impl SensorSnapshot {
    /// Whether the floor under the sensor reads as the white border.
    #[inline]
    pub const fn on_white(&self, white_threshold: u8) -> bool {
        self.reflectance > white_threshold
    }
}
