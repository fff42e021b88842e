//! Differential-drive velocity commands.
//!
//! The platform's motors run forward on a *negative* duty value, so every
//! constructor here goes through [`SpeedLevel::forward`] / [`SpeedLevel::backward`]
//! instead of spelling signs at call sites.
//!
//! A [`WheelSpeeds`] can only be built through [`WheelSpeeds::new`] (or the
//! helpers on top of it), which clamps both wheels into `[-MAX_SPEED, MAX_SPEED]`.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SPEED, SPEED_FAST, SPEED_MEDIUM, SPEED_SLOW};

// ─── Speed Levels ───────────────────────────────────────────────────

/// Named speed magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedLevel {
    Slow,
    Medium,
    Fast,
}

impl SpeedLevel {
    /// Unsigned magnitude of this level.
    #[inline]
    pub const fn magnitude(self) -> i16 {
        match self {
            Self::Slow => SPEED_SLOW,
            Self::Medium => SPEED_MEDIUM,
            Self::Fast => SPEED_FAST,
        }
    }

    /// Signed wheel value that drives forward.
    #[inline]
    pub const fn forward(self) -> i16 {
        -self.magnitude()
    }

    /// Signed wheel value that drives backward.
    #[inline]
    pub const fn backward(self) -> i16 {
        self.magnitude()
    }
}

// ─── Spin Direction ─────────────────────────────────────────────────

/// Direction of an in-place pivot (one wheel forward, one backward).
///
/// `Clockwise` drives the left wheel forward and the right wheel backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpinDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    /// Map a random bit to a direction (`false` → clockwise).
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    /// The other direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

// ─── Wheel Speeds ───────────────────────────────────────────────────

/// Signed (left, right) wheel speed pair, always within `[-MAX_SPEED, MAX_SPEED]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct WheelSpeeds {
    left: i16,
    right: i16,
}

impl WheelSpeeds {
    /// Both wheels stopped.
    pub const STOP: Self = Self { left: 0, right: 0 };

    /// Build a command, clamping each wheel into the valid range.
    #[inline]
    pub const fn new(left: i16, right: i16) -> Self {
        Self {
            left: clamp_speed(left),
            right: clamp_speed(right),
        }
    }

    /// Both wheels forward at `level`.
    #[inline]
    pub const fn forward(level: SpeedLevel) -> Self {
        Self::new(level.forward(), level.forward())
    }

    /// Both wheels backward at `level`.
    #[inline]
    pub const fn backward(level: SpeedLevel) -> Self {
        Self::new(level.backward(), level.backward())
    }

    /// Sharp turn in place at `level`.
    #[inline]
    pub const fn spin(direction: SpinDirection, level: SpeedLevel) -> Self {
        match direction {
            SpinDirection::Clockwise => Self::new(level.forward(), level.backward()),
            SpinDirection::CounterClockwise => Self::new(level.backward(), level.forward()),
        }
    }

    #[inline]
    pub const fn left(&self) -> i16 {
        self.left
    }

    #[inline]
    pub const fn right(&self) -> i16 {
        self.right
    }

    /// True if both wheels turn forward at the same speed.
    #[inline]
    pub const fn is_straight_forward(&self) -> bool {
        self.left == self.right && self.left < 0
    }

    /// True if both wheels turn backward at the same speed.
    #[inline]
    pub const fn is_straight_backward(&self) -> bool {
        self.left == self.right && self.left > 0
    }

    /// Direction of a sharp turn, or `None` if this is not one.
    pub const fn spin_direction(&self) -> Option<SpinDirection> {
        if self.left == 0 || self.left != -self.right {
            return None;
        }
        if self.left < 0 {
            Some(SpinDirection::Clockwise)
        } else {
            Some(SpinDirection::CounterClockwise)
        }
    }
}

impl std::fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(L{:+}, R{:+})", self.left, self.right)
    }
}

const fn clamp_speed(speed: i16) -> i16 {
    if speed > MAX_SPEED {
        MAX_SPEED
    } else if speed < -MAX_SPEED {
        -MAX_SPEED
    } else {
        speed
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
