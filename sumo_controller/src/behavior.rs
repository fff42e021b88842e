//! Behavior state machine root.
//!
//! Every behavior is a pure function of `(state, reading, config)` (plus a
//! direction source where a random choice is made) returning a
//! [`Decision`]. The cycle runner in [`crate::cycle`] owns the only mutable
//! copy of [`ControllerState`] and executes decisions against the platform.
//!
//! ## Priority
//!
//! 1. **EdgeRecovery** ([`edge`]): overrides everything for the cycle
//! 2. **Attack** ([`attack`]): drive at the opponent
//! 3. **Search** ([`search`]): sweep or creep until something is in range

pub mod attack;
pub mod edge;
pub mod plan;
pub mod search;

pub use attack::evaluate_attack;
pub use edge::evaluate_edge;
pub use plan::{Decision, Plan, Step};
pub use search::evaluate_search;

use sumo_common::control::{Strategy, SweepPolicy};
use sumo_common::drive::SpinDirection;
use sumo_common::driver::DirectionSource;
use sumo_common::state::{Behavior, JogState};

/// Everything the controller remembers between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControllerState {
    /// Active behavior.
    pub behavior: Behavior,
    /// Current sweep direction (sweep search only).
    pub sweep: SpinDirection,
    /// Jog bookkeeping for the current attack entry.
    pub jog: JogState,
}

impl ControllerState {
    /// Power-on state: searching in the strategy's initial sweep direction.
    #[inline]
    pub const fn initial(strategy: &Strategy) -> Self {
        Self {
            behavior: Behavior::Search,
            sweep: strategy.sweep_direction,
            jog: JogState::Done,
        }
    }

    /// Same state with a different behavior.
    #[inline]
    pub const fn with_behavior(self, behavior: Behavior) -> Self {
        Self { behavior, ..self }
    }

    /// Back to search with the sweep re-rolled per `policy`.
    pub fn back_to_search<R>(self, policy: SweepPolicy, directions: &mut R) -> Self
    where
        R: DirectionSource + ?Sized,
    {
        Self {
            behavior: Behavior::Search,
            sweep: reroll_sweep(self.sweep, policy, directions),
            jog: JogState::Done,
        }
    }
}

/// Sweep direction after a re-roll point.
///
/// Only `SweepPolicy::Random` consumes a bit.
pub fn reroll_sweep<R>(current: SpinDirection, policy: SweepPolicy, directions: &mut R) -> SpinDirection
where
    R: DirectionSource + ?Sized,
{
    match policy {
        SweepPolicy::Fixed => current,
        SweepPolicy::Alternate => current.opposite(),
        SweepPolicy::Random => SpinDirection::from_bit(directions.next_bit()),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
