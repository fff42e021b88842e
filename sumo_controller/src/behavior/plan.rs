//! Timed-action plans and decisions.
//!
//! A [`Decision`] is pure data: the timed steps to run now (`prelude`), the
//! command to leave on the wheels for the rest of the cycle (`command`) and
//! the state to continue from (`next`). The cycle runner executes it; the
//! `evaluate_*` functions only build it, so they stay deterministic and
//! free of I/O.

use std::time::Duration;

use heapless::Vec;
use sumo_common::consts::MAX_PLAN_STEPS;
use sumo_common::drive::WheelSpeeds;

use super::ControllerState;

/// One step of a timed maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Command the wheels, then block for `hold`.
    Drive { speeds: WheelSpeeds, hold: Duration },
    /// Re-read the reflectance sensor; white aborts the plan.
    CheckEdge,
}

/// Fixed-capacity sequence of steps (no allocation per cycle).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    steps: Vec<Step, MAX_PLAN_STEPS>,
}

impl Plan {
    /// Empty plan.
    #[inline]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a timed drive step.
    pub fn drive(mut self, speeds: WheelSpeeds, hold: Duration) -> Self {
        self.push(Step::Drive { speeds, hold });
        self
    }

    /// Append an edge check.
    pub fn check_edge(mut self) -> Self {
        self.push(Step::CheckEdge);
        self
    }

    fn push(&mut self, step: Step) {
        let pushed = self.steps.push(step);
        debug_assert!(pushed.is_ok(), "plan exceeds {MAX_PLAN_STEPS} steps");
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all drive holds.
    pub fn duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Drive { hold, .. } => *hold,
                Step::CheckEdge => Duration::ZERO,
            })
            .sum()
    }

    /// Wheel commands in execution order.
    pub fn commands(&self) -> impl Iterator<Item = WheelSpeeds> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Drive { speeds, .. } => Some(*speeds),
            Step::CheckEdge => None,
        })
    }
}

/// Outcome of evaluating one behavior for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Timed steps executed before the resting command.
    pub prelude: Plan,
    /// Command left on the wheels until the next cycle.
    pub command: WheelSpeeds,
    /// State to continue from.
    pub next: ControllerState,
}

impl Decision {
    /// Decision with no timed steps.
    #[inline]
    pub fn immediate(command: WheelSpeeds, next: ControllerState) -> Self {
        Self {
            prelude: Plan::new(),
            command,
            next,
        }
    }

    /// Every wheel command this decision issues, in order.
    pub fn commands(&self) -> impl Iterator<Item = WheelSpeeds> + '_ {
        self.prelude.commands().chain(std::iter::once(self.command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo_common::drive::{SpeedLevel, SpinDirection};

    #[test]
    fn plan_builder_keeps_order() {
        let cw = WheelSpeeds::spin(SpinDirection::Clockwise, SpeedLevel::Fast);
        let fwd = WheelSpeeds::forward(SpeedLevel::Fast);
        let plan = Plan::new()
            .drive(cw, Duration::from_millis(100))
            .check_edge()
            .drive(fwd, Duration::from_millis(200));

        assert_eq!(plan.steps().len(), 3);
        assert_eq!(plan.steps()[1], Step::CheckEdge);
        assert_eq!(plan.duration(), Duration::from_millis(300));
        assert_eq!(plan.commands().collect::<std::vec::Vec<_>>(), vec![cw, fwd]);
    }

    #[test]
    fn immediate_decision_has_one_command() {
        let stop = Decision::immediate(WheelSpeeds::STOP, ControllerState::default());
        assert!(stop.prelude.is_empty());
        assert_eq!(stop.commands().count(), 1);
    }
}
