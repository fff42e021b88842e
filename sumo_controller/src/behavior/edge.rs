//! EDGE_RECOVERY: back away from the white border.
//!
//! Reverse at medium speed, then turn in place at medium speed (held for
//! `edge_turn_ms` on strategies that ask for it). Recovery always ends in
//! SEARCH, whatever the behavior was when the border was seen.
//!
//! Bit order when both are random: the turn direction is drawn first, then
//! the sweep re-roll.

use sumo_common::control::{ControllerConfig, EdgeTurn};
use sumo_common::drive::{SpeedLevel, SpinDirection, WheelSpeeds};
use sumo_common::driver::DirectionSource;

use super::{ControllerState, Decision, Plan};

/// Evaluate the border check. `None` when the floor is not white.
pub fn evaluate_edge<R>(
    state: ControllerState,
    reflectance: u8,
    cfg: &ControllerConfig,
    directions: &mut R,
) -> Option<Decision>
where
    R: DirectionSource + ?Sized,
{
    if reflectance <= cfg.white_threshold {
        return None;
    }

    let strategy = cfg.strategy();
    let turn_direction = match strategy.edge_turn {
        EdgeTurn::Random => SpinDirection::from_bit(directions.next_bit()),
        EdgeTurn::Clockwise => SpinDirection::Clockwise,
        EdgeTurn::CounterClockwise => SpinDirection::CounterClockwise,
    };
    let turn = WheelSpeeds::spin(turn_direction, SpeedLevel::Medium);

    let mut prelude = Plan::new().drive(WheelSpeeds::backward(SpeedLevel::Medium), cfg.edge_reverse());
    if strategy.hold_edge_turn {
        prelude = prelude.drive(turn, cfg.edge_turn());
    }

    Some(Decision {
        prelude,
        command: turn,
        next: state.back_to_search(strategy.sweep_policy, directions),
    })
}
