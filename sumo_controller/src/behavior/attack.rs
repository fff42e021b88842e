//! ATTACK: drive straight at the opponent at full speed.
//!
//! The jog is a one-shot feint on the first ATTACK cycle after entry:
//! turn against the sweep, edge check, forward, edge check, turn back for
//! twice as long. The command for the cycle is always full forward; losing
//! the target only changes the state handed to the next cycle.

use sumo_common::control::ControllerConfig;
use sumo_common::drive::{SpeedLevel, WheelSpeeds};
use sumo_common::driver::DirectionSource;
use sumo_common::state::{Behavior, JogState};

use super::{ControllerState, Decision, Plan};

/// Evaluate one ATTACK cycle.
pub fn evaluate_attack<R>(
    state: ControllerState,
    distance_cm: u16,
    cfg: &ControllerConfig,
    directions: &mut R,
) -> Decision
where
    R: DirectionSource + ?Sized,
{
    let strategy = cfg.strategy();
    let charge = WheelSpeeds::forward(SpeedLevel::Fast);

    let prelude = match state.jog {
        JogState::Pending => jog_plan(state, cfg),
        JogState::Done => Plan::new(),
    };

    let next = if distance_cm < cfg.attack_distance_cm {
        ControllerState {
            behavior: Behavior::Attack,
            sweep: state.sweep,
            jog: JogState::Done,
        }
    } else {
        state.back_to_search(strategy.sweep_policy, directions)
    };

    Decision {
        prelude,
        command: charge,
        next,
    }
}

/// The jog maneuver for the current sweep direction.
pub fn jog_plan(state: ControllerState, cfg: &ControllerConfig) -> Plan {
    Plan::new()
        .drive(
            WheelSpeeds::spin(state.sweep.opposite(), SpeedLevel::Fast),
            cfg.jog_turn(),
        )
        .check_edge()
        .drive(WheelSpeeds::forward(SpeedLevel::Fast), cfg.jog_forward())
        .check_edge()
        .drive(
            WheelSpeeds::spin(state.sweep, SpeedLevel::Fast),
            cfg.jog_turn() * 2,
        )
}
