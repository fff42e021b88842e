//! SEARCH: look for the opponent.
//!
//! Out of range, the robot either sweeps (sharp turn in place at full speed)
//! or creeps (slow straight advance), depending on the strategy. In range,
//! it switches to ATTACK; strategies with `reverse_before_attack` first
//! counter the sweep momentum for `reverse_before_attack_ms`.

use sumo_common::control::{ControllerConfig, SearchPattern};
use sumo_common::drive::{SpeedLevel, WheelSpeeds};
use sumo_common::state::{Behavior, JogState};

use super::{ControllerState, Decision, Plan};

/// Evaluate one SEARCH cycle.
pub fn evaluate_search(state: ControllerState, distance_cm: u16, cfg: &ControllerConfig) -> Decision {
    let strategy = cfg.strategy();

    if distance_cm >= cfg.attack_distance_cm {
        let command = match strategy.search {
            SearchPattern::Sweep => WheelSpeeds::spin(state.sweep, SpeedLevel::Fast),
            SearchPattern::Creep => WheelSpeeds::forward(SpeedLevel::Slow),
        };
        return Decision::immediate(command, state.with_behavior(Behavior::Search));
    }

    let next = ControllerState {
        behavior: Behavior::Attack,
        sweep: state.sweep,
        jog: if strategy.jog_on_attack {
            JogState::Pending
        } else {
            JogState::Done
        },
    };

    if !strategy.reverse_before_attack {
        return Decision::immediate(WheelSpeeds::forward(SpeedLevel::Fast), next);
    }

    let brake = match strategy.search {
        SearchPattern::Sweep => WheelSpeeds::spin(state.sweep.opposite(), SpeedLevel::Fast),
        SearchPattern::Creep => WheelSpeeds::backward(SpeedLevel::Slow),
    };

    Decision {
        prelude: Plan::new().drive(brake, cfg.reverse_before_attack()),
        command: brake,
        next,
    }
}
