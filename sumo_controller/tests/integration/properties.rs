//! Property-based tests for the behavior functions.
//!
//! Generates controller states, readings and strategies and checks the
//! rules every decision must follow.

use proptest::prelude::*;

use sumo_common::consts::MAX_SPEED;
use sumo_common::control::{
    ControllerConfig, EdgeTurn, Profile, SearchPattern, Strategy as Tactics, SweepPolicy,
};
use sumo_common::drive::{SpeedLevel, SpinDirection, WheelSpeeds};
use sumo_common::state::{Behavior, JogState};
use sumo_controller::ScriptedDirections;
use sumo_controller::behavior::{
    ControllerState, Step, evaluate_attack, evaluate_edge, evaluate_search,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_direction() -> impl Strategy<Value = SpinDirection> {
    any::<bool>().prop_map(SpinDirection::from_bit)
}

fn arb_tactics() -> impl Strategy<Value = Tactics> {
    (
        prop_oneof![Just(SearchPattern::Sweep), Just(SearchPattern::Creep)],
        arb_direction(),
        prop_oneof![
            Just(SweepPolicy::Fixed),
            Just(SweepPolicy::Alternate),
            Just(SweepPolicy::Random)
        ],
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(EdgeTurn::Random),
            Just(EdgeTurn::Clockwise),
            Just(EdgeTurn::CounterClockwise)
        ],
        any::<bool>(),
    )
        .prop_map(
            |(search, sweep_direction, sweep_policy, reverse, jog, edge_turn, hold)| Tactics {
                search,
                sweep_direction,
                sweep_policy,
                reverse_before_attack: reverse,
                jog_on_attack: jog,
                edge_turn,
                hold_edge_turn: hold,
            },
        )
}

fn arb_config() -> impl Strategy<Value = ControllerConfig> {
    (arb_tactics(), 1u16..=120, 0u8..100).prop_map(|(tactics, attack, white)| {
        ControllerConfig {
            profile: Profile::Spin,
            strategy: tactics.into(),
            attack_distance_cm: attack,
            white_threshold: white,
            ..Default::default()
        }
    })
}

fn arb_state() -> impl Strategy<Value = ControllerState> {
    (
        prop_oneof![Just(Behavior::Search), Just(Behavior::Attack)],
        arb_direction(),
        prop_oneof![Just(JogState::Pending), Just(JogState::Done)],
    )
        .prop_map(|(behavior, sweep, jog)| ControllerState {
            behavior,
            sweep,
            jog,
        })
}

fn in_bounds(speeds: WheelSpeeds) -> bool {
    speeds.left().abs() <= MAX_SPEED && speeds.right().abs() <= MAX_SPEED
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_commands_always_bounded(
        config in arb_config(),
        state in arb_state(),
        distance in any::<u16>(),
        reflectance in 0u8..=100,
        bits in prop::collection::vec(any::<bool>(), 0..4),
    ) {
        let mut directions = ScriptedDirections::new(bits);
        let search = evaluate_search(state, distance, &config);
        let attack = evaluate_attack(state, distance, &config, &mut directions);
        let edge = evaluate_edge(state, reflectance, &config, &mut directions);

        for decision in [Some(search), Some(attack), edge].into_iter().flatten() {
            prop_assert!(decision.commands().all(in_bounds));
            prop_assert_ne!(decision.next.behavior, Behavior::EdgeRecovery);
        }
    }

    #[test]
    fn proptest_edge_override_iff_white(
        config in arb_config(),
        state in arb_state(),
        reflectance in 0u8..=100,
        bits in prop::collection::vec(any::<bool>(), 0..4),
    ) {
        let mut directions = ScriptedDirections::new(bits);
        let decision = evaluate_edge(state, reflectance, &config, &mut directions);

        if reflectance > config.white_threshold {
            let decision = decision.unwrap();
            prop_assert_eq!(decision.next.behavior, Behavior::Search);
            prop_assert_eq!(decision.next.jog, JogState::Done);
            match decision.prelude.steps()[0] {
                Step::Drive { speeds, hold } => {
                    prop_assert_eq!(speeds, WheelSpeeds::backward(SpeedLevel::Medium));
                    prop_assert_eq!(hold, config.edge_reverse());
                }
                Step::CheckEdge => prop_assert!(false, "recovery must start by reversing"),
            }
            prop_assert!(decision.command.spin_direction().is_some());
        } else {
            prop_assert!(decision.is_none());
            prop_assert_eq!(directions.drawn(), 0);
        }
    }

    #[test]
    fn proptest_sweep_search_never_straight(
        config in arb_config(),
        sweep in arb_direction(),
        extra in 0u16..500,
    ) {
        prop_assume!(config.strategy().search == SearchPattern::Sweep);
        let state = ControllerState { behavior: Behavior::Search, sweep, jog: JogState::Done };
        let distance = config.attack_distance_cm.saturating_add(extra);
        let decision = evaluate_search(state, distance, &config);

        prop_assert_eq!(decision.next.behavior, Behavior::Search);
        prop_assert!(!decision.command.is_straight_forward());
        prop_assert!(!decision.command.is_straight_backward());
        prop_assert_eq!(decision.command.spin_direction(), Some(sweep));
    }

    #[test]
    fn proptest_close_target_enters_attack(
        config in arb_config(),
        sweep in arb_direction(),
    ) {
        let state = ControllerState { behavior: Behavior::Search, sweep, jog: JogState::Done };
        let distance = config.attack_distance_cm - 1;
        let decision = evaluate_search(state, distance, &config);
        let strategy = config.strategy();

        prop_assert_eq!(decision.next.behavior, Behavior::Attack);
        prop_assert_eq!(decision.next.jog == JogState::Pending, strategy.jog_on_attack);
        prop_assert_eq!(decision.prelude.is_empty(), !strategy.reverse_before_attack);
        prop_assert_eq!(decision.prelude.duration().is_zero(), !strategy.reverse_before_attack);
    }

    #[test]
    fn proptest_attack_is_idempotent_once_jog_done(
        config in arb_config(),
        sweep in arb_direction(),
    ) {
        let state = ControllerState { behavior: Behavior::Attack, sweep, jog: JogState::Done };
        let distance = config.attack_distance_cm - 1;
        let mut directions = ScriptedDirections::default();

        let first = evaluate_attack(state, distance, &config, &mut directions);
        let second = evaluate_attack(first.next, distance, &config, &mut directions);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.prelude.is_empty());
        prop_assert_eq!(first.command, WheelSpeeds::forward(SpeedLevel::Fast));
        prop_assert_eq!(directions.drawn(), 0);
    }

    #[test]
    fn proptest_search_attack_search_round_trip(
        config in arb_config(),
        sweep in arb_direction(),
        far in 0u16..200,
    ) {
        prop_assume!(config.strategy().sweep_policy == SweepPolicy::Fixed);
        let start = ControllerState { behavior: Behavior::Search, sweep, jog: JogState::Done };
        let mut directions = ScriptedDirections::default();

        let entered = evaluate_search(start, config.attack_distance_cm - 1, &config);
        let left = evaluate_attack(
            entered.next,
            config.attack_distance_cm.saturating_add(far),
            &config,
            &mut directions,
        );
        prop_assert_eq!(left.next, start);
    }
}
