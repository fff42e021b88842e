//! Controller tuning: thresholds, timed-action durations and strategy.
//!
//! All config types use `serde::Deserialize` for TOML loading and
//! `#[serde(default)]` for every field so a partial `[controller]` table works.
//! Keys set in `[controller.strategy]` replace the matching field of the
//! profile preset; the rest come from the profile. Unknown keys are rejected.
//!
//! # TOML Example
//!
//! ```toml
//! [controller]
//! profile = "spin_jog"
//! attack_distance_cm = 40
//!
//! [controller.strategy]
//! sweep_policy = "alternate"
//! hold_edge_turn = true
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ATTACK_DISTANCE_CM, CYCLE_TIME_MS, CYCLE_TIME_MS_MAX, CYCLE_TIME_MS_MIN, EDGE_REVERSE_MS,
    EDGE_TURN_MS, JOG_FORWARD_MS, JOG_TURN_MS, OPENING_ADVANCE_MS, REFLECTANCE_MAX,
    REVERSE_BEFORE_ATTACK_MS, SONAR_NO_TARGET_CM, START_DELAY_MS, START_DELAY_MS_MAX,
    TIMED_ACTION_MS_MAX, WHITE_THRESHOLD,
};
use crate::drive::SpinDirection;

// ─── Strategy ───────────────────────────────────────────────────────

/// How the robot looks for the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPattern {
    /// Sharp turn in place.
    Sweep,
    /// Slow straight advance.
    Creep,
}

/// How the sweep direction changes at re-roll points
/// (leaving an attack, finishing an edge recovery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepPolicy {
    /// Never changes.
    Fixed,
    /// Flips every time.
    Alternate,
    /// Takes a fresh random bit.
    Random,
}

/// Which way to turn after backing off the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeTurn {
    Random,
    Clockwise,
    CounterClockwise,
}

/// Behavioral variant of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub search: SearchPattern,
    /// Sweep direction at startup.
    pub sweep_direction: SpinDirection,
    pub sweep_policy: SweepPolicy,
    /// Briefly counter-sweep before committing to an attack.
    pub reverse_before_attack: bool,
    /// Run the one-shot jog on the first attack cycle.
    pub jog_on_attack: bool,
    pub edge_turn: EdgeTurn,
    /// Hold the edge turn for `edge_turn_ms` before the cycle tick.
    pub hold_edge_turn: bool,
}

/// Per-field replacements for a profile's [`Strategy`] (`[controller.strategy]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyOverrides {
    pub search: Option<SearchPattern>,
    pub sweep_direction: Option<SpinDirection>,
    pub sweep_policy: Option<SweepPolicy>,
    pub reverse_before_attack: Option<bool>,
    pub jog_on_attack: Option<bool>,
    pub edge_turn: Option<EdgeTurn>,
    pub hold_edge_turn: Option<bool>,
}

impl StrategyOverrides {
    /// `base` with every set field replaced.
    pub fn apply(&self, base: Strategy) -> Strategy {
        Strategy {
            search: self.search.unwrap_or(base.search),
            sweep_direction: self.sweep_direction.unwrap_or(base.sweep_direction),
            sweep_policy: self.sweep_policy.unwrap_or(base.sweep_policy),
            reverse_before_attack: self
                .reverse_before_attack
                .unwrap_or(base.reverse_before_attack),
            jog_on_attack: self.jog_on_attack.unwrap_or(base.jog_on_attack),
            edge_turn: self.edge_turn.unwrap_or(base.edge_turn),
            hold_edge_turn: self.hold_edge_turn.unwrap_or(base.hold_edge_turn),
        }
    }
}

impl From<Strategy> for StrategyOverrides {
    fn from(s: Strategy) -> Self {
        Self {
            search: Some(s.search),
            sweep_direction: Some(s.sweep_direction),
            sweep_policy: Some(s.sweep_policy),
            reverse_before_attack: Some(s.reverse_before_attack),
            jog_on_attack: Some(s.jog_on_attack),
            edge_turn: Some(s.edge_turn),
            hold_edge_turn: Some(s.hold_edge_turn),
        }
    }
}

/// Named strategy presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Creep forward, charge when close, fixed edge turn.
    Classic,
    /// Spin in place with a randomly re-rolled direction.
    #[default]
    Spin,
    /// Fixed spin direction with a jog on every attack entry.
    SpinJog,
}

impl Profile {
    /// Preset strategy for this profile.
    pub const fn strategy(self) -> Strategy {
        match self {
            Self::Classic => Strategy {
                search: SearchPattern::Creep,
                sweep_direction: SpinDirection::Clockwise,
                sweep_policy: SweepPolicy::Fixed,
                reverse_before_attack: false,
                jog_on_attack: false,
                edge_turn: EdgeTurn::Clockwise,
                hold_edge_turn: true,
            },
            Self::Spin => Strategy {
                search: SearchPattern::Sweep,
                sweep_direction: SpinDirection::Clockwise,
                sweep_policy: SweepPolicy::Random,
                reverse_before_attack: true,
                jog_on_attack: false,
                edge_turn: EdgeTurn::Random,
                hold_edge_turn: false,
            },
            Self::SpinJog => Strategy {
                search: SearchPattern::Sweep,
                sweep_direction: SpinDirection::CounterClockwise,
                sweep_policy: SweepPolicy::Fixed,
                reverse_before_attack: true,
                jog_on_attack: true,
                edge_turn: EdgeTurn::Random,
                hold_edge_turn: false,
            },
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Spin => "spin",
            Self::SpinJog => "spin_jog",
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "spin" => Ok(Self::Spin),
            "spin_jog" => Ok(Self::SpinJog),
            other => Err(format!(
                "unknown profile '{other}' (expected classic, spin or spin_jog)"
            )),
        }
    }
}

// ─── Controller Config ──────────────────────────────────────────────

/// Controller configuration (`[controller]` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Strategy preset.
    pub profile: Profile,
    /// Fields replaced on top of the preset.
    pub strategy: StrategyOverrides,
    /// Attack when the sonar reads strictly less than this [cm].
    pub attack_distance_cm: u16,
    /// Floor is white when reflectance is strictly greater than this.
    pub white_threshold: u8,
    /// Inter-cycle delay [ms].
    pub cycle_time_ms: u32,
    /// Counter-sweep before attacking [ms].
    pub reverse_before_attack_ms: u32,
    /// Edge recovery reverse [ms].
    pub edge_reverse_ms: u32,
    /// Held edge turn [ms] (strategies with `hold_edge_turn`).
    pub edge_turn_ms: u32,
    /// Jog sharp turn [ms]; the turn back lasts twice as long.
    pub jog_turn_ms: u32,
    /// Jog forward leg [ms].
    pub jog_forward_ms: u32,
    /// Wait before the opening move [ms].
    pub start_delay_ms: u32,
    /// Straight medium-speed advance after the start delay [ms].
    pub opening_advance_ms: u32,
    /// Seed for the direction source; time-based when absent.
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            strategy: StrategyOverrides::default(),
            attack_distance_cm: ATTACK_DISTANCE_CM,
            white_threshold: WHITE_THRESHOLD,
            cycle_time_ms: CYCLE_TIME_MS,
            reverse_before_attack_ms: REVERSE_BEFORE_ATTACK_MS,
            edge_reverse_ms: EDGE_REVERSE_MS,
            edge_turn_ms: EDGE_TURN_MS,
            jog_turn_ms: JOG_TURN_MS,
            jog_forward_ms: JOG_FORWARD_MS,
            start_delay_ms: START_DELAY_MS,
            opening_advance_ms: OPENING_ADVANCE_MS,
            seed: None,
        }
    }
}

impl ControllerConfig {
    /// Effective strategy: the profile preset with the overrides applied.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy.apply(self.profile.strategy())
    }

    #[inline]
    pub fn cycle_time(&self) -> Duration {
        ms(self.cycle_time_ms)
    }

    #[inline]
    pub fn reverse_before_attack(&self) -> Duration {
        ms(self.reverse_before_attack_ms)
    }

    #[inline]
    pub fn edge_reverse(&self) -> Duration {
        ms(self.edge_reverse_ms)
    }

    #[inline]
    pub fn edge_turn(&self) -> Duration {
        ms(self.edge_turn_ms)
    }

    #[inline]
    pub fn jog_turn(&self) -> Duration {
        ms(self.jog_turn_ms)
    }

    #[inline]
    pub fn jog_forward(&self) -> Duration {
        ms(self.jog_forward_ms)
    }

    #[inline]
    pub fn start_delay(&self) -> Duration {
        ms(self.start_delay_ms)
    }

    #[inline]
    pub fn opening_advance(&self) -> Duration {
        ms(self.opening_advance_ms)
    }

    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.attack_distance_cm == 0 || self.attack_distance_cm > SONAR_NO_TARGET_CM {
            return Err(format!(
                "attack_distance_cm {} out of range [1, {}]",
                self.attack_distance_cm, SONAR_NO_TARGET_CM
            ));
        }
        if self.white_threshold >= REFLECTANCE_MAX {
            return Err(format!(
                "white_threshold {} out of range [0, {})",
                self.white_threshold, REFLECTANCE_MAX
            ));
        }
        if self.cycle_time_ms < CYCLE_TIME_MS_MIN || self.cycle_time_ms > CYCLE_TIME_MS_MAX {
            return Err(format!(
                "cycle_time_ms {} out of range [{}, {}]",
                self.cycle_time_ms, CYCLE_TIME_MS_MIN, CYCLE_TIME_MS_MAX
            ));
        }
        let timed = [
            ("reverse_before_attack_ms", self.reverse_before_attack_ms),
            ("edge_reverse_ms", self.edge_reverse_ms),
            ("edge_turn_ms", self.edge_turn_ms),
            ("jog_turn_ms", self.jog_turn_ms.saturating_mul(2)),
            ("jog_forward_ms", self.jog_forward_ms),
            ("opening_advance_ms", self.opening_advance_ms),
        ];
        for (name, value) in timed {
            if value > TIMED_ACTION_MS_MAX {
                return Err(format!(
                    "{name} {value} exceeds timed action limit {TIMED_ACTION_MS_MAX}"
                ));
            }
        }
        if self.start_delay_ms > START_DELAY_MS_MAX {
            return Err(format!(
                "start_delay_ms {} exceeds {}",
                self.start_delay_ms, START_DELAY_MS_MAX
            ));
        }
        Ok(())
    }
}

fn ms(value: u32) -> Duration {
    Duration::from_millis(u64::from(value))
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ControllerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.attack_distance_cm, 30);
        assert_eq!(cfg.white_threshold, 40);
        assert_eq!(cfg.cycle_time(), Duration::from_millis(50));
        assert_eq!(cfg.profile, Profile::Spin);
    }

    #[test]
    fn explicit_strategy_overrides_profile() {
        let mut cfg = ControllerConfig::default();
        assert_eq!(cfg.strategy(), Profile::Spin.strategy());

        let custom = Strategy {
            sweep_policy: SweepPolicy::Alternate,
            ..Profile::SpinJog.strategy()
        };
        cfg.strategy = custom.into();
        assert_eq!(cfg.strategy(), custom);
        assert!(cfg.strategy().jog_on_attack);
    }

    #[test]
    fn partial_overrides_keep_profile_fields() {
        let cfg = ControllerConfig {
            profile: Profile::Classic,
            strategy: StrategyOverrides {
                jog_on_attack: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            cfg.strategy(),
            Strategy {
                jog_on_attack: true,
                ..Profile::Classic.strategy()
            }
        );
    }

    #[test]
    fn profile_presets() {
        let classic = Profile::Classic.strategy();
        assert_eq!(classic.search, SearchPattern::Creep);
        assert!(classic.hold_edge_turn);
        assert!(!classic.reverse_before_attack);

        let spin = Profile::Spin.strategy();
        assert_eq!(spin.sweep_policy, SweepPolicy::Random);
        assert!(!spin.jog_on_attack);

        let jog = Profile::SpinJog.strategy();
        assert_eq!(jog.sweep_direction, SpinDirection::CounterClockwise);
        assert!(jog.jog_on_attack);
    }

    #[test]
    fn profile_from_str() {
        assert_eq!("spin_jog".parse::<Profile>(), Ok(Profile::SpinJog));
        assert!("tornado".parse::<Profile>().is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let cfg = ControllerConfig {
            attack_distance_cm: 0,
            ..Default::default()
        };
        assert!(cfg.validate().unwrap_err().contains("attack_distance_cm"));

        let cfg = ControllerConfig {
            white_threshold: 100,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ControllerConfig {
            cycle_time_ms: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ControllerConfig {
            jog_turn_ms: 6_000,
            ..Default::default()
        };
        assert!(cfg.validate().unwrap_err().contains("jog_turn_ms"));
    }
}
