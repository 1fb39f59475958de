//! One clock pulse of the ripple counter.
//!
//! `pulse` is a total, side-effect-free function from a state snapshot and
//! a configuration to the next state. The LSB is clocked by the external
//! clock; every other stage is clocked by the output of its less
//! significant neighbour, so changes propagate LSB to MSB within the pulse.

use super::flip_flop::{next_of, JkInputs};
use super::gate::ClearGate;
use super::mode::{resolve, CounterMode, Direction};
use super::state::{CounterState, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Inputs of one pulse besides the current state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct PulseConfig {
    pub mode: CounterMode,
    /// Only consulted by `CounterMode::Mod16UpDown`.
    pub direction: Direction,
    /// Whether `lab_inputs` drive the LSB.
    pub lab_enabled: bool,
    /// J/K override of the LSB, ignored unless `lab_enabled`.
    pub lab_inputs: JkInputs,
}

impl PulseConfig {
    pub fn new(mode: CounterMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Enable lab mode with the given LSB inputs.
    pub fn with_lab_inputs(mut self, inputs: JkInputs) -> Self {
        self.lab_enabled = true;
        self.lab_inputs = inputs;
        self
    }

    /// Inputs actually applied to the LSB.
    pub fn effective_lsb_inputs(&self) -> JkInputs {
        if self.lab_enabled {
            self.lab_inputs
        } else {
            JkInputs::TOGGLE
        }
    }
}

/// Outcome of one pulse.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PulseResult {
    pub next_state: CounterState,
    /// Stages whose final output differs from their pre-pulse output.
    pub toggled: BTreeSet<Stage>,
    /// Whether the decade clear overrode the rippled state.
    pub cleared: bool,
}

/// Compute the state after one clock pulse.
///
/// # Example
///
/// ```rust
/// use ripple::core::{pulse, CounterMode, CounterState, PulseConfig, Stage};
///
/// let result = pulse(&CounterState::ZERO, &PulseConfig::new(CounterMode::Mod16Down));
/// assert_eq!(result.next_state.value(), 15);
/// assert_eq!(result.toggled.len(), 4);
///
/// let result = pulse(&CounterState::ZERO, &PulseConfig::new(CounterMode::Mod16Up));
/// assert_eq!(result.next_state.value(), 1);
/// assert!(result.toggled.contains(&Stage::A));
/// ```
pub fn pulse(state: &CounterState, config: &PulseConfig) -> PulseResult {
    let rules = resolve(config.mode, config.direction);

    let mut next = state.with(
        Stage::LSB,
        next_of(state.q(Stage::LSB), config.effective_lsb_inputs()),
    );

    for stage in Stage::RIPPLE_ORDER {
        let Some(source) = stage.driver() else {
            continue;
        };
        if rules
            .stage_trigger
            .occurred(state.q(source), next.q(source))
        {
            next = next.with(stage, !state.q(stage));
        }
    }

    let cleared = rules.decade_reset && ClearGate::decade().check(&next);
    if cleared {
        next = reset();
    }

    let toggled: BTreeSet<Stage> = state.differing(&next).collect();

    debug!(
        mode = %config.mode,
        direction = %config.direction,
        lab = config.lab_enabled,
        from = %state,
        to = %next,
        cleared,
        toggled = toggled.len(),
        "clock pulse"
    );

    PulseResult {
        next_state: next,
        toggled,
        cleared,
    }
}

/// The cleared state. Idempotent.
pub fn reset() -> CounterState {
    CounterState::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter_state;

    fn run(mode: CounterMode, pulses: usize) -> Vec<u8> {
        let config = PulseConfig::new(mode);
        let mut state = reset();
        let mut values = Vec::new();
        for _ in 0..pulses {
            state = pulse(&state, &config).next_state;
            values.push(state.value());
        }
        values
    }

    #[test]
    fn first_up_pulse_toggles_only_lsb() {
        let result = pulse(&counter_state![0, 0, 0, 0], &PulseConfig::new(CounterMode::Mod16Up));

        assert_eq!(result.next_state, counter_state![0, 0, 0, 1]);
        assert_eq!(result.toggled, BTreeSet::from([Stage::A]));
        assert!(!result.cleared);
    }

    #[test]
    fn mod16_up_counts_through_every_value() {
        let values = run(CounterMode::Mod16Up, 16);
        let expected: Vec<u8> = (1..16).chain(std::iter::once(0)).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn mod16_down_wraps_below_zero() {
        let result = pulse(&reset(), &PulseConfig::new(CounterMode::Mod16Down));

        assert_eq!(result.next_state, counter_state![1, 1, 1, 1]);
        assert_eq!(result.toggled, Stage::ALL.into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn mod16_down_counts_backwards() {
        let values = run(CounterMode::Mod16Down, 16);
        let expected: Vec<u8> = (0..16).rev().collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn mod10_clears_on_tenth_pulse() {
        let values = run(CounterMode::Mod10Up, 10);
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
    }

    #[test]
    fn mod10_clear_reports_final_differences() {
        let nine = counter_state![1, 0, 0, 1];
        let result = pulse(&nine, &PulseConfig::new(CounterMode::Mod10Up));

        assert!(result.cleared);
        assert_eq!(result.next_state, reset());
        assert_eq!(result.toggled, BTreeSet::from([Stage::D, Stage::A]));
    }

    #[test]
    fn up_down_mode_counts_down_when_requested() {
        let config = PulseConfig::new(CounterMode::Mod16UpDown).with_direction(Direction::Down);
        let result = pulse(&counter_state![0, 0, 0, 1], &config);

        assert_eq!(result.next_state, counter_state![0, 0, 0, 0]);
        assert_eq!(result.toggled, BTreeSet::from([Stage::A]));
    }

    #[test]
    fn up_down_mode_counts_up_by_default() {
        let config = PulseConfig::new(CounterMode::Mod16UpDown);
        let result = pulse(&counter_state![0, 0, 1, 1], &config);
        assert_eq!(result.next_state.value(), 4);
    }

    #[test]
    fn lab_reset_on_lsb_still_ripples() {
        let config =
            PulseConfig::new(CounterMode::Mod16Up).with_lab_inputs(JkInputs::new(false, true));
        let result = pulse(&counter_state![0, 0, 0, 1], &config);

        assert!(!result.next_state.q(Stage::A));
        assert_eq!(result.next_state, counter_state![0, 0, 1, 0]);
        assert_eq!(result.toggled, BTreeSet::from([Stage::B, Stage::A]));
    }

    #[test]
    fn lab_reset_without_edge_toggles_nothing() {
        let config =
            PulseConfig::new(CounterMode::Mod16Up).with_lab_inputs(JkInputs::new(false, true));
        let result = pulse(&counter_state![0, 1, 0, 0], &config);

        assert_eq!(result.next_state, counter_state![0, 1, 0, 0]);
        assert!(result.toggled.is_empty());
    }

    #[test]
    fn lab_hold_freezes_counter() {
        let config =
            PulseConfig::new(CounterMode::Mod16Up).with_lab_inputs(JkInputs::new(false, false));
        let start = counter_state![0, 1, 1, 1];
        let result = pulse(&start, &config);

        assert_eq!(result.next_state, start);
        assert!(result.toggled.is_empty());
    }

    #[test]
    fn lab_set_on_lsb_in_down_mode_ripples_on_rising_edge() {
        let config =
            PulseConfig::new(CounterMode::Mod16Down).with_lab_inputs(JkInputs::new(true, false));
        let result = pulse(&counter_state![0, 0, 0, 0], &config);

        assert_eq!(result.next_state, counter_state![1, 1, 1, 1]);
    }

    #[test]
    fn lab_inputs_ignored_when_disabled() {
        let mut config = PulseConfig::new(CounterMode::Mod16Up);
        config.lab_inputs = JkInputs::new(false, false);

        let result = pulse(&counter_state![0, 0, 0, 0], &config);
        assert_eq!(result.next_state, counter_state![0, 0, 0, 1]);
        assert_eq!(config.effective_lsb_inputs(), JkInputs::TOGGLE);
    }

    #[test]
    fn pulse_does_not_touch_its_input() {
        let state = counter_state![0, 1, 1, 1];
        let copy = state;
        let first = pulse(&state, &PulseConfig::default());
        let second = pulse(&state, &PulseConfig::default());

        assert_eq!(state, copy);
        assert_eq!(first, second);
    }

    #[test]
    fn reset_is_idempotent() {
        assert_eq!(reset(), reset());
        assert_eq!(reset(), counter_state![0, 0, 0, 0]);
    }
}
