//! Clear gates for early (out-of-sequence) resets.
//!
//! A gate is a pure predicate over a settled counter state. When every
//! stage it watches is high, the counter is cleared before the next pulse.

use super::error::EngineError;
use super::state::{CounterState, Stage, STAGE_COUNT};
use serde::{Deserialize, Serialize};

/// AND gate over a set of stage outputs feeding the asynchronous clear.
///
/// # Example
///
/// ```rust
/// use ripple::core::{ClearGate, CounterState};
///
/// let gate = ClearGate::decade();
/// assert!(gate.check(&CounterState::from_value(10).unwrap()));
/// assert!(!gate.check(&CounterState::from_value(9).unwrap()));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ClearGate {
    watched: [bool; STAGE_COUNT],
}

impl ClearGate {
    /// Gate that fires when all `stages` are high.
    ///
    /// A gate with no inputs would clear on every pulse, so an empty list
    /// is rejected.
    pub fn new(stages: &[Stage]) -> Result<Self, EngineError> {
        if stages.is_empty() {
            return Err(EngineError::EmptyClearGate);
        }
        Ok(Self::watching(stages))
    }

    fn watching(stages: &[Stage]) -> Self {
        let mut watched = [false; STAGE_COUNT];
        for stage in stages {
            watched[stage.index()] = true;
        }
        Self { watched }
    }

    /// Decade gate on Q_D and Q_B, first satisfied at decimal 10.
    ///
    /// Only sound while counting up from zero: 11, 14 and 15 also satisfy
    /// it, so a state above 9 must never be injected in decade mode.
    pub fn decade() -> Self {
        Self::watching(&[Stage::D, Stage::B])
    }

    /// Stages feeding the gate, most significant first.
    pub fn inputs(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.watched[stage.index()])
            .collect()
    }

    /// Whether the gate output is high for `state`.
    pub fn check(&self, state: &CounterState) -> bool {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.watched[stage.index()])
            .all(|stage| state.q(stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_gate_watches_d_and_b() {
        assert_eq!(ClearGate::decade().inputs(), vec![Stage::D, Stage::B]);
    }

    #[test]
    fn decade_gate_first_fires_at_ten() {
        let gate = ClearGate::decade();
        let first = (0..16u8)
            .find(|value| gate.check(&CounterState::from_value(*value).unwrap()));
        assert_eq!(first, Some(10));
    }

    #[test]
    fn decade_gate_also_fires_above_ten() {
        let gate = ClearGate::decade();
        let firing: Vec<u8> = (0..16u8)
            .filter(|value| gate.check(&CounterState::from_value(*value).unwrap()))
            .collect();
        assert_eq!(firing, vec![10, 11, 14, 15]);
    }

    #[test]
    fn empty_gate_is_rejected() {
        assert_eq!(ClearGate::new(&[]), Err(EngineError::EmptyClearGate));
    }

    #[test]
    fn custom_gate_watches_given_stages() {
        let gate = ClearGate::new(&[Stage::C, Stage::A]).unwrap();

        assert_eq!(gate.inputs(), vec![Stage::C, Stage::A]);
        assert!(gate.check(&CounterState::from_value(5).unwrap()));
        assert!(!gate.check(&CounterState::ZERO));
    }

    #[test]
    fn gate_is_deterministic() {
        let gate = ClearGate::decade();
        let state = CounterState::from_value(10).unwrap();
        assert_eq!(gate.check(&state), gate.check(&state));
    }
}
