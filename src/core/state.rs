//! Counter stages and the four-bit state vector.
//!
//! Stage order follows the circuit diagram: index 0 is the most
//! significant stage (D) and index 3 is the least significant stage (A),
//! the one driven directly by the external clock.

use super::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of flip-flops in the counter.
pub const STAGE_COUNT: usize = 4;

/// Identifies one flip-flop of the counter.
///
/// Ordering follows the index, so `D < C < B < A`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Stage {
    D,
    C,
    B,
    A,
}

impl Stage {
    /// All stages, most significant first.
    pub const ALL: [Stage; STAGE_COUNT] = [Stage::D, Stage::C, Stage::B, Stage::A];

    /// Stages clocked by their less significant neighbour, in ripple order.
    pub const RIPPLE_ORDER: [Stage; 3] = [Stage::B, Stage::C, Stage::D];

    /// The stage driven by the external clock.
    pub const LSB: Stage = Stage::A;

    /// The stage driving the decade clear together with `B`.
    pub const MSB: Stage = Stage::D;

    /// Position of this stage in a `CounterState`.
    pub fn index(self) -> usize {
        match self {
            Self::D => 0,
            Self::C => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }

    /// Binary weight of this stage's output.
    pub fn weight(self) -> u8 {
        1 << (STAGE_COUNT - 1 - self.index())
    }

    /// The neighbour whose output clocks this stage, or `None` for the LSB.
    pub fn driver(self) -> Option<Stage> {
        match self {
            Self::D => Some(Self::C),
            Self::C => Some(Self::B),
            Self::B => Some(Self::A),
            Self::A => None,
        }
    }

    /// Signal name used on the timing diagram.
    pub fn signal_name(self) -> &'static str {
        match self {
            Self::D => "Q_D",
            Self::C => "Q_C",
            Self::B => "Q_B",
            Self::A => "Q_A",
        }
    }
}

impl TryFrom<usize> for Stage {
    type Error = EngineError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Stage::ALL
            .get(index)
            .copied()
            .ok_or(EngineError::StageOutOfRange(index))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
        };
        f.write_str(name)
    }
}

/// Output (Q) of every stage, most significant first.
///
/// States are values: a pulse produces a new state instead of mutating
/// the current one.
///
/// # Example
///
/// ```rust
/// use ripple::core::{CounterState, Stage};
///
/// let state = CounterState::from_value(10).unwrap();
/// assert_eq!(state.bits(), [true, false, true, false]);
/// assert!(state.q(Stage::D));
/// assert!(!state.q(Stage::A));
/// assert_eq!(state.to_string(), "1010");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CounterState([bool; STAGE_COUNT]);

impl CounterState {
    /// The cleared state `[0, 0, 0, 0]`.
    pub const ZERO: CounterState = CounterState([false; STAGE_COUNT]);

    pub fn from_bits(bits: [bool; STAGE_COUNT]) -> Self {
        Self(bits)
    }

    /// Build the state whose decimal reading is `value`.
    pub fn from_value(value: u8) -> Result<Self, EngineError> {
        if usize::from(value) >= 1 << STAGE_COUNT {
            return Err(EngineError::ValueOutOfRange(value));
        }
        let mut bits = [false; STAGE_COUNT];
        for stage in Stage::ALL {
            bits[stage.index()] = value & stage.weight() != 0;
        }
        Ok(Self(bits))
    }

    pub fn bits(&self) -> [bool; STAGE_COUNT] {
        self.0
    }

    /// Output of a single stage.
    pub fn q(&self, stage: Stage) -> bool {
        self.0[stage.index()]
    }

    /// Copy of this state with one stage replaced.
    pub fn with(&self, stage: Stage, q: bool) -> Self {
        let mut bits = self.0;
        bits[stage.index()] = q;
        Self(bits)
    }

    /// Decimal reading: `Σ state[i] * 2^(3-i)`.
    pub fn value(&self) -> u8 {
        Stage::ALL
            .iter()
            .filter(|stage| self.q(**stage))
            .map(|stage| stage.weight())
            .sum()
    }

    /// Outputs as 0/1 levels, most significant first.
    pub fn levels(&self) -> [u8; STAGE_COUNT] {
        self.0.map(u8::from)
    }

    /// Stages whose output differs between `self` and `other`.
    pub fn differing(&self, other: &CounterState) -> impl Iterator<Item = Stage> + '_ {
        let other = *other;
        Stage::ALL
            .into_iter()
            .filter(move |stage| self.q(*stage) != other.q(*stage))
    }
}

impl TryFrom<&[bool]> for CounterState {
    type Error = EngineError;

    fn try_from(bits: &[bool]) -> Result<Self, Self::Error> {
        let bits: [bool; STAGE_COUNT] =
            bits.try_into().map_err(|_| EngineError::StateWidth {
                expected: STAGE_COUNT,
                found: bits.len(),
            })?;
        Ok(Self(bits))
    }
}

impl From<CounterState> for [bool; STAGE_COUNT] {
    fn from(state: CounterState) -> Self {
        state.0
    }
}

impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in self.0 {
            f.write_str(if q { "1" } else { "0" })?;
        }
        Ok(())
    }
}
