//! Pure counter simulation core.
//!
//! This module contains everything needed to compute a pulse:
//! - Stage and state types
//! - Mode resolution into edge polarity and decade clear
//! - The JK truth table for the clock-driven stage
//! - The ripple engine and the timing trace
//!
//! All logic in this module is pure (no side effects and no timers),
//! following the "pure core, imperative shell" philosophy.

mod engine;
mod error;
mod flip_flop;
mod gate;
mod mode;
mod state;
mod timing;

pub use engine::{pulse, reset, PulseConfig, PulseResult};
pub use error::EngineError;
pub use flip_flop::{next_of, JkAction, JkInputs};
pub use gate::ClearGate;
pub use mode::{resolve, CounterMode, Direction, Edge, TriggerRules};
pub use state::{CounterState, Stage, STAGE_COUNT};
pub use timing::{Signal, TimingSample, TimingTrace, TraceTime};
