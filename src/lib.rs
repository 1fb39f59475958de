//! Ripple: a pure functional simulator for 4-bit asynchronous JK counters
//!
//! Ripple follows the "pure core, imperative shell" philosophy. The core
//! computes each clock pulse as a pure function from the current flip-flop
//! outputs to the next ones, while the shell keeps the interactive session
//! (clock count, timing trace, highlighted stages) a teaching front end
//! renders.
//!
//! # Core Concepts
//!
//! - **CounterState**: the four stage outputs, most significant first
//! - **Modes**: MOD-16 up, down, up/down and MOD-10 decade counting, each
//!   resolved into an edge polarity and an optional early clear
//! - **Pulse**: LSB clocked by the external clock, every other stage by its
//!   neighbour's output, so changes ripple LSB to MSB
//! - **TimingTrace**: append-only samples for the timing diagram
//!
//! # Example
//!
//! ```rust
//! use ripple::core::{pulse, CounterMode, CounterState, PulseConfig, TimingTrace};
//!
//! let config = PulseConfig::new(CounterMode::Mod10Up);
//! let mut state = CounterState::ZERO;
//! let mut trace = TimingTrace::seed();
//!
//! for n in 1..=10u64 {
//!     let result = pulse(&state, &config);
//!     trace = trace.record(&state, &result.next_state, n).unwrap();
//!     state = result.next_state;
//! }
//!
//! assert_eq!(state, CounterState::ZERO);
//! assert_eq!(trace.len(), 21);
//! ```

mod macros;

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod shell;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use core::{
    pulse, reset, CounterMode, CounterState, Direction, EngineError, JkInputs, PulseConfig,
    PulseResult, Stage, TimingSample, TimingTrace,
};
pub use shell::Simulator;
