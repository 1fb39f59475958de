//! Imperative shell around the pure core.
//!
//! The shell owns everything the core deliberately does not: the mutable
//! session a control panel edits, the running clock count, and the
//! transient highlight of toggled stages with its deferred clear.
//!
//! # Key Concepts
//!
//! - **Simulator**: replaces its state wholesale on every pulse and keeps
//!   the timing trace in step with it
//! - **Highlight**: cancellable deferred clear, driven by the caller's own
//!   timer so the shell never blocks or sleeps

mod highlight;
mod simulator;

pub use highlight::{ClearTicket, Highlight};
pub use simulator::{PulseReport, Simulator};
