//! Invariant violations raised by the pure core.

use super::timing::TraceTime;
use thiserror::Error;

/// Errors raised when the core receives input outside its domain.
///
/// The core never recovers from these; they signal a caller bug and are
/// reported instead of silently truncating or padding the input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Counter state must have exactly {expected} stages (found {found})")]
    StateWidth { expected: usize, found: usize },

    #[error("Stage index {0} is out of range (expected 0..=3)")]
    StageOutOfRange(usize),

    #[error("Decimal value {0} does not fit in four stages")]
    ValueOutOfRange(u8),

    #[error("Unknown counter mode '{0}'")]
    UnknownMode(String),

    #[error("Unknown direction '{0}' (expected 'up' or 'down')")]
    UnknownDirection(String),

    #[error("Clear gate needs at least one input stage")]
    EmptyClearGate,

    #[error("Pulse {0} is beyond the last representable trace time")]
    PulseOutOfRange(u64),

    #[error("Trace time must advance: last recorded {last}, got {found}")]
    TimeNotAdvancing { last: TraceTime, found: TraceTime },
}
