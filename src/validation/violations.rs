//! Input violations.

use crate::core::EngineError;
use thiserror::Error;

/// Problems found in caller input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputViolation {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("J/K inputs were supplied but lab mode is disabled")]
    LabInputsWithoutLabMode,

    #[error("Lab mode is disabled; enable it before overriding J/K")]
    LabModeDisabled,

    #[error("Highlight delay must be greater than zero")]
    ZeroHighlightDelay,

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
