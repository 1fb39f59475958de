//! Rules checked against raw controls using Validation.

use crate::core::{CounterMode, CounterState, EngineError};
use crate::validation::controls::RawControls;
use crate::validation::violations::InputViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for validation check functions
pub type ControlCheck =
    Box<dyn Fn(&RawControls) -> Validation<(), NonEmptyVec<InputViolation>> + Send + Sync>;

/// Set of checks applied to raw controls.
/// Uses Validation to accumulate ALL violations.
pub struct ControlRules {
    checks: Vec<ControlCheck>,
}

impl ControlRules {
    /// Rules with no checks.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// State width, mode name, direction name, and lab consistency.
    pub fn standard() -> Self {
        Self::new()
            .require(|raw| accept(CounterState::try_from(raw.state.as_slice())))
            .require(|raw| accept(raw.mode.parse::<CounterMode>()))
            .require(|raw| accept(raw.parse_direction()))
            .require_pred(
                |raw| raw.lab_enabled || (raw.j.is_none() && raw.k.is_none()),
                InputViolation::LabInputsWithoutLabMode,
            )
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&RawControls) -> Validation<(), NonEmptyVec<InputViolation>> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check reporting `violation` when it fails
    pub fn require_pred<F>(mut self, predicate: F, violation: InputViolation) -> Self
    where
        F: Fn(&RawControls) -> bool + Send + Sync + 'static,
    {
        let check = move |raw: &RawControls| {
            if predicate(raw) {
                Validation::success(())
            } else {
                Validation::fail(violation.clone())
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    /// Run all checks, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    pub fn check(&self, raw: &RawControls) -> Validation<(), NonEmptyVec<InputViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<InputViolation>>> =
            self.checks.iter().map(|check| check(raw)).collect();

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

fn accept<T>(parsed: Result<T, EngineError>) -> Validation<(), NonEmptyVec<InputViolation>> {
    match parsed {
        Ok(_) => Validation::success(()),
        Err(error) => Validation::fail(InputViolation::from(error)),
    }
}

impl Default for ControlRules {
    fn default() -> Self {
        Self::standard()
    }
}
