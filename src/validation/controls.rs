//! Raw control-panel input and the typed request built from it.

use crate::core::{
    pulse, CounterMode, CounterState, Direction, EngineError, JkInputs, PulseConfig, PulseResult,
};
use crate::validation::rules::ControlRules;
use crate::validation::violations::InputViolation;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Untyped input as received from a caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawControls {
    /// Stage outputs, most significant first.
    pub state: Vec<bool>,
    pub mode: String,
    /// Defaults to `up` when absent.
    pub direction: Option<String>,
    pub lab_enabled: bool,
    pub j: Option<bool>,
    pub k: Option<bool>,
}

impl Default for RawControls {
    fn default() -> Self {
        Self {
            state: vec![false; 4],
            mode: CounterMode::default().name().to_string(),
            direction: None,
            lab_enabled: false,
            j: None,
            k: None,
        }
    }
}

impl RawControls {
    /// Validate with the standard rules and build the typed request.
    pub fn into_request(self) -> Validation<PulseRequest, NonEmptyVec<InputViolation>> {
        self.into_request_with(&ControlRules::standard())
    }

    /// Validate with custom rules and build the typed request.
    pub fn into_request_with(
        self,
        rules: &ControlRules,
    ) -> Validation<PulseRequest, NonEmptyVec<InputViolation>> {
        match rules.check(&self) {
            Validation::Failure(violations) => Validation::Failure(violations),
            Validation::Success(()) => match self.parse() {
                Ok(request) => Validation::success(request),
                Err(error) => Validation::fail(InputViolation::from(error)),
            },
        }
    }

    /// Convert each field, stopping at the first invalid one.
    pub fn parse(&self) -> Result<PulseRequest, EngineError> {
        let state = CounterState::try_from(self.state.as_slice())?;
        let mode = self.mode.parse::<CounterMode>()?;
        let direction = self.parse_direction()?;
        let lab_inputs = JkInputs::new(self.j.unwrap_or(true), self.k.unwrap_or(true));

        Ok(PulseRequest {
            state,
            config: PulseConfig {
                mode,
                direction,
                lab_enabled: self.lab_enabled,
                lab_inputs,
            },
        })
    }

    pub(crate) fn parse_direction(&self) -> Result<Direction, EngineError> {
        self.direction
            .as_deref()
            .map(str::parse::<Direction>)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// A fully typed pulse request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseRequest {
    pub state: CounterState,
    pub config: PulseConfig,
}

impl PulseRequest {
    pub fn run(&self) -> PulseResult {
        pulse(&self.state, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;

    #[test]
    fn valid_controls_build_request() {
        let raw = RawControls {
            state: vec![false, false, false, true],
            mode: "MOD16_UP_DOWN".to_string(),
            direction: Some("down".to_string()),
            ..RawControls::default()
        };

        match raw.into_request() {
            Validation::Success(request) => {
                assert_eq!(request.state.value(), 1);
                assert_eq!(request.config.mode, CounterMode::Mod16UpDown);
                assert_eq!(request.config.direction, Direction::Down);
                assert_eq!(request.run().next_state, CounterState::ZERO);
            }
            Validation::Failure(violations) => {
                panic!("Expected success, got {} violations", violations.len())
            }
        }
    }

    #[test]
    fn missing_direction_defaults_to_up() {
        let request = RawControls::default().parse().unwrap();
        assert_eq!(request.config.direction, Direction::Up);
    }

    #[test]
    fn lab_inputs_reach_the_lsb() {
        let raw = RawControls {
            state: vec![false, false, false, true],
            lab_enabled: true,
            j: Some(false),
            k: Some(true),
            ..RawControls::default()
        };

        let request = raw.parse().unwrap();
        assert_eq!(request.config.lab_inputs, JkInputs::new(false, true));
        assert!(!request.run().next_state.q(Stage::A));
    }

    #[test]
    fn parse_stops_at_first_error() {
        let raw = RawControls {
            state: vec![true; 5],
            mode: "nonsense".to_string(),
            ..RawControls::default()
        };

        assert_eq!(
            raw.parse(),
            Err(EngineError::StateWidth {
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn controls_deserialize_with_defaults() {
        let raw: RawControls = serde_json::from_str(r#"{ "mode": "MOD10_UP" }"#).unwrap();
        assert_eq!(raw.state, vec![false; 4]);
        assert!(raw.parse().is_ok());
    }
}
