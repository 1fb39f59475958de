//! Session configuration.
//!
//! Settings mirror the control panel of the simulator: counting mode,
//! direction flag, lab mode with its LSB inputs, and how long toggled
//! stages stay highlighted. Every field has a default, so a partial
//! document is enough:
//!
//! ```json
//! { "mode": "MOD10_UP", "highlight_delay_ms": 250 }
//! ```

use crate::core::{CounterMode, Direction, JkInputs, PulseConfig};
use crate::validation::InputViolation;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Default time toggled stages stay highlighted.
pub const DEFAULT_HIGHLIGHT_DELAY_MS: u64 = 500;

/// Simulator session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: CounterMode,
    pub direction: Direction,
    pub lab_mode: bool,
    pub lab_inputs: JkInputs,
    pub highlight_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: CounterMode::default(),
            direction: Direction::default(),
            lab_mode: false,
            lab_inputs: JkInputs::TOGGLE,
            highlight_delay_ms: DEFAULT_HIGHLIGHT_DELAY_MS,
        }
    }
}

/// Errors loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings could not be parsed: {0}")]
    Parse(String),

    #[error("Settings rejected: {}", format_violations(.0))]
    Invalid(Vec<InputViolation>),
}

fn format_violations(violations: &[InputViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Settings {
    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;

        match settings.validate() {
            Validation::Success(()) => Ok(settings),
            Validation::Failure(violations) => Err(SettingsError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Check every setting, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<InputViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<InputViolation>>> = Vec::new();

        checks.push(if self.highlight_delay_ms == 0 {
            Validation::fail(InputViolation::ZeroHighlightDelay)
        } else {
            Validation::success(())
        });

        checks.push(if !self.lab_mode && self.lab_inputs != JkInputs::TOGGLE {
            Validation::fail(InputViolation::LabInputsWithoutLabMode)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Engine configuration for the next pulse.
    pub fn pulse_config(&self) -> PulseConfig {
        PulseConfig {
            mode: self.mode,
            direction: self.direction,
            lab_enabled: self.lab_mode,
            lab_inputs: self.lab_inputs,
        }
    }

    pub fn highlight_delay(&self) -> Duration {
        Duration::from_millis(self.highlight_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_control_panel() {
        let settings = Settings::default();
        assert_eq!(settings.mode, CounterMode::Mod16Up);
        assert_eq!(settings.direction, Direction::Up);
        assert!(!settings.lab_mode);
        assert_eq!(settings.lab_inputs, JkInputs::TOGGLE);
        assert_eq!(settings.highlight_delay(), Duration::from_millis(500));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "mode": "MOD10_UP" }"#).unwrap();
        assert_eq!(settings.mode, CounterMode::Mod10Up);
        assert_eq!(settings.highlight_delay_ms, DEFAULT_HIGHLIGHT_DELAY_MS);
    }

    #[test]
    fn lab_settings_parse() {
        let settings = Settings::from_json(
            r#"{ "mode": "MOD16_UP_DOWN", "direction": "down",
                 "lab_mode": true, "lab_inputs": { "j": false, "k": true } }"#,
        )
        .unwrap();

        let config = settings.pulse_config();
        assert_eq!(config.direction, Direction::Down);
        assert!(config.lab_enabled);
        assert_eq!(config.lab_inputs, JkInputs::new(false, true));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let result = Settings::from_json(r#"{ "mode": "MOD12_UP" }"#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let settings = Settings {
            highlight_delay_ms: 0,
            lab_inputs: JkInputs::new(true, false),
            ..Settings::default()
        };

        match settings.validate() {
            Validation::Failure(violations) => {
                assert_eq!(violations.len(), 2);
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, InputViolation::ZeroHighlightDelay)));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, InputViolation::LabInputsWithoutLabMode)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn invalid_json_settings_are_rejected() {
        let result = Settings::from_json(r#"{ "highlight_delay_ms": 0 }"#);
        match result {
            Err(SettingsError::Invalid(violations)) => {
                assert_eq!(violations, vec![InputViolation::ZeroHighlightDelay]);
            }
            other => panic!("Expected invalid settings, got {other:?}"),
        }
    }
}
