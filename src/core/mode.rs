//! Counting modes and the trigger rules they imply.
//!
//! Resolution is a pure, total lookup: every mode/direction pair maps to
//! exactly one edge polarity for the rippled stages and one decision on the
//! decade early reset.

use super::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counting mode of the ripple counter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterMode {
    /// Binary up counter cycling through 0..=15.
    #[default]
    Mod16Up,
    /// Binary down counter cycling through 15..=0.
    Mod16Down,
    /// Binary counter whose direction follows the `Direction` flag.
    Mod16UpDown,
    /// Decade up counter cycling through 0..=9.
    Mod10Up,
}

impl CounterMode {
    pub const ALL: [CounterMode; 4] = [
        CounterMode::Mod16Up,
        CounterMode::Mod16Down,
        CounterMode::Mod16UpDown,
        CounterMode::Mod10Up,
    ];

    /// Canonical selector name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mod16Up => "MOD16_UP",
            Self::Mod16Down => "MOD16_DOWN",
            Self::Mod16UpDown => "MOD16_UP_DOWN",
            Self::Mod10Up => "MOD10_UP",
        }
    }

    /// Number of distinct states visited by this mode.
    pub fn modulus(&self) -> u8 {
        match self {
            Self::Mod10Up => 10,
            Self::Mod16Up | Self::Mod16Down | Self::Mod16UpDown => 16,
        }
    }

    /// Whether the direction flag changes this mode's behaviour.
    pub fn uses_direction(&self) -> bool {
        matches!(self, Self::Mod16UpDown)
    }
}

impl FromStr for CounterMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for CounterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counting direction, only meaningful for `CounterMode::Mod16UpDown`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(EngineError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// Edge polarity a stage reacts to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// High-to-low transition.
    Falling,
    /// Low-to-high transition.
    Rising,
}

impl Edge {
    /// Whether a signal going from `before` to `after` produced this edge.
    pub fn occurred(self, before: bool, after: bool) -> bool {
        match self {
            Self::Falling => before && !after,
            Self::Rising => !before && after,
        }
    }
}

/// Trigger rules for one pulse.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TriggerRules {
    /// Edge of the neighbouring output that clocks each rippled stage.
    pub stage_trigger: Edge,
    /// Whether the decade early reset applies after the ripple settles.
    pub decade_reset: bool,
}

/// Resolve the trigger rules for a mode and direction.
///
/// # Example
///
/// ```rust
/// use ripple::core::{resolve, CounterMode, Direction, Edge};
///
/// let rules = resolve(CounterMode::Mod16UpDown, Direction::Down);
/// assert_eq!(rules.stage_trigger, Edge::Rising);
/// assert!(!rules.decade_reset);
///
/// let rules = resolve(CounterMode::Mod10Up, Direction::Down);
/// assert_eq!(rules.stage_trigger, Edge::Falling);
/// assert!(rules.decade_reset);
/// ```
pub fn resolve(mode: CounterMode, direction: Direction) -> TriggerRules {
    let stage_trigger = match (mode, direction) {
        (CounterMode::Mod16Up | CounterMode::Mod10Up, _) => Edge::Falling,
        (CounterMode::Mod16Down, _) => Edge::Rising,
        (CounterMode::Mod16UpDown, Direction::Up) => Edge::Falling,
        (CounterMode::Mod16UpDown, Direction::Down) => Edge::Rising,
    };

    TriggerRules {
        stage_trigger,
        decade_reset: mode == CounterMode::Mod10Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_modes_trigger_on_falling_edge() {
        for direction in [Direction::Up, Direction::Down] {
            assert_eq!(
                resolve(CounterMode::Mod16Up, direction).stage_trigger,
                Edge::Falling
            );
            assert_eq!(
                resolve(CounterMode::Mod10Up, direction).stage_trigger,
                Edge::Falling
            );
        }
    }

    #[test]
    fn down_mode_triggers_on_rising_edge() {
        for direction in [Direction::Up, Direction::Down] {
            let rules = resolve(CounterMode::Mod16Down, direction);
            assert_eq!(rules.stage_trigger, Edge::Rising);
            assert!(!rules.decade_reset);
        }
    }

    #[test]
    fn up_down_mode_follows_direction() {
        assert_eq!(
            resolve(CounterMode::Mod16UpDown, Direction::Up).stage_trigger,
            Edge::Falling
        );
        assert_eq!(
            resolve(CounterMode::Mod16UpDown, Direction::Down).stage_trigger,
            Edge::Rising
        );
    }

    #[test]
    fn only_decade_mode_resets_early() {
        for mode in CounterMode::ALL {
            let rules = resolve(mode, Direction::Up);
            assert_eq!(rules.decade_reset, mode == CounterMode::Mod10Up);
        }
    }

    #[test]
    fn edge_detection_matches_polarity() {
        assert!(Edge::Falling.occurred(true, false));
        assert!(!Edge::Falling.occurred(false, true));
        assert!(!Edge::Falling.occurred(true, true));
        assert!(Edge::Rising.occurred(false, true));
        assert!(!Edge::Rising.occurred(true, false));
        assert!(!Edge::Rising.occurred(false, false));
    }

    #[test]
    fn mode_parses_from_selector_name() {
        for mode in CounterMode::ALL {
            assert_eq!(mode.name().parse::<CounterMode>(), Ok(mode));
        }
        assert_eq!("mod10_up".parse::<CounterMode>(), Ok(CounterMode::Mod10Up));
        assert_eq!(
            "MOD8_UP".parse::<CounterMode>(),
            Err(EngineError::UnknownMode("MOD8_UP".to_string()))
        );
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("Down".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(" up ".parse::<Direction>(), Ok(Direction::Up));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn mode_serializes_as_selector_name() {
        for mode in CounterMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.name()));
        }
        let direction: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(direction, Direction::Down);
    }

    #[test]
    fn modulus_per_mode() {
        assert_eq!(CounterMode::Mod10Up.modulus(), 10);
        assert_eq!(CounterMode::Mod16Down.modulus(), 16);
        assert!(CounterMode::Mod16UpDown.uses_direction());
        assert!(!CounterMode::Mod16Up.uses_direction());
    }
}
