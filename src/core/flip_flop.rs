//! JK flip-flop truth table.

use serde::{Deserialize, Serialize};

/// J and K inputs of a flip-flop.
///
/// Only the least significant stage is ever addressed; the rippled stages
/// are wired as toggle cells. The default is the toggle wiring (J=K=1).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct JkInputs {
    pub j: bool,
    pub k: bool,
}

impl JkInputs {
    /// J=K=1, the wiring used whenever lab mode is off.
    pub const TOGGLE: JkInputs = JkInputs { j: true, k: true };

    pub fn new(j: bool, k: bool) -> Self {
        Self { j, k }
    }

    /// The row of the truth table these inputs select.
    pub fn action(&self) -> JkAction {
        match (self.j, self.k) {
            (false, false) => JkAction::Hold,
            (false, true) => JkAction::Reset,
            (true, false) => JkAction::Set,
            (true, true) => JkAction::Toggle,
        }
    }
}

impl Default for JkInputs {
    fn default() -> Self {
        Self::TOGGLE
    }
}

/// Behaviour selected by a J/K combination.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JkAction {
    Hold,
    Reset,
    Set,
    Toggle,
}

/// Next output of a JK flip-flop on its active clock edge.
///
/// | J | K | next Q |
/// |---|---|--------|
/// | 0 | 0 | Q (hold) |
/// | 0 | 1 | 0 (reset) |
/// | 1 | 0 | 1 (set) |
/// | 1 | 1 | !Q (toggle) |
///
/// # Example
///
/// ```rust
/// use ripple::core::{next_of, JkInputs};
///
/// assert!(!next_of(true, JkInputs::new(false, true)));
/// assert!(next_of(false, JkInputs::new(true, false)));
/// ```
pub fn next_of(current: bool, inputs: JkInputs) -> bool {
    match inputs.action() {
        JkAction::Hold => current,
        JkAction::Reset => false,
        JkAction::Set => true,
        JkAction::Toggle => !current,
    }
}
