//! Validation of untyped caller input.
//!
//! The core only accepts typed values. Callers that hold raw control-panel
//! input (a state vector of unknown length, mode and direction names)
//! validate it here first, using Stillwater's `Validation` type to report
//! every problem in one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use ripple::validation::{ControlRules, RawControls};
//! use stillwater::validation::Validation;
//!
//! let raw = RawControls {
//!     state: vec![false, true],
//!     mode: "MOD12_UP".to_string(),
//!     ..RawControls::default()
//! };
//!
//! match ControlRules::standard().check(&raw) {
//!     Validation::Failure(violations) => assert_eq!(violations.len(), 2),
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod controls;
pub mod rules;
pub mod violations;

pub use controls::{PulseRequest, RawControls};
pub use rules::{ControlCheck, ControlRules};
pub use violations::InputViolation;
