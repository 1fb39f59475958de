//! Checkpoint and resume for simulator sessions.
//!
//! A checkpoint captures everything needed to continue a session later:
//! settings, counter state, clock count, and the full timing trace. The
//! transient highlight is deliberately left out.

use crate::config::Settings;
use crate::core::{CounterMode, CounterState, TimingTrace, TraceTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Bookkeeping tracked across the lifetime of a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// Last pulse or control change
    pub updated_at: DateTime<Utc>,

    /// Pulses applied over the whole session, across resets
    pub total_pulses: u64,

    /// Number of resets, including those caused by mode changes
    pub resets: u64,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            total_pulses: 0,
            resets: 0,
        }
    }
}

impl SessionMetadata {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn record_pulse(&mut self) {
        self.total_pulses += 1;
        self.touch();
    }

    pub fn record_reset(&mut self) {
        self.resets += 1;
        self.touch();
    }
}

/// Serializable checkpoint of a simulator session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub settings: Settings,

    pub state: CounterState,

    /// Pulses since the last reset
    pub clock_count: u64,

    pub trace: TimingTrace,

    pub metadata: SessionMetadata,
}

impl Checkpoint {
    pub fn new(
        settings: Settings,
        state: CounterState,
        clock_count: u64,
        trace: TimingTrace,
        metadata: SessionMetadata,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            settings,
            state,
            clock_count,
            trace,
            metadata,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check that the checkpoint describes a session the engine could have
    /// produced.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Validation::Failure(violations) = self.settings.validate() {
            let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(CheckpointError::ValidationFailed(messages.join("; ")));
        }

        self.validate_trace()
            .map_err(CheckpointError::ValidationFailed)?;

        if self.trace.last().map(|sample| sample.q) != Some(self.state.levels()) {
            return Err(CheckpointError::ValidationFailed(
                "last trace sample disagrees with the counter state".to_string(),
            ));
        }

        if self.settings.mode == CounterMode::Mod10Up
            && self.state.value() >= CounterMode::Mod10Up.modulus()
        {
            return Err(CheckpointError::StateOutsideDecade {
                value: self.state.value(),
            });
        }

        Ok(())
    }

    /// Check the trace is exactly what `clock_count` recorded pulses emit:
    /// the seed, then per pulse `n` a clock-low sample at `n - 0.5` holding
    /// the previous outputs and a clock-high sample at `n`.
    fn validate_trace(&self) -> Result<(), String> {
        let samples = self.trace.samples();
        let Some((first, pulses)) = samples.split_first() else {
            return Err("trace is empty".to_string());
        };
        if *first != TimingTrace::seed_sample() {
            return Err("trace does not start from the seed sample".to_string());
        }

        let expected_len = self.clock_count.checked_mul(2);
        if expected_len != Some(pulses.len() as u64) {
            return Err(format!(
                "trace holds {} samples but clock count {} needs {}",
                samples.len(),
                self.clock_count,
                self.clock_count.saturating_mul(2).saturating_add(1)
            ));
        }

        let mut settled_q = first.q;
        for (n, pair) in (1u64..).zip(pulses.chunks_exact(2)) {
            let (falling, settled) = (&pair[0], &pair[1]);
            let settle_time = TraceTime::from_pulse(n).map_err(|e| e.to_string())?;

            if falling.time != settle_time.half_step_before() || falling.clock_level != 0 {
                return Err(format!(
                    "pulse {n}: expected clock low at {}",
                    settle_time.half_step_before()
                ));
            }
            if settled.time != settle_time || settled.clock_level != 1 {
                return Err(format!("pulse {n}: expected clock high at {settle_time}"));
            }
            if pair.iter().flat_map(|sample| sample.q).any(|level| level > 1) {
                return Err(format!("pulse {n}: output level outside 0/1"));
            }
            if falling.q != settled_q {
                return Err(format!("pulse {n}: outputs changed before the clock edge"));
            }
            settled_q = settled.q;
        }

        Ok(())
    }
}
