//! Simulator session driving the pure engine.

use crate::checkpoint::{Checkpoint, CheckpointError, SessionMetadata, CHECKPOINT_VERSION};
use crate::config::Settings;
use crate::core::{
    pulse, reset, CounterMode, CounterState, Direction, EngineError, JkInputs, PulseConfig,
    PulseResult, Stage, TimingTrace,
};
use crate::shell::highlight::{ClearTicket, Highlight};
use crate::validation::InputViolation;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Outcome of a pulse as seen by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseReport {
    pub result: PulseResult,
    /// Ticket to clear the highlight of `result.toggled` once its delay elapses.
    pub ticket: ClearTicket,
}

/// Interactive counter session.
///
/// Holds the state the control panel mutates and replaces it wholesale on
/// every pulse; the computation itself is delegated to the pure core.
///
/// # Example
///
/// ```rust
/// use ripple::shell::Simulator;
/// use ripple::core::CounterMode;
///
/// let mut sim = Simulator::default();
/// sim.set_mode(CounterMode::Mod10Up);
///
/// for _ in 0..12 {
///     sim.clock_pulse().unwrap();
/// }
///
/// assert_eq!(sim.decimal_value(), 2);
/// assert_eq!(sim.trace().len(), 1 + 2 * 12);
/// ```
#[derive(Clone, Debug)]
pub struct Simulator {
    settings: Settings,
    state: CounterState,
    clock_count: u64,
    trace: TimingTrace,
    highlight: Highlight,
    metadata: SessionMetadata,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Simulator {
    /// Create a session in the cleared state.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: reset(),
            clock_count: 0,
            trace: TimingTrace::seed(),
            highlight: Highlight::new(),
            metadata: SessionMetadata::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Pulses applied since the last reset.
    pub fn clock_count(&self) -> u64 {
        self.clock_count
    }

    pub fn trace(&self) -> &TimingTrace {
        &self.trace
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Stages still highlighted from the last pulse.
    pub fn highlighted(&self) -> &BTreeSet<Stage> {
        self.highlight.stages()
    }

    pub fn decimal_value(&self) -> u8 {
        self.state.value()
    }

    pub fn pulse_config(&self) -> PulseConfig {
        self.settings.pulse_config()
    }

    /// Apply one clock pulse.
    pub fn clock_pulse(&mut self) -> Result<PulseReport, EngineError> {
        let result = pulse(&self.state, &self.pulse_config());
        let pulse_time = self.clock_count + 1;

        self.trace = self
            .trace
            .record(&self.state, &result.next_state, pulse_time)?;
        self.state = result.next_state;
        self.clock_count = pulse_time;
        self.metadata.record_pulse();

        let ticket = self
            .highlight
            .show(result.toggled.clone(), self.settings.highlight_delay());

        debug!(
            clock = pulse_time,
            value = self.state.value(),
            samples = self.trace.len(),
            "pulse recorded"
        );

        Ok(PulseReport { result, ticket })
    }

    /// Clear the counter, the clock count, and the trace.
    pub fn reset(&mut self) {
        self.state = reset();
        self.clock_count = 0;
        self.trace = TimingTrace::seed();
        self.metadata.record_reset();
        info!(mode = %self.settings.mode, "counter reset");
    }

    /// Switch counting mode. Always resets the counter.
    pub fn set_mode(&mut self, mode: CounterMode) {
        info!(from = %self.settings.mode, to = %mode, "counting mode changed");
        self.settings.mode = mode;
        self.reset();
    }

    /// Change the up/down flag; the count is kept.
    pub fn set_direction(&mut self, direction: Direction) {
        self.settings.direction = direction;
        self.metadata.touch();
    }

    /// Enable or disable lab mode. Leaving lab mode restores J=K=1.
    pub fn set_lab_mode(&mut self, enabled: bool) {
        self.settings.lab_mode = enabled;
        if !enabled {
            self.settings.lab_inputs = JkInputs::TOGGLE;
        }
        self.metadata.touch();
        info!(enabled, "lab mode changed");
    }

    /// Override J/K of the LSB. Requires lab mode.
    pub fn set_lab_inputs(&mut self, inputs: JkInputs) -> Result<(), InputViolation> {
        if !self.settings.lab_mode {
            warn!(j = inputs.j, k = inputs.k, "J/K override rejected outside lab mode");
            return Err(InputViolation::LabModeDisabled);
        }
        self.settings.lab_inputs = inputs;
        self.metadata.touch();
        Ok(())
    }

    /// Clear the highlight if `ticket` belongs to the latest pulse.
    pub fn clear_highlight(&mut self, ticket: ClearTicket) -> bool {
        self.highlight.clear(ticket)
    }

    /// Capture a serializable checkpoint of this session.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            self.settings,
            self.state,
            self.clock_count,
            self.trace.clone(),
            self.metadata.clone(),
        )
    }

    /// Rebuild a session from a checkpoint after validating it.
    ///
    /// The highlight is not persisted, so a resumed session starts dark.
    pub fn resume(checkpoint: Checkpoint) -> Result<Self, CheckpointError> {
        if let Err(error) = checkpoint.validate() {
            warn!(id = %checkpoint.id, %error, "checkpoint rejected");
            return Err(error);
        }

        info!(
            id = %checkpoint.id,
            version = CHECKPOINT_VERSION,
            clock = checkpoint.clock_count,
            "resuming session"
        );

        Ok(Self {
            settings: checkpoint.settings,
            state: checkpoint.state,
            clock_count: checkpoint.clock_count,
            trace: checkpoint.trace,
            highlight: Highlight::new(),
            metadata: checkpoint.metadata,
        })
    }
}
