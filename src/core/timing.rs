//! Timing diagram trace.
//!
//! The trace is an append-only, time-ordered list of samples. Each pulse
//! contributes two samples: the instant the driving clock falls (outputs
//! still at their old levels) and the settled state after the ripple.

use super::error::EngineError;
use super::state::{CounterState, Stage, STAGE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trace time in half clock periods.
///
/// Pulse `n` settles at time `n` and its falling edge sits at `n - 0.5`,
/// so every recorded time is a multiple of one half.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceTime(u64);

impl TraceTime {
    pub const ZERO: TraceTime = TraceTime(0);

    /// Highest pulse number whose settle time is representable.
    pub const MAX_PULSE: u64 = u64::MAX / 2;

    /// Time at which pulse number `pulse` has settled.
    pub fn from_pulse(pulse: u64) -> Result<Self, EngineError> {
        pulse
            .checked_mul(2)
            .map(Self)
            .ok_or(EngineError::PulseOutOfRange(pulse))
    }

    pub fn from_half_steps(half_steps: u64) -> Self {
        Self(half_steps)
    }

    pub fn half_steps(&self) -> u64 {
        self.0
    }

    /// Half a clock period earlier, saturating at zero.
    pub fn half_step_before(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Whole clock periods elapsed, rounding half steps down.
    pub fn whole_pulses(&self) -> u64 {
        self.0 / 2
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl fmt::Display for TraceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// One point of the timing diagram.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimingSample {
    pub time: TraceTime,
    /// Level of the external clock (0 or 1).
    pub clock_level: u8,
    /// Stage outputs as 0/1 levels, most significant first.
    pub q: [u8; STAGE_COUNT],
}

impl TimingSample {
    pub fn new(time: TraceTime, clock_level: bool, state: &CounterState) -> Self {
        Self {
            time,
            clock_level: u8::from(clock_level),
            q: state.levels(),
        }
    }

    /// Level of one waveform at this sample.
    pub fn level(&self, signal: Signal) -> u8 {
        match signal {
            Signal::Clock => self.clock_level,
            Signal::Q(stage) => self.q[stage.index()],
        }
    }
}

/// A waveform of the timing diagram.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Signal {
    Clock,
    Q(Stage),
}

impl Signal {
    /// Waveforms in the order they are stacked on the diagram, bottom up.
    pub const ALL: [Signal; 5] = [
        Signal::Clock,
        Signal::Q(Stage::A),
        Signal::Q(Stage::B),
        Signal::Q(Stage::C),
        Signal::Q(Stage::D),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clock => "CLK",
            Self::Q(stage) => stage.signal_name(),
        }
    }
}

/// Ordered, append-only timing trace.
///
/// Recording is pure: `record` returns a new trace and leaves the original
/// untouched.
///
/// # Example
///
/// ```rust
/// use ripple::core::{CounterState, TimingTrace};
///
/// let trace = TimingTrace::seed();
/// assert_eq!(trace.len(), 1);
///
/// let next = CounterState::from_value(1).unwrap();
/// let trace = trace
///     .record(&CounterState::ZERO, &next, trace.next_pulse_time())
///     .unwrap();
///
/// assert_eq!(trace.len(), 3);
/// assert_eq!(trace.samples()[1].time.to_string(), "0.5");
/// assert_eq!(trace.samples()[2].q, [0, 0, 0, 1]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimingTrace {
    samples: Vec<TimingSample>,
}

impl Default for TimingTrace {
    fn default() -> Self {
        Self::seed()
    }
}

impl TimingTrace {
    /// Fresh trace holding the single seed sample: time 0, clock high,
    /// every output low.
    pub fn seed() -> Self {
        Self {
            samples: vec![Self::seed_sample()],
        }
    }

    /// The sample every run starts from.
    pub fn seed_sample() -> TimingSample {
        TimingSample::new(TraceTime::ZERO, true, &CounterState::ZERO)
    }

    /// Append the two samples of pulse `pulse_time`, returning a new trace.
    ///
    /// The half-step sample carries `previous` with the clock low; the
    /// full-step sample carries `next` with the clock high. Fails if the
    /// half-step time does not come after the last recorded sample, or if
    /// `pulse_time` exceeds [`TraceTime::MAX_PULSE`].
    pub fn record(
        &self,
        previous: &CounterState,
        next: &CounterState,
        pulse_time: u64,
    ) -> Result<Self, EngineError> {
        let settled = TraceTime::from_pulse(pulse_time)?;
        let falling = settled.half_step_before();

        if let Some(last) = self.last_time() {
            if pulse_time == 0 || falling <= last {
                return Err(EngineError::TimeNotAdvancing {
                    last,
                    found: falling,
                });
            }
        }

        let mut samples = self.samples.clone();
        samples.push(TimingSample::new(falling, false, previous));
        samples.push(TimingSample::new(settled, true, next));
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[TimingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&TimingSample> {
        self.samples.last()
    }

    /// Highest recorded time.
    pub fn last_time(&self) -> Option<TraceTime> {
        self.samples.last().map(|sample| sample.time)
    }

    /// Pulse number the next `record` call should use.
    pub fn next_pulse_time(&self) -> u64 {
        self.last_time()
            .map(|time| time.whole_pulses() + 1)
            .unwrap_or(1)
    }

    /// One waveform as `(time, level)` points, ready for a step chart.
    pub fn column(&self, signal: Signal) -> Vec<(TraceTime, u8)> {
        self.samples
            .iter()
            .map(|sample| (sample.time, sample.level(signal)))
            .collect()
    }

    /// Whether sample times strictly increase.
    pub fn is_ordered(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].time < pair[1].time)
    }
}
