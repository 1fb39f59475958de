//! Transient highlight of the stages that toggled on the last pulse.
//!
//! Clearing is deferred by the caller: `show` hands out a ticket carrying
//! the delay, and the caller schedules `clear` on whatever runtime drives
//! the presentation. A later `show` supersedes every earlier ticket, so a
//! stale clear never erases a fresh highlight.

use crate::core::Stage;
use std::collections::BTreeSet;
use std::time::Duration;

/// Permission to clear one specific highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearTicket {
    generation: u64,
    delay: Duration,
}

impl ClearTicket {
    /// How long to wait before presenting the ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Currently highlighted stages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    stages: BTreeSet<Stage>,
    generation: u64,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `stages`, superseding any pending clear.
    pub fn show(&mut self, stages: BTreeSet<Stage>, delay: Duration) -> ClearTicket {
        self.generation += 1;
        self.stages = stages;
        ClearTicket {
            generation: self.generation,
            delay,
        }
    }

    /// Clear the highlight if `ticket` is still current.
    ///
    /// Returns `false` for a superseded ticket, leaving the highlight as is.
    pub fn clear(&mut self, ticket: ClearTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.stages.clear();
        true
    }

    pub fn is_current(&self, ticket: &ClearTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn stages(&self) -> &BTreeSet<Stage> {
        &self.stages
    }

    pub fn is_lit(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }
}
