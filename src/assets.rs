//! Last-request-wins bookkeeping for assets that load asynchronously.
//!
//! Decoding a background image or a font file happens outside the layout
//! engine. Each load is requested up front, which hands out a [LoadTicket];
//! when the load finishes, its ticket is checked against the gate and only the
//! most recent request is allowed to apply its result. Anything older is stale
//! and dropped, no matter in which order completions arrive.

use tracing::debug;

/// Proof of a load request, to be handed back on completion
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// What happened to a completed load
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The asset is now in use
    Applied,
    /// The load failed; the default is in use instead
    FellBack,
    /// A newer request superseded this one; its result was discarded
    Stale,
}

#[derive(Debug, Default)]
pub struct LoadGate {
    latest: u64,
}

impl LoadGate {
    pub fn new() -> LoadGate {
        LoadGate::default()
    }

    /// Start a new load, superseding any load still in flight
    pub fn request(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            generation: self.latest,
        }
    }

    /// Invalidate every outstanding ticket without starting a new load
    pub fn supersede(&mut self) {
        self.latest += 1;
    }

    /// Whether a completion carrying this ticket may still be applied
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        let current = ticket.generation == self.latest;
        if !current {
            debug!(
                ticket = ticket.generation,
                latest = self.latest,
                "discarding stale load"
            );
        }
        current
    }
}
