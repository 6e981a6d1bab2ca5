//! Load supersession.
//!
//! Every load request takes a ticket from a monotonically increasing
//! generation counter. Only the completion carrying the newest ticket is
//! accepted, and only once; anything older lost the race to a later request.

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Generation counter for character loads.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    generation: u64,
    pending: Option<u64>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding any still in flight.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        LoadTicket(self.generation)
    }

    /// Whether `ticket` is the newest request and has not completed yet.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.pending == Some(ticket.0)
    }

    /// Consume the completion for `ticket`. Returns `false` for stale or
    /// already-consumed tickets.
    pub fn complete(&mut self, ticket: LoadTicket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }
}
