//! Plain data row types written by output backends.

use std::fmt;

use mf_core::{CountryCode, SimTime};

/// Which lifecycle hook produced an [`EventRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Started,
    Updated,
    Finished,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Started  => "started",
            EventKind::Updated  => "updated",
            EventKind::Finished => "finished",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity transition with the entity's position at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub time:        SimTime,
    pub event:       EventKind,
    pub origin:      CountryCode,
    pub destination: CountryCode,
    pub lat:         f64,
    pub lon:         f64,
}

/// Counts for one frame.  `active` is the size of the active set after the
/// frame, which equals `updated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummaryRow {
    pub time:     SimTime,
    pub started:  usize,
    pub updated:  usize,
    pub finished: usize,
    pub active:   usize,
}
