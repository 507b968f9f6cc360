//! List-View Synchronization
//!
//! Per-screen state for every data-listing screen: the fetched collection,
//! the filter specification, the derived visible subset, and the request
//! sequencer that decides whether an arriving response may be applied.

mod list;
mod sequence;

pub use list::{CommitOutcome, DisplayState, ListView};
pub use sequence::{RequestSequencer, Ticket};
