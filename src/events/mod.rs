//! Input events and the generator that produces them.
//!
//! - `event` - the `Event` value object, its kinds and timer ids
//! - `source` - the seeded, weighted `EventSource`

mod event;
mod source;

pub use event::{Event, EventKind};
pub use source::{DEFAULT_SEED, EventSource, Weights};
