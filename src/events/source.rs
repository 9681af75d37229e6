//! Seeded, weighted event generator.
//!
//! `EventSource` is an endless iterator. Each draw first picks a kind from
//! the weight table, then fills in that kind's payload from the same RNG, so
//! a given seed always replays the same stream.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};

use super::{Event, EventKind};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 917;

/// Relative draw weights per event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub mouse: u32,
    pub keypress: u32,
    pub timer: u32,
    pub terminate: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            mouse: 7,
            keypress: 11,
            timer: 5,
            terminate: 1,
        }
    }
}

impl Weights {
    fn table(&self) -> [(EventKind, u32); 4] {
        [
            (EventKind::Mouse, self.mouse),
            (EventKind::KeyPress, self.keypress),
            (EventKind::Timer, self.timer),
            (EventKind::Terminate, self.terminate),
        ]
    }

    pub fn total(&self) -> u64 {
        self.table().iter().map(|(_, w)| u64::from(*w)).sum()
    }

    /// Reject tables that cannot drive a finite run.
    ///
    /// Without a terminate weight the stream never ends, which is only
    /// acceptable when the caller caps the run with a limit.
    pub fn validate(&self, limit: Option<usize>) -> Result<()> {
        if self.total() == 0 {
            return Err(ChainError::InvalidWeights("all weights are zero".to_string()));
        }
        if self.terminate == 0 && limit.is_none() {
            return Err(ChainError::InvalidWeights(
                "terminate weight is zero and no limit is set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Endless stream of pseudo-random events.
pub struct EventSource {
    rng: StdRng,
    kinds: [EventKind; 4],
    picker: WeightedIndex<u32>,
}

impl EventSource {
    pub fn new(seed: u64, weights: Weights) -> Result<Self> {
        let table = weights.table();
        let picker = WeightedIndex::new(table.iter().map(|(_, w)| *w))
            .map_err(|e| ChainError::InvalidWeights(e.to_string()))?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            kinds: table.map(|(kind, _)| kind),
            picker,
        })
    }

    /// Source with the default weight table.
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Result<Self> {
        Self::new(seed, Weights::default())
    }

    /// Events up to the next `TERMINATE`.
    ///
    /// The sentinel itself is pulled from the stream but never yielded, so
    /// a later call picks up right after it.
    pub fn until_terminate(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.by_ref().take_while(|event| !event.is_terminate())
    }

    fn draw(&mut self, kind: EventKind) -> Event {
        match kind {
            EventKind::Mouse => Event::Mouse {
                button: self.rng.gen_range(1..=3),
                x: self.rng.gen_range(0..=640),
                y: self.rng.gen_range(0..=480),
            },
            EventKind::KeyPress => Event::KeyPress {
                ctrl: self.rng.gen_range(1..=7) == 1,
                shift: self.rng.gen_range(1..=5) == 1,
                key: char::from(b'a' + self.rng.gen_range(0..26u8)),
            },
            EventKind::Timer => Event::timer(),
            EventKind::Terminate => Event::Terminate,
        }
    }
}

impl Iterator for EventSource {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        let kind = self.kinds[self.picker.sample(&mut self.rng)];
        Some(self.draw(kind))
    }
}
