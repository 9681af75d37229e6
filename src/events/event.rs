//! The event value object and its kinds.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ChainError, Result};

/// Next timer id to hand out. Shared by every source in the process.
static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(0);

/// The four kinds an event can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Mouse,
    KeyPress,
    Timer,
    Terminate,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Mouse,
        EventKind::KeyPress,
        EventKind::Timer,
        EventKind::Terminate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Mouse => "MOUSE",
            EventKind::KeyPress => "KEYPRESS",
            EventKind::Timer => "TIMER",
            EventKind::Terminate => "TERMINATE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ChainError;

    /// Parse a kind name, ignoring case. `key` is accepted for `KEYPRESS`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("key") {
            return Ok(EventKind::KeyPress);
        }
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChainError::UnknownEventKind(s.to_string()))
    }
}

/// Identifier of a timer event.
///
/// Only `TimerId::next` creates one, so ids are unique and increase by one
/// per timer event built anywhere in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn next() -> Self {
        TimerId(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Mouse { button: u8, x: u16, y: u16 },
    KeyPress { ctrl: bool, shift: bool, key: char },
    Timer { id: TimerId },
    Terminate,
}

impl Event {
    /// Build a timer event, allocating the next timer id.
    pub fn timer() -> Self {
        Event::Timer { id: TimerId::next() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Mouse { .. } => EventKind::Mouse,
            Event::KeyPress { .. } => EventKind::KeyPress,
            Event::Timer { .. } => EventKind::Timer,
            Event::Terminate => EventKind::Terminate,
        }
    }

    pub fn is_terminate(&self) -> bool {
        matches!(self, Event::Terminate)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Mouse { button, x, y } => write!(f, "Button {} ({}, {})", button, x, y),
            Event::KeyPress { ctrl, shift, key } => write!(
                f,
                "Key {}{}{}",
                if *ctrl { "Ctrl+" } else { "" },
                if *shift { "Shift+" } else { "" },
                key
            ),
            Event::Timer { id } => write!(f, "Timer {}", id),
            Event::Terminate => f.write_str("Terminate"),
        }
    }
}
