//! Chain-of-Responsibility event handlers.
//!
//! A chain is built outside-in: the outermost handler sees an event first
//! and either consumes it or passes it to its successor. The first handler
//! whose kind matches wins, and nothing further down the chain sees that
//! event. A debug handler anywhere in the chain writes every event it
//! observes and always forwards.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::{ChainError, Result};
use crate::events::{Event, EventKind};
use crate::log;

/// What a single handler in the chain does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Consume events of one kind, forward the rest
    Consume(EventKind),
    /// Consume nothing, forward if there is a successor
    Null,
    /// Echo every event, then forward
    Debug,
}

impl Role {
    /// Consumer for `kind`. `TERMINATE` is a stream sentinel and never
    /// reaches a handler, so it cannot be consumed.
    pub fn consume(kind: EventKind) -> Result<Self> {
        match kind {
            EventKind::Terminate => Err(ChainError::UnknownHandler(kind.to_string())),
            _ => Ok(Role::Consume(kind)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Consume(EventKind::KeyPress) => f.write_str("keypress"),
            Role::Consume(kind) => f.write_str(&kind.as_str().to_ascii_lowercase()),
            Role::Null => f.write_str("null"),
            Role::Debug => f.write_str("debug"),
        }
    }
}

impl FromStr for Role {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("null") {
            return Ok(Role::Null);
        }
        if name.eq_ignore_ascii_case("debug") {
            return Ok(Role::Debug);
        }
        let kind = name
            .parse::<EventKind>()
            .map_err(|_| ChainError::UnknownHandler(s.to_string()))?;
        Role::consume(kind)
    }
}

/// Timer first, then keys, then mouse.
pub const CLASSIC: [Role; 3] = [
    Role::Consume(EventKind::Timer),
    Role::Consume(EventKind::KeyPress),
    Role::Consume(EventKind::Mouse),
];

/// Keys first, then mouse, then timer.
pub const PIPELINE: [Role; 3] = [
    Role::Consume(EventKind::KeyPress),
    Role::Consume(EventKind::Mouse),
    Role::Consume(EventKind::Timer),
];

/// Parse a chain description.
///
/// Accepts a preset name (`classic`, `pipeline`) or a comma-separated list
/// of roles, outermost first. Empty segments are skipped, so an empty
/// description yields an empty list.
pub fn parse_roles(description: &str) -> Result<Vec<Role>> {
    let trimmed = description.trim();
    if trimmed.eq_ignore_ascii_case("classic") {
        return Ok(CLASSIC.to_vec());
    }
    if trimmed.eq_ignore_ascii_case("pipeline") {
        return Ok(PIPELINE.to_vec());
    }
    trimmed
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler for this kind consumed the event
    Consumed(EventKind),
    /// The event fell off the end of the chain
    Discarded,
}

/// One node of a handler chain. Owns its successor.
#[derive(Debug)]
pub struct Handler {
    role: Role,
    successor: Option<Box<Handler>>,
}

impl Handler {
    fn link(role: Role, successor: Option<Handler>) -> Self {
        Self {
            role,
            successor: successor.map(Box::new),
        }
    }

    /// Terminal handler that drops everything.
    pub fn null() -> Self {
        Self::link(Role::Null, None)
    }

    #[cfg(test)]
    pub fn mouse(successor: Handler) -> Self {
        Self::link(Role::Consume(EventKind::Mouse), Some(successor))
    }

    #[cfg(test)]
    pub fn key(successor: Handler) -> Self {
        Self::link(Role::Consume(EventKind::KeyPress), Some(successor))
    }

    #[cfg(test)]
    pub fn timer(successor: Handler) -> Self {
        Self::link(Role::Consume(EventKind::Timer), Some(successor))
    }

    pub fn debug(successor: Handler) -> Self {
        Self::link(Role::Debug, Some(successor))
    }

    /// Put a debug handler in front of this chain.
    pub fn wrap_debug(self) -> Self {
        Self::debug(self)
    }

    /// Build a chain from roles listed outermost first, ending in a null
    /// handler. A trailing `null` in `roles` is not doubled.
    pub fn from_roles(roles: &[Role]) -> Self {
        let inner = match roles.split_last() {
            Some((Role::Null, rest)) => rest,
            _ => roles,
        };
        inner
            .iter()
            .rev()
            .fold(Handler::null(), |chain, role| Self::link(*role, Some(chain)))
    }

    /// Roles of every handler in the chain, outermost first.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::new();
        let mut node = Some(self);
        while let Some(handler) = node {
            roles.push(handler.role);
            node = handler.successor.as_deref();
        }
        roles
    }

    /// Pass `event` down the chain, writing the consuming handler's line
    /// (and any debug lines) to `out`.
    pub fn handle<W: Write + ?Sized>(&self, event: &Event, out: &mut W) -> io::Result<Dispatch> {
        let kind = event.kind();
        let mut node = Some(self);

        while let Some(handler) = node {
            match handler.role {
                Role::Consume(wanted) if wanted == kind => {
                    writeln!(out, "{}{}", prefix(kind), event)?;
                    return Ok(Dispatch::Consumed(kind));
                }
                Role::Debug => {
                    writeln!(out, "*DEBUG*: {}", event)?;
                    log::log_debug(event);
                }
                Role::Consume(_) | Role::Null => {}
            }
            node = handler.successor.as_deref();
        }

        Ok(Dispatch::Discarded)
    }
}

fn prefix(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Mouse => "Click:   ",
        EventKind::KeyPress => "Press:   ",
        EventKind::Timer => "Timeout: ",
        EventKind::Terminate => "",
    }
}
