//! Driver loop: draw events, dispatch them, count what happened.

use std::io::{self, Write};

use serde::Serialize;

use crate::events::{EventKind, EventSource};
use crate::handlers::{Dispatch, Handler};
use crate::log;

/// Counts of dispatch outcomes for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub mouse: usize,
    pub keypress: usize,
    pub timer: usize,
    pub discarded: usize,
}

impl Tally {
    pub fn record(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Consumed(EventKind::Mouse) => self.mouse += 1,
            Dispatch::Consumed(EventKind::KeyPress) => self.keypress += 1,
            Dispatch::Consumed(EventKind::Timer) => self.timer += 1,
            Dispatch::Consumed(EventKind::Terminate) | Dispatch::Discarded => self.discarded += 1,
        }
    }

    pub fn consumed(&self) -> usize {
        self.mouse + self.keypress + self.timer
    }

    pub fn total(&self) -> usize {
        self.consumed() + self.discarded
    }
}

/// Outcome of one titled run.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub title: String,
    pub tally: Tally,
}

/// Everything a session of runs produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub seed: u64,
    pub chains: Vec<ChainReport>,
}

/// Run `chain` over `source` until the next `TERMINATE`.
///
/// Writes `title` on its own line first. The sentinel is never dispatched.
/// With a `limit`, at most that many events are dispatched and the stream is
/// left right after the last one.
pub fn run_chain<W: Write + ?Sized>(
    title: &str,
    chain: &Handler,
    source: &mut EventSource,
    limit: Option<usize>,
    out: &mut W,
) -> io::Result<ChainReport> {
    writeln!(out, "{}", title)?;
    let layout: Vec<String> = chain.roles().iter().map(ToString::to_string).collect();
    log::log(&format!("--- {} [{}] ---", title, layout.join(" -> ")));

    let mut tally = Tally::default();
    let events = source.until_terminate().take(limit.unwrap_or(usize::MAX));
    for event in events {
        let dispatch = chain.handle(&event, out)?;
        log::log_dispatch(&event, dispatch);
        tally.record(dispatch);
    }

    log::log(&format!(
        "{}: {} events ({} consumed, {} discarded)",
        title,
        tally.total(),
        tally.consumed(),
        tally.discarded
    ));

    Ok(ChainReport {
        title: title.to_string(),
        tally,
    })
}

/// Title of the plain run.
pub const PLAIN_TITLE: &str = "Handler Chain #1";

/// Title of the debug-wrapped run.
pub const DEBUG_TITLE: &str = "Handler Chain #2 (debugging)";

/// The two-run demo over one shared stream.
///
/// Runs `chain` as is, then (if `debug_run`) a blank line and the same chain
/// wrapped in a debug handler. The second run continues where the first
/// stopped.
pub fn run_demo<W: Write + ?Sized>(
    chain: Handler,
    source: &mut EventSource,
    seed: u64,
    limit: Option<usize>,
    debug_run: bool,
    out: &mut W,
) -> io::Result<Report> {
    let mut report = Report { seed, chains: Vec::new() };

    report.chains.push(run_chain(PLAIN_TITLE, &chain, source, limit, out)?);

    if debug_run {
        writeln!(out)?;
        let chain = chain.wrap_debug();
        report.chains.push(run_chain(DEBUG_TITLE, &chain, source, limit, out)?);
    }

    Ok(report)
}
