//! Seams between the protocol loop and the presentation layer.

use std::io::{self, BufRead, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use crate::handoff::MoveHandoff;

/// Renders game state received from the peer.
///
/// Called once per received message, in receipt order, never concurrently.
pub trait DisplaySink: Send {
    fn present(&mut self, message: &str);
}

/// Supplies moves to the session whenever the player makes one.
pub trait MoveSource {
    fn submit(&self, mv: String);
}

impl MoveSource for MoveHandoff<String> {
    fn submit(&self, mv: String) {
        match self.deposit(mv) {
            Ok(None) => {}
            Ok(Some(replaced)) => log::warn!("Move {:?} replaced before it was sent", replaced),
            Err(mv) => log::warn!("Move {:?} dropped: the session no longer accepts moves", mv),
        }
    }
}

/// [`DisplaySink`] that writes `SERVER: <message>` lines, to stdout by default.
pub struct ConsoleDisplay<W = Stdout> {
    out: W,
}

impl ConsoleDisplay<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleDisplay<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> DisplaySink for ConsoleDisplay<W> {
    fn present(&mut self, message: &str) {
        let written = writeln!(self.out, "SERVER: {}", message).and_then(|()| self.out.flush());
        if let Err(e) = written {
            log::warn!("Failed to display server message: {}", e);
        }
    }
}

/// [`DisplaySink`] that keeps every message. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages presented so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DisplaySink for RecordingDisplay {
    fn present(&mut self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Feed every line read from `input` to `moves`, on a dedicated thread.
///
/// Lines are queued one at a time: the thread waits until the session has
/// taken the previous move, so typed-ahead or piped moves are sent in order.
/// Blank lines are skipped. When `input` ends or fails, the hand-off is
/// interrupted so a session waiting for a move gives up instead of hanging.
pub fn spawn_line_moves<R>(input: R, moves: MoveHandoff<String>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    let mv = line.trim();
                    if mv.is_empty() {
                        continue;
                    }
                    if let Err(mv) = moves.deposit_wait(mv.to_string()) {
                        log::warn!("Move {:?} dropped: the session no longer accepts moves", mv);
                        return;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read move input: {}", e);
                    break;
                }
            }
        }
        moves.interrupt();
    })
}
