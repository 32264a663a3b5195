//! Control codes and status messages of the line protocol.
//!
//! Every peer line starts with a two-character control code built from the
//! two player markers. A doubled marker means the client must move, a mixed
//! pair means the peer is moving. Anything else is passed through.

use crate::common::SessionError;
use crate::config::GOODBYE;

/// The two player markers that make up control codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub own: char,
    pub other: char,
}

impl Markers {
    pub fn new(own: char, other: char) -> Self {
        Self { own, other }
    }

    fn is_marker(&self, ch: char) -> bool {
        ch == self.own || ch == self.other
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self { own: 'X', other: 'O' }
    }
}

/// Classification of a control code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// This client must choose a move.
    SelfTurn,
    /// The peer is choosing; keep listening.
    PeerTurn,
    /// Any other prefix.
    Other,
}

impl ControlCode {
    /// Classify a two-character code. Matching is case-sensitive.
    pub fn classify(code: [char; 2], markers: &Markers) -> Self {
        let [a, b] = code;
        if !markers.is_marker(a) || !markers.is_marker(b) {
            ControlCode::Other
        } else if a == b {
            ControlCode::SelfTurn
        } else {
            ControlCode::PeerTurn
        }
    }
}

/// One line received from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    raw: String,
    code: [char; 2],
}

impl StatusMessage {
    /// Split off the control code. Lines shorter than two characters are rejected.
    pub fn parse(line: String) -> Result<Self, SessionError> {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(a), Some(b)) => Ok(Self { raw: line, code: [a, b] }),
            _ => Err(SessionError::MalformedMessage { line }),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn code(&self) -> [char; 2] {
        self.code
    }

    /// Everything after the control code; opaque game state for the display.
    pub fn payload(&self) -> &str {
        let offset = self.code[0].len_utf8() + self.code[1].len_utf8();
        &self.raw[offset..]
    }

    pub fn classify(&self, markers: &Markers) -> ControlCode {
        ControlCode::classify(self.code, markers)
    }
}

/// Whether a move string ends the session.
pub fn is_goodbye(mv: &str) -> bool {
    mv.to_lowercase() == GOODBYE
}
