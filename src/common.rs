//! Common types for the client: the session error taxonomy.

use std::io;

/// Errors that abort a client session. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The stream was closed, reset, or otherwise failed during read or write.
    Connection(String),
    /// A peer line too short to carry a two-character control code.
    MalformedMessage { line: String },
    /// A blocked `take` on the move hand-off was interrupted before a move arrived.
    InterruptedWait,
}

impl SessionError {
    pub(crate) fn connection(context: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => {
                SessionError::Connection(format!("{}: connection closed by peer", context))
            }
            io::ErrorKind::ConnectionReset | io::ErrorKind::BrokenPipe => {
                SessionError::Connection(format!("{}: connection reset by peer", context))
            }
            _ => SessionError::Connection(format!("{}: {}", context, err)),
        }
    }

    /// Whether the error came from the underlying stream.
    pub fn is_connection(&self) -> bool {
        matches!(self, SessionError::Connection(_))
    }
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Connection(detail) => write!(f, "Connection error: {}", detail),
            SessionError::MalformedMessage { line } => write!(
                f,
                "Malformed message: expected a two-character control code, got {:?}",
                line
            ),
            SessionError::InterruptedWait => {
                write!(f, "Interrupted while waiting for the player's move")
            }
        }
    }
}

impl std::error::Error for SessionError {}
