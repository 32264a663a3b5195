use std::time::Duration;

use crate::protocol::Markers;

/// Address dialled when none is given.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Longest line accepted from the peer (64 KiB), to bound allocation.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Move string that ends the session, compared case-insensitively.
pub const GOODBYE: &str = "goodbye";

/// Settings for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub addr: String,
    pub markers: Markers,
    /// Per-operation I/O timeout. `None` waits forever on a stalled peer.
    pub io_timeout: Option<Duration>,
    pub max_line_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            markers: Markers::default(),
            io_timeout: None,
            max_line_len: MAX_LINE_LEN,
        }
    }
}
