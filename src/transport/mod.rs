use crate::common::SessionError;

/// Line-framed, bidirectional byte stream. No protocol knowledge.
#[async_trait::async_trait]
pub trait LineChannel: Send {
    /// Wait for the next newline-terminated line and return it without the terminator.
    async fn read_line(&mut self) -> Result<String, SessionError>;
    /// Write `line` followed by a newline as one write.
    async fn write_line(&mut self, line: &str) -> Result<(), SessionError>;
    /// Release the stream. Calling it again does nothing.
    async fn close(&mut self);
}

pub mod in_memory;
pub mod tcp;
