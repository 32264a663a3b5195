use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::common::SessionError;
use crate::transport::LineChannel;

/// In-process line channel; each end reads what the other end writes.
pub struct InMemoryLineChannel {
    tx: Option<UnboundedSender<String>>,
    rx: UnboundedReceiver<String>,
    closed: bool,
}

impl InMemoryLineChannel {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (
            Self {
                tx: Some(tx1),
                rx: rx2,
                closed: false,
            },
            Self {
                tx: Some(tx2),
                rx: rx1,
                closed: false,
            },
        )
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait::async_trait]
impl LineChannel for InMemoryLineChannel {
    async fn read_line(&mut self) -> Result<String, SessionError> {
        if self.closed {
            return Err(SessionError::Connection("channel is closed".to_string()));
        }
        self.rx
            .recv()
            .await
            .ok_or_else(|| SessionError::Connection("read: connection closed by peer".to_string()))
    }

    async fn write_line(&mut self, line: &str) -> Result<(), SessionError> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| SessionError::Connection("channel is closed".to_string()))?;
        tx.send(line.to_string())
            .map_err(|_| SessionError::Connection("write: connection reset by peer".to_string()))
    }

    async fn close(&mut self) {
        self.closed = true;
        self.tx = None;
        self.rx.close();
    }
}
