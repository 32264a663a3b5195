use std::future::Future;

use tokio::io::{
    split, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
    ReadHalf, WriteHalf,
};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::common::SessionError;
use crate::config::MAX_LINE_LEN;
use crate::transport::LineChannel;

/// Line channel over any async byte stream.
pub struct StreamLineChannel<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    timeout_duration: Option<Duration>,
    max_line_len: usize,
    closed: bool,
}

/// Line channel over a TCP connection.
pub type TcpLineChannel = StreamLineChannel<TcpStream>;

impl<S: AsyncRead + AsyncWrite> StreamLineChannel<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, None, MAX_LINE_LEN)
    }

    pub fn with_timeout(stream: S, timeout_duration: Duration) -> Self {
        Self::with_config(stream, Some(timeout_duration), MAX_LINE_LEN)
    }

    pub fn with_config(stream: S, timeout_duration: Option<Duration>, max_line_len: usize) -> Self {
        let (read_half, write_half) = split(stream);
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            timeout_duration,
            max_line_len,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            Err(SessionError::Connection("channel is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

impl StreamLineChannel<TcpStream> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, SessionError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| SessionError::connection("connect", e))?;
        Ok(Self::new(stream))
    }
}

async fn bounded<T, F>(limit: Option<Duration>, op: &str, fut: F) -> Result<T, SessionError>
where
    F: Future<Output = Result<T, SessionError>>,
{
    match limit {
        Some(limit) => timeout(limit, fut).await.map_err(|_| {
            SessionError::Connection(format!("{} timeout after {:?}", op, limit))
        })?,
        None => fut.await,
    }
}

#[async_trait::async_trait]
impl<S> LineChannel for StreamLineChannel<S>
where
    S: AsyncRead + AsyncWrite + Send,
{
    async fn read_line(&mut self) -> Result<String, SessionError> {
        self.ensure_open()?;
        let max_line_len = self.max_line_len;
        // Room for the line plus "\r\n".
        let limit = max_line_len as u64 + 2;
        let reader = &mut self.reader;

        let read_op = async move {
            let mut buf = Vec::new();
            let n = reader
                .take(limit)
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| SessionError::connection("read", e))?;
            if n == 0 {
                return Err(SessionError::Connection(
                    "read: connection closed by peer".to_string(),
                ));
            }
            if buf.last() != Some(&b'\n') {
                return Err(if n as u64 >= limit {
                    SessionError::Connection(format!(
                        "read: line exceeds {} bytes",
                        max_line_len
                    ))
                } else {
                    SessionError::Connection(
                        "read: connection closed in the middle of a line".to_string(),
                    )
                });
            }
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
            if buf.len() > max_line_len {
                return Err(SessionError::Connection(format!(
                    "read: line exceeds {} bytes",
                    max_line_len
                )));
            }
            String::from_utf8(buf)
                .map_err(|_| SessionError::Connection("read: line is not valid UTF-8".to_string()))
        };

        bounded(self.timeout_duration, "read", read_op).await
    }

    async fn write_line(&mut self, line: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        let writer = &mut self.writer;

        let write_op = async move {
            writer
                .write_all(&data)
                .await
                .map_err(|e| SessionError::connection("write", e))?;
            writer
                .flush()
                .await
                .map_err(|e| SessionError::connection("write", e))
        };

        bounded(self.timeout_duration, "write", write_op).await
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.writer.shutdown().await {
            log::debug!("shutdown after close failed: {}", e);
        }
    }
}
