use crate::{
    common::SessionError,
    config::ClientConfig,
    handoff::MoveHandoff,
    protocol::{is_goodbye, ControlCode, Markers, StatusMessage},
    transport::{tcp::TcpLineChannel, LineChannel},
    ui::DisplaySink,
};

/// Counters describing a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub messages_received: usize,
    pub moves_sent: usize,
    /// Classification of the last message the loop acted on.
    pub last_code: Option<ControlCode>,
    pub last_move: Option<String>,
}

/// Client side of the turn protocol: reads status lines, forwards them to the
/// display and answers with the player's move whenever it is our turn.
pub struct ClientSession<C: LineChannel, D: DisplaySink> {
    channel: C,
    display: D,
    moves: MoveHandoff<String>,
    markers: Markers,
    report: SessionReport,
}

impl<D: DisplaySink> ClientSession<TcpLineChannel, D> {
    /// Dial `config.addr` and build a session over the new connection.
    pub async fn connect(
        config: &ClientConfig,
        display: D,
        moves: MoveHandoff<String>,
    ) -> Result<Self, SessionError> {
        let stream = tokio::net::TcpStream::connect(config.addr.as_str())
            .await
            .map_err(|e| SessionError::connection("connect", e))?;
        let channel = TcpLineChannel::with_config(stream, config.io_timeout, config.max_line_len);
        log::info!("CLIENT: connected to {}", config.addr);
        Ok(Self::new(channel, display, moves, config.markers))
    }
}

impl<C: LineChannel, D: DisplaySink> ClientSession<C, D> {
    pub fn new(channel: C, display: D, moves: MoveHandoff<String>, markers: Markers) -> Self {
        Self {
            channel,
            display,
            moves,
            markers,
            report: SessionReport::default(),
        }
    }

    /// Drive the session until the player says goodbye or something fails.
    /// The channel is closed on every exit path.
    pub async fn run(&mut self) -> Result<SessionReport, SessionError> {
        let result = self.request_service().await;
        self.channel.close().await;
        log::info!("CLIENT: connection closed");
        match result {
            Ok(()) => Ok(self.report.clone()),
            Err(e) => {
                log::warn!(
                    "Session aborted after {} messages and {} moves: {}",
                    self.report.messages_received,
                    self.report.moves_sent,
                    e
                );
                Err(e)
            }
        }
    }

    async fn request_service(&mut self) -> Result<(), SessionError> {
        // The peer speaks first with a greeting.
        let mut current = self.receive().await?;
        log::info!("CLIENT: type a line or 'goodbye' to quit");

        loop {
            let code = current.classify(&self.markers);
            self.report.last_code = Some(code);
            match code {
                ControlCode::SelfTurn => {
                    let mv = self.moves.take().await?;
                    self.channel.write_line(&mv).await?;
                    log::debug!("CLIENT: sent move {:?}", mv);
                    self.report.moves_sent += 1;
                    self.report.last_move = Some(mv);
                    current = self.receive().await?;
                }
                ControlCode::PeerTurn => {
                    current = self.receive().await?;
                }
                ControlCode::Other => {
                    // Nothing to answer; keep listening rather than spin on a stale line.
                    log::debug!("No turn signalled by {:?}", current.code());
                    current = self.receive().await?;
                }
            }

            if self.report.last_move.as_deref().is_some_and(is_goodbye) {
                break;
            }
        }
        Ok(())
    }

    async fn receive(&mut self) -> Result<StatusMessage, SessionError> {
        let line = self.channel.read_line().await?;
        let msg = StatusMessage::parse(line)?;
        self.report.messages_received += 1;
        log::debug!(
            "received message #{} with code {:?}",
            self.report.messages_received,
            msg.code()
        );
        self.display.present(msg.raw());
        Ok(msg)
    }
}
