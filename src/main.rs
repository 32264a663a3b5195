use std::io;

use clap::Parser;
use tokio::time::Duration;
use turnlink::{
    init_logging, spawn_line_moves, ClientConfig, ClientSession, ConsoleDisplay, Markers,
    MoveHandoff, DEFAULT_ADDR,
};

#[derive(Parser)]
#[command(author, version, about = "Client for a two-player turn-based line protocol", long_about = None)]
struct Cli {
    /// Server address to dial.
    #[arg(long, default_value = DEFAULT_ADDR)]
    connect: String,
    /// Marker identifying this player in control codes.
    #[arg(long, default_value_t = 'X')]
    own: char,
    /// Marker identifying the opponent in control codes.
    #[arg(long, default_value_t = 'O')]
    other: char,
    #[arg(long, help = "Give up on a read or write after this many seconds (default: wait forever)")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    if cli.own == cli.other {
        anyhow::bail!("--own and --other must be different markers");
    }

    let config = ClientConfig {
        addr: cli.connect,
        markers: Markers::new(cli.own, cli.other),
        io_timeout: cli.timeout_secs.map(Duration::from_secs),
        ..ClientConfig::default()
    };

    let moves = MoveHandoff::new();
    let mut session = ClientSession::connect(&config, ConsoleDisplay::new(), moves.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", config.addr, e))?;

    // The reader thread is left running; it dies with the process.
    let _input = spawn_line_moves(io::BufReader::new(io::stdin()), moves);

    let report = session.run().await?;
    println!(
        "Session finished: {} messages received, {} moves sent",
        report.messages_received, report.moves_sent
    );
    Ok(())
}
