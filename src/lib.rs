mod common;
mod config;
pub mod handoff;
mod logging;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod ui;

pub use common::*;
pub use config::*;
pub use handoff::MoveHandoff;
pub use logging::{init_logging, level_from, LOG_ENV};
pub use protocol::*;
pub use session::*;
pub use transport::in_memory::InMemoryLineChannel;
pub use transport::tcp::{StreamLineChannel, TcpLineChannel};
pub use transport::LineChannel;
pub use ui::*;
