//! Operator-facing log output.
//!
//! `info` carries the client's own status lines ("CLIENT: ...") and goes to
//! stdout next to the `SERVER:` lines printed by the display. Problems and
//! diagnostics go to stderr, tagged with their level and module, so they never
//! interleave with the game transcript.

use std::env;
use std::io::Write;

use log::{Level, LevelFilter, Metadata, Record};

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "TURNLINK_LOG";

struct ClientLogger;

impl log::Log for ClientLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Info => println!("{}", record.args()),
            level => eprintln!(
                "[{} {}] {}",
                level,
                record.module_path().unwrap_or("turnlink"),
                record.args()
            ),
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

static LOGGER: ClientLogger = ClientLogger;

/// Level named by `value` (`off`, `error`, ... `trace`, any case); `info` if
/// missing or unrecognised.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the client logger at the level given by `TURNLINK_LOG`.
/// Later calls leave the first logger in place.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
