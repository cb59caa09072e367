// Debug logging for Terminal Pong
// Routes tracing events to a file when --debug is passed; the TUI owns the terminal

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/pong-debug.log";

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: no subscriber is installed and every event is dropped
/// - If enabled=true: truncates the log file, writes a header and installs
///   a plain-text `tracing_subscriber` fmt layer at DEBUG level
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE_PATH)?;

    writeln!(file, "=== Terminal Pong Debug Log ===")?;
    writeln!(file, "To monitor: tail -f {}", LOG_FILE_PATH)?;
    writeln!(file, "========================================\n")?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    tracing::info!("Debug logging initialized");
    Ok(())
}
