mod ai;
mod audio;
mod config;
mod debug;
mod driver;
mod game;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{info, warn};

use driver::FrameDriver;
use game::keyboard::ReleaseMode;
use game::{KeyMap, TerminalKeys};

/// Command line options
#[derive(Debug, Default)]
struct Args {
    debug: bool,
    mute: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args);

    debug::init(args.debug).context("failed to initialize debug logging")?;

    let config = config::load_config().context("failed to load configuration")?;
    info!("Loaded config from {}", config::get_config_path().display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    // Real key releases where the terminal can report them
    let release_mode = if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        ReleaseMode::Reported
    } else {
        warn!("Terminal doesn't report key releases, holding presses instead");
        ReleaseMode::Synthetic {
            hold: Duration::from_millis(config.input.fallback_hold_ms),
        }
    };

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut keys = TerminalKeys::new(KeyMap::from_bindings(&config.keybindings), release_mode);
    let sink = audio::create_sink(config.audio.enabled && !args.mute);
    let mut driver = FrameDriver::new(sink, StdRng::from_entropy());

    // Run game
    let result = driver::run(&mut terminal, &config, &mut keys, &mut driver);

    // Restore terminal
    let restored = restore_terminal(
        terminal.backend_mut(),
        release_mode == ReleaseMode::Reported,
        disable_raw_mode,
    );

    result.context("game loop failed")?;
    restored.context("failed to restore terminal")?;
    info!("Session ended");
    Ok(())
}

/// Undo the terminal setup. Every step runs even if an earlier one fails;
/// the first error is returned.
fn restore_terminal<W: Write>(
    out: &mut W,
    pop_keyboard_flags: bool,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let mut first_error = None;
    let mut note = |step: &str, result: io::Result<()>| {
        if let Err(e) = result {
            warn!("Terminal restore step '{}' failed: {}", step, e);
            first_error.get_or_insert(e);
        }
    };

    if pop_keyboard_flags {
        note("keyboard flags", execute!(out, PopKeyboardEnhancementFlags));
    }
    note("raw mode", disable_raw());
    note(
        "screen",
        execute!(out, DisableFocusChange, LeaveAlternateScreen, Show),
    );

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Parse command line flags
fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();
    let program = args.first().map(String::as_str).unwrap_or("terminal-pong");

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => parsed.debug = true,
            "--mute" | "-m" => parsed.mute = true,
            "--help" | "-h" => {
                print_usage(program);
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", arg);
                print_usage(program);
                std::process::exit(1);
            }
        }
    }

    parsed
}

fn print_usage(program: &str) {
    println!("Terminal Pong - first to 10 against the computer");
    println!();
    println!("Usage:");
    println!("  {} [--debug] [--mute]", program);
    println!();
    println!("Options:");
    println!(
        "  -d, --debug    Write a debug log to {}",
        debug::LOG_FILE_PATH
    );
    println!("  -m, --mute     Don't ring the terminal bell");
    println!("  -h, --help     Show this help");
    println!();
    println!("Controls and colors live in {}", config::get_config_path().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_flags() {
        let parsed = parse_args(&args(&["terminal-pong"]));
        assert!(!parsed.debug);
        assert!(!parsed.mute);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_restore_leaves_raw_mode_when_writes_fail() {
        let mut raw_mode_disabled = false;

        let result = restore_terminal(&mut BrokenPipe, true, || {
            raw_mode_disabled = true;
            Ok(())
        });

        assert!(raw_mode_disabled);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_restore_succeeds_on_healthy_terminal() {
        let mut out = Vec::new();
        let result = restore_terminal(&mut out, false, || Ok(()));

        assert!(result.is_ok());
        assert!(!out.is_empty());
    }

    #[test]
    fn test_debug_and_mute_flags() {
        let parsed = parse_args(&args(&["terminal-pong", "--debug", "-m"]));
        assert!(parsed.debug);
        assert!(parsed.mute);
    }
}
