//! Audio cues
//!
//! Cues are fire-and-forget: a backend that fails only logs, and nothing in
//! the simulation waits on or looks at the result.

use std::io::{self, Write};

use tracing::{debug, trace};

/// Named cues the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Ball hits either paddle
    PaddleHit,
    /// Player won the match
    RoundWin,
    /// Opponent won the match
    RoundLoss,
}

impl AudioCue {
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::PaddleHit => "paddle-hit",
            AudioCue::RoundWin => "round-win",
            AudioCue::RoundLoss => "round-loss",
        }
    }
}

/// Something that can play cues
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn rings(cue: AudioCue) -> usize {
        match cue {
            AudioCue::PaddleHit => 1,
            AudioCue::RoundWin => 2,
            AudioCue::RoundLoss => 3,
        }
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        self.out.write_all(&b"\x07".repeat(times))?;
        self.out.flush()
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        if let Err(e) = self.ring(Self::rings(cue)) {
            debug!("Cue {} failed: {}", cue.name(), e);
        }
    }
}

/// Drops every cue
#[derive(Debug, Default)]
pub struct Muted;

impl CueSink for Muted {
    fn play(&mut self, cue: AudioCue) {
        trace!("Muted cue {}", cue.name());
    }
}

/// Pick the backend for the current settings
pub fn create_sink(enabled: bool) -> Box<dyn CueSink> {
    if enabled {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Muted)
    }
}
