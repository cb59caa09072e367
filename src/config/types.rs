// Terminal Pong configuration types
// Game rules are fixed; only controls, colors, sound and input timing are settable

use serde::{Deserialize, Serialize};

use crate::game::Action;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Player paddle (left)
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,

    // Phase controls
    pub start: Vec<String>,
    pub restart: Vec<String>,
    pub quit: Vec<String>,
}

impl KeyBindings {
    pub fn keys_for(&self, action: Action) -> &[String] {
        match action {
            Action::MoveUp => &self.move_up,
            Action::MoveDown => &self.move_down,
            Action::Start => &self.start,
            Action::Restart => &self.restart,
            Action::Quit => &self.quit,
        }
    }
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: keys(&["W", "Up"]),
            move_down: keys(&["S", "Down"]),
            start: keys(&["Space"]),
            restart: keys(&["R"]),
            quit: keys(&["Q", "Esc"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second (one simulation tick per frame)
    pub target_fps: u64,

    // RGB values 0-255
    pub paddle_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub center_line_color: [u8; 3],
    pub score_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            paddle_color: [0, 255, 0],      // Green
            ball_color: [0, 255, 0],        // Green
            center_line_color: [0, 160, 0], // Dim green
            score_color: [255, 255, 255],   // White
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    // Ring the terminal bell for paddle hits and match results
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Covers the common 250-500 ms auto-repeat delays
pub const DEFAULT_FALLBACK_HOLD_MS: u64 = 550;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    // Terminals without key release reporting: how long a press counts as held.
    // Must outlast the keyboard's auto-repeat delay or a held key stutters.
    pub fallback_hold_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            fallback_hold_ms: DEFAULT_FALLBACK_HOLD_MS,
        }
    }
}
