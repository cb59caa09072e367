// Configuration module for Terminal Pong
// Handles loading the TOML file with controls, colors, sound and input timing

pub mod loader;
pub mod types;

pub use loader::{get_config_path, load_config};
pub use types::{Config, DisplayConfig, KeyBindings};
