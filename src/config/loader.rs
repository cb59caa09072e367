// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("terminal-pong");
    path.push("config.toml");
    path
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config() -> Result<Config, io::Error> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<Config, io::Error> {
    if config_path.exists() {
        let contents = fs::read_to_string(config_path)?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(config_path)?;
        Ok(Config::default())
    }
}

/// Parse config text, falling back to defaults on malformed input
pub fn parse_config(contents: &str) -> Config {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            eprintln!("Warning: Failed to parse config file: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let commented_toml = format!(
        "# Terminal Pong Configuration File\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key names: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\", \"Tab\"\n\
         #            or single characters like \"W\", \"S\", \"Q\" (case-insensitive)\n\
         # Each action takes a list of keys\n\
         #\n\
         # Colors: RGB values from 0-255\n\
         #\n\
         # input.fallback_hold_ms only matters on terminals that can't report key\n\
         # releases. Keep it above your keyboard's auto-repeat delay.\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    info!("Created default config file at {}", path.display());
    Ok(())
}
