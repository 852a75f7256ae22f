//! Configuration management.
//!
//! Read from `~/.config/embers/config.toml` at startup. A missing file is
//! replaced by a commented default; missing fields fall back to defaults;
//! a malformed file is an error.

pub mod colors;
pub mod keybindings;

pub use colors::{ColorConfig, ConfigColor};
pub use keybindings::KeybindingConfig;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::live::DEFAULT_POLL_SECS;
use crate::source::batch::DEFAULT_WORKERS;
use crate::source::http::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Stories fetched per "load more" step.
    pub page_size: usize,
    /// Seconds between live-update checks.
    pub live_poll_secs: u64,
    /// Concurrent item fetches per batch.
    pub workers: usize,
    pub http_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: crate::feed::DEFAULT_PAGE_SIZE,
            live_poll_secs: DEFAULT_POLL_SECS,
            workers: DEFAULT_WORKERS,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from the default path, creating a commented default file on
    /// first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_config_path()?;
        if !path.exists() {
            Self::write_default_config(&path)?;
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/embers/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("embers").join("config.toml"))
    }

    fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default config file content, written on first run.
    pub fn default_config_content() -> String {
        r##"# embers configuration
#
# Colors accept named values (Black, Red, Green, Yellow, Blue, Magenta,
# Cyan, Gray, DarkGray, LightRed, LightGreen, LightYellow, LightBlue,
# LightMagenta, LightCyan, White, Reset) or hex codes ("#RRGGBB", "#RGB").
#
# Keybindings accept single characters ("j", "R"), special keys (Enter,
# Tab, BackTab, Esc, Space, Up, Down, PageUp, PageDown, F1-F12) and
# modifier combinations ("Ctrl+c", "Shift+Tab").

[feed]
# Stories fetched per "load more" step
page_size = 10
# Seconds between live-update checks
live_poll_secs = 5
# Concurrent item fetches per batch
workers = 10
http_timeout_secs = 10

[colors]
border = "DarkGray"
tab_active = "Yellow"
tab_inactive = "DarkGray"
selection_bg = "Yellow"
selection_fg = "Black"
title = "White"
metadata = "DarkGray"
host = "Cyan"
comment_author = "Yellow"
banner_fg = "Black"
banner_bg = "LightYellow"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
select = ["Enter"]
back = ["Esc", "Backspace"]
next_category = ["Tab", "l"]
prev_category = ["BackTab", "h"]
load_more = ["n", "Space"]
refresh = ["r"]
open_in_browser = ["o"]
"##
        .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn default_file_content_is_valid_and_matches_defaults() {
        let config: Config = toml::from_str(&Config::default_config_content()).unwrap();
        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.feed.live_poll_secs, 5);
        assert_eq!(config.colors.tab_active.0, Color::Yellow);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let config: Config = toml::from_str(
            r##"
[feed]
page_size = 25

[colors]
banner_bg = "#ff6600"
"##,
        )
        .unwrap();
        assert_eq!(config.feed.page_size, 25);
        assert_eq!(config.feed.live_poll_secs, 5);
        assert_eq!(config.colors.banner_bg.0, Color::Rgb(255, 102, 0));
        assert_eq!(config.colors.status_bg.0, Color::DarkGray);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.feed.workers, DEFAULT_WORKERS);
        assert_eq!(config.feed.http_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn load_from_round_trips_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\nlive_poll_secs = 30\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.feed.live_poll_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed\npage_size = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Io { .. })
        ));
    }
}
