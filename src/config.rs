use std::path::{Path, PathBuf};
use std::str::FromStr;

use ratatui::style::Color;

use crate::error::ConfigError;
use crate::game::WIDTH;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Terminal front-end settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Column the selector starts on (0-based)
    pub initial_column: usize,
    /// How long to wait for a key press before redrawing
    pub poll_interval_ms: u64,
    /// Piece colours, by ratatui colour name or `#rrggbb`
    pub player_one_color: String,
    pub player_two_color: String,
    /// Show the list of played columns under the board
    pub show_move_history: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            initial_column: WIDTH / 2,
            poll_interval_ms: 100,
            player_one_color: "red".into(),
            player_two_color: "yellow".into(),
            show_move_history: true,
        }
    }
}

impl UiConfig {
    pub fn player_one_color(&self) -> Result<Color, ConfigError> {
        parse_color("ui.player_one_color", &self.player_one_color)
    }

    pub fn player_two_color(&self) -> Result<Color, ConfigError> {
        parse_color("ui.player_two_color", &self.player_two_color)
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `filter` when set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    /// Write logs here. The full-screen UI logs nothing without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "connect_four=info".into(),
            file: None,
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value)
        .map_err(|_| ConfigError::Validation(format!("{field}: unknown colour '{value}'")))
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.initial_column >= WIDTH {
            return Err(ConfigError::Validation(format!(
                "ui.initial_column must be < {WIDTH}"
            )));
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }
        if self.ui.player_one_color()? == self.ui.player_two_color()? {
            return Err(ConfigError::Validation(
                "ui.player_one_color and ui.player_two_color must differ".into(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
