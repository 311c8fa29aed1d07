// Configuration management
//
// Handles frontend settings persistence: video, screenshots, hotkeys and
// key bindings, stored as TOML.

use crate::display::WindowConfig;
use crate::input::{build_translator, HotkeyConfig, InputConfig, InputError, InputTranslator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "gb_frontend.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),

    /// TOML parse error
    Parse(toml::de::Error),

    /// TOML serialization error
    Serialize(toml::ser::Error),

    /// Invalid key bindings
    Input(InputError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config file: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::Input(e) => write!(f, "Invalid input configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<InputError> for ConfigError {
    fn from(e: InputError) -> Self {
        ConfigError::Input(e)
    }
}

/// Frontend configuration
///
/// Stores all user-configurable settings for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,

    /// Hotkeys
    pub hotkeys: HotkeyConfig,

    /// Key bindings
    pub input: InputConfig,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Enable VSync
    pub vsync: bool,

    /// Initial window title
    pub title: String,
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Screenshot directory
    pub directory: PathBuf,

    /// Include timestamp in filename
    pub include_timestamp: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            video: VideoConfig {
                vsync: true,
                title: "gb-frontend".to_string(),
            },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
                include_timestamp: true,
            },
            hotkeys: HotkeyConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from a TOML file
    ///
    /// Key bindings are validated as part of loading.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: FrontendConfig = toml::from_str(&contents)?;
        config.translator()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Try to load configuration from file, or create default if it can't be read
    ///
    /// # Returns
    /// FrontendConfig (either loaded or default)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(&path).unwrap_or_else(|e| {
            log::warn!("Could not load config ({}), using defaults", e);
            let config = Self::default();
            // Only write defaults when there is no file to clobber
            if !path.as_ref().exists() {
                match config.save_to_file(&path) {
                    Ok(()) => log::info!("Created default configuration file"),
                    Err(e) => log::warn!("Could not save default config: {}", e),
                }
            }
            config
        })
    }

    /// Window settings derived from the video section
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new()
            .with_vsync(self.video.vsync)
            .with_title(&self.video.title)
            .with_screenshots(&self.screenshot.directory, self.screenshot.include_timestamp)
    }

    /// Build the input translator from the bindings and hotkeys
    pub fn translator(&self) -> Result<InputTranslator, InputError> {
        build_translator(&self.input, &self.hotkeys)
    }
}
