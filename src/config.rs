//! # Configuration
//!
//! Optional, read-only settings file at `<config_dir>/joystick-test/config.toml`.
//! Every field has a default so a missing file, or one that only sets a few
//! keys, still yields a complete [`Config`]. Nothing is ever written back.

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "joystick-test";
const CONFIG_FILE: &str = "config.toml";

/// Colours used by the panels, as RGB tuples.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub background_color: (u8, u8, u8),
    /// Device names and category labels
    pub static_text_color: (u8, u8, u8),
    /// Live values
    pub dynamic_text_color: (u8, u8, u8),
    pub track_color: (u8, u8, u8),
    pub track_highlight_color: (u8, u8, u8),
    pub grid_color: (u8, u8, u8),
    /// Rim of the shaded indicator
    pub indicator_base_color: (u8, u8, u8),
    /// Highlight of the shaded indicator
    pub indicator_light_color: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: (0, 0, 0),
            static_text_color: (255, 255, 160),
            dynamic_text_color: (255, 255, 255),
            track_color: (127, 127, 127),
            track_highlight_color: (191, 191, 191),
            grid_color: (127, 127, 127),
            indicator_base_color: (63, 63, 63),
            indicator_light_color: (255, 255, 255),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UIConfig {
    pub theme: Theme,
    /// Diameter of the slider and hat indicator, in points
    pub indicator_size: f32,
    /// How long to wait before checking the gamepad queue again when idle
    pub poll_interval_ms: u64,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            indicator_size: 10.0,
            poll_interval_ms: 16,
        }
    }
}

/// A monospace family to look for, with its style.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FontCandidate {
    pub name: String,
    #[serde(default)]
    pub bold: bool,
}

impl FontCandidate {
    pub fn new(name: &str, bold: bool) -> Self {
        Self {
            name: name.to_string(),
            bold,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub size: f32,
    /// Tried in order; the built-in monospace font is used when none loads
    pub candidates: Vec<FontCandidate>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            candidates: vec![
                FontCandidate::new("Bitstream Vera Sans Mono", false),
                FontCandidate::new("DejaVu Sans Mono", false),
                FontCandidate::new("Inconsolata", false),
                FontCandidate::new("LucidaTypewriter", false),
                FontCandidate::new("Lucida Typewriter", false),
                FontCandidate::new("Terminus", false),
                FontCandidate::new("Luxi Mono", false),
                FontCandidate::new("Monospace", true),
                FontCandidate::new("Courier New", true),
                FontCandidate::new("Courier", true),
            ],
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    /// Apply gilrs' deadzone and jitter filters instead of showing raw values
    pub default_filters: bool,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ui: UIConfig,
    pub fonts: FontConfig,
    pub controller: ControllerConfig,
}

impl Config {
    /// Location of the settings file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the settings file from its default location.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
