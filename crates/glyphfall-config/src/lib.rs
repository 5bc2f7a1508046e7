//! Configuration file handling for glyphfall.
//!
//! The configuration lives in `config.toml` inside the platform config
//! directory. A missing file is not an error: every field has a default.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphfall_core::{
    AnimationSettings, AssertMode, ColorTheme, DisplaySettings, GlitchSettings, StreamSettings,
    check,
};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// File name of the configuration inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Make soft assertions fatal.
    pub debug: bool,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Log file location, defaults to the platform data directory.
    pub log_file: Option<PathBuf>,
    /// Colour of the rain.
    pub theme: ColorTheme,
    pub display: DisplaySettings,
    pub animation: AnimationSettings,
    pub glitch: GlitchSettings,
    pub stream: StreamSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            log_file: None,
            theme: ColorTheme::default(),
            display: DisplaySettings::default(),
            animation: AnimationSettings::default(),
            glitch: GlitchSettings::default(),
            stream: StreamSettings::default(),
        }
    }
}

impl Config {
    /// Platform project directories for glyphfall.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "glyphfall")
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Default location of the log file.
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("glyphfall.log"))
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load the configuration from `path`, using defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Assertion mode matching the `debug` flag.
    pub fn assert_mode(&self) -> AssertMode {
        AssertMode::from_debug(self.debug)
    }

    /// Check every numeric setting, resetting invalid ones to their defaults.
    ///
    /// Panics on the first invalid value when `debug` is set.
    pub fn sanitize(&mut self) {
        let mode = self.assert_mode();

        let display_defaults = DisplaySettings::default();
        let display = &mut self.display;
        if !check(mode, display.glyph_width > 0, "glyph_width must be positive") {
            display.glyph_width = display_defaults.glyph_width;
        }
        if !check(
            mode,
            display.fade_alpha > 0.0 && display.fade_alpha <= 1.0,
            "fade_alpha must be in (0, 1]",
        ) {
            display.fade_alpha = display_defaults.fade_alpha;
        }
        if !check(
            mode,
            (0.0..1.0).contains(&display.visibility_floor),
            "visibility_floor must be in [0, 1)",
        ) {
            display.visibility_floor = display_defaults.visibility_floor;
        }

        let animation_defaults = AnimationSettings::default();
        let animation = &mut self.animation;
        if !check(
            mode,
            animation.frame_rate_limit > 0,
            "frame_rate_limit must be positive",
        ) {
            animation.frame_rate_limit = animation_defaults.frame_rate_limit;
        }
        if !check(
            mode,
            animation.droplet_speed_min_ms > 0,
            "droplet_speed_min_ms must be positive",
        ) {
            animation.droplet_speed_min_ms = animation_defaults.droplet_speed_min_ms;
        }
        if !check(
            mode,
            animation.droplet_speed_max_ms > 0,
            "droplet_speed_max_ms must be positive",
        ) {
            animation.droplet_speed_max_ms = animation_defaults.droplet_speed_max_ms;
        }
        if !check(
            mode,
            (0.0..=1.0).contains(&animation.decay_rate),
            "decay_rate must be in [0, 1]",
        ) {
            animation.decay_rate = animation_defaults.decay_rate;
        }

        let glitch_defaults = GlitchSettings::default();
        let glitch = &mut self.glitch;
        if !check(
            mode,
            (0.0..=1.0).contains(&glitch.probability),
            "glitch probability must be in [0, 1]",
        ) {
            glitch.probability = glitch_defaults.probability;
        }
        if !check(
            mode,
            glitch.interval_min_ms > 0 && glitch.interval_max_ms > 0,
            "glitch intervals must be positive",
        ) {
            glitch.interval_min_ms = glitch_defaults.interval_min_ms;
            glitch.interval_max_ms = glitch_defaults.interval_max_ms;
        }

        let stream_defaults = StreamSettings::default();
        let stream = &mut self.stream;
        if !check(mode, stream.batch_size > 0, "batch_size must be positive") {
            stream.batch_size = stream_defaults.batch_size;
        }
        if !check(
            mode,
            stream.loop_multiplier > 0,
            "loop_multiplier must be positive",
        ) {
            stream.loop_multiplier = stream_defaults.loop_multiplier;
        }
        if !check(
            mode,
            stream.stream_interval_ms > 0 && stream.buffer_check_interval_ms > 0,
            "stream intervals must be positive",
        ) {
            stream.stream_interval_ms = stream_defaults.stream_interval_ms;
            stream.buffer_check_interval_ms = stream_defaults.buffer_check_interval_ms;
        }
        if !check(
            mode,
            stream.refill_threshold_multiplier >= 0.0,
            "refill_threshold_multiplier must not be negative",
        ) {
            stream.refill_threshold_multiplier = stream_defaults.refill_threshold_multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("glyphfall-config-{}-{name}", std::process::id()))
            .join(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.debug);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.theme, ColorTheme::Green);
        assert_eq!(config.animation.decay_rate, 0.5);
        assert_eq!(config.stream.batch_size, 1000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            theme = "amber"

            [animation]
            decay_rate = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, ColorTheme::Amber);
        assert_eq!(config.animation.decay_rate, 0.8);
        assert_eq!(config.animation.frame_rate_limit, 60);
        assert_eq!(config.glitch, GlitchSettings::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(&temp_path("missing")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save");
        let mut config = Config::default();
        config.theme = ColorTheme::Cyan;
        config.stream.source = Some("https://example.com/text.json".to_string());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_toml() {
        let path = temp_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "theme = [").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_sanitize_resets_invalid_values() {
        let mut config = Config::default();
        config.animation.frame_rate_limit = 0;
        config.animation.decay_rate = 1.5;
        config.glitch.interval_min_ms = 0;
        config.stream.batch_size = 0;
        config.display.fade_alpha = 0.0;

        config.sanitize();

        assert_eq!(config.animation.frame_rate_limit, 60);
        assert_eq!(config.animation.decay_rate, 0.5);
        assert_eq!(config.glitch.interval_min_ms, 750);
        assert_eq!(config.stream.batch_size, 1000);
        assert_eq!(config.display.fade_alpha, 0.1);
    }

    #[test]
    fn test_sanitize_accepts_edge_decay() {
        let mut config = Config::default();
        config.animation.decay_rate = 0.0;
        config.sanitize();
        assert_eq!(config.animation.decay_rate, 0.0);

        config.animation.decay_rate = 1.0;
        config.sanitize();
        assert_eq!(config.animation.decay_rate, 1.0);
    }

    #[test]
    #[should_panic(expected = "frame_rate_limit must be positive")]
    fn test_sanitize_is_fatal_in_debug() {
        let mut config = Config::default();
        config.debug = true;
        config.animation.frame_rate_limit = 0;
        config.sanitize();
    }
}
