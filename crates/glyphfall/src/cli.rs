//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use glyphfall_config::Config;
use glyphfall_core::ColorTheme;

/// Falling-glyph digital rain for the terminal, fed by streamed text.
#[derive(Debug, Parser)]
#[command(name = "glyphfall", version, about)]
pub struct Cli {
    /// URL or file path of a JSON text document ({"content": {"text": "..."}})
    #[arg(short, long, value_name = "URL|PATH")]
    pub source: Option<String>,

    /// Configuration file to read instead of the default one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Frame rate cap
    #[arg(long)]
    pub fps: Option<u32>,

    /// Shortest time between two steps of a column, in milliseconds
    #[arg(long, value_name = "MS")]
    pub speed_min: Option<u64>,

    /// Longest time between two steps of a column, in milliseconds
    #[arg(long, value_name = "MS")]
    pub speed_max: Option<u64>,

    /// Brightness falloff per trailing band, between 0 and 1
    #[arg(long)]
    pub decay: Option<f32>,

    /// Chance of a glyph being swapped for its variant, between 0 and 1
    #[arg(long, value_name = "P")]
    pub glitch_probability: Option<f32>,

    /// Disable glyph glitching
    #[arg(long)]
    pub no_glitch: bool,

    /// Characters requested from the text source per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Rain colour
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<ColorTheme>,

    /// Panic on invalid settings instead of falling back to defaults
    #[arg(long)]
    pub debug: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Seed for a reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the resulting configuration back to the config file
    #[arg(long)]
    pub save_config: bool,
}

fn parse_theme(name: &str) -> Result<ColorTheme, String> {
    ColorTheme::from_name(name).ok_or_else(|| {
        format!("unknown theme '{name}' (green, cyan, amber, magenta, red, blue, white)")
    })
}

impl Cli {
    /// Configuration file in use: `--config` or the platform default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }

    /// Override configuration values given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.stream.source = Some(source.clone());
        }
        if let Some(fps) = self.fps {
            config.animation.frame_rate_limit = fps;
        }
        if let Some(min) = self.speed_min {
            config.animation.droplet_speed_min_ms = min;
        }
        if let Some(max) = self.speed_max {
            config.animation.droplet_speed_max_ms = max;
        }
        if let Some(decay) = self.decay {
            config.animation.decay_rate = decay;
        }
        if let Some(probability) = self.glitch_probability {
            config.glitch.probability = probability;
        }
        if self.no_glitch {
            config.glitch.enabled = false;
        }
        if let Some(batch_size) = self.batch_size {
            config.stream.batch_size = batch_size;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
    }
}
