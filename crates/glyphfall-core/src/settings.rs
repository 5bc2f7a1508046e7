//! Tunable settings for display, animation, glitching and streaming.

use serde::{Deserialize, Serialize};

/// Largest number of characters moved in a single transfer.
pub const MAX_STREAM_BATCH_SIZE: usize = 50_000;

/// Grid and canvas appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Display width of one glyph in terminal cells.
    pub glyph_width: u16,
    /// Empty cells on each side of a glyph.
    pub border: u16,
    /// Opacity of the per-frame fade overlay.
    pub fade_alpha: f32,
    /// Brightness at or below which a cell is not drawn.
    pub visibility_floor: f32,
    /// Quiet period before a resize reinitialises the grid.
    pub resize_debounce_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            glyph_width: 2,
            border: 0,
            fade_alpha: 0.1,
            visibility_floor: 0.02,
            resize_debounce_ms: 500,
        }
    }
}

impl DisplaySettings {
    /// Horizontal size of one grid cell in terminal cells.
    pub fn cell_width(&self) -> u16 {
        self.glyph_width.saturating_add(self.border.saturating_mul(2))
    }
}

/// Column timing and brightness falloff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Maximum frames per second.
    pub frame_rate_limit: u32,
    /// Lower bound of the per-column tick interval.
    pub droplet_speed_min_ms: u64,
    /// Upper bound of the per-column tick interval.
    pub droplet_speed_max_ms: u64,
    /// Brightness multiplier applied per trailing band.
    pub decay_rate: f32,
    /// Ticks a column keeps running after its head leaves the bottom row.
    pub extra_tail_ticks: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_rate_limit: 60,
            droplet_speed_min_ms: 1,
            droplet_speed_max_ms: 40,
            decay_rate: 0.5,
            extra_tail_ticks: 0,
        }
    }
}

impl AnimationSettings {
    /// Minimum time between two rendered frames.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.frame_rate_limit.max(1))
    }
}

/// Glyph substitution behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchSettings {
    /// Whether glyphs may be swapped for their variants.
    pub enabled: bool,
    /// Chance that a given cell is glitched during one glitch interval.
    pub probability: f32,
    /// Shortest time before the glitch pattern changes.
    pub interval_min_ms: u64,
    /// Longest time before the glitch pattern changes.
    pub interval_max_ms: u64,
}

impl Default for GlitchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: 0.5,
            interval_min_ms: 750,
            interval_max_ms: 1500,
        }
    }
}

/// Text source and buffer refill behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// URL or file path of the JSON text document. `None` uses the bundled text.
    pub source: Option<String>,
    /// Characters per transfer.
    pub batch_size: usize,
    /// Interval of the supplier's unsolicited pushes.
    pub stream_interval_ms: u64,
    /// Minimum number of times the base text is repeated.
    pub loop_multiplier: usize,
    /// Interval between buffer level checks in the render loop.
    pub buffer_check_interval_ms: u64,
    /// Refill when the buffer holds fewer than `rows * columns * multiplier` characters.
    pub refill_threshold_multiplier: f32,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            source: None,
            batch_size: 1000,
            stream_interval_ms: 1000,
            loop_multiplier: 5,
            buffer_check_interval_ms: 1000,
            refill_threshold_multiplier: 1.5,
        }
    }
}

impl StreamSettings {
    /// Batch size clamped to the transfer safety cap.
    pub fn safe_batch_size(&self) -> usize {
        self.batch_size.min(MAX_STREAM_BATCH_SIZE)
    }
}
