//! Colour themes for the falling glyphs.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colour theme for the rain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Green,
    Cyan,
    Amber,
    Magenta,
    Red,
    Blue,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Green => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Green,
        }
    }

    /// Full-brightness RGB components of the theme.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Green => (0, 255, 0),
            ColorTheme::Cyan => (0, 230, 255),
            ColorTheme::Amber => (255, 176, 0),
            ColorTheme::Magenta => (255, 0, 200),
            ColorTheme::Red => (255, 40, 40),
            ColorTheme::Blue => (60, 120, 255),
            ColorTheme::White => (230, 230, 230),
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Parse a theme name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "green" => Some(ColorTheme::Green),
            "cyan" => Some(ColorTheme::Cyan),
            "amber" => Some(ColorTheme::Amber),
            "magenta" => Some(ColorTheme::Magenta),
            "red" => Some(ColorTheme::Red),
            "blue" => Some(ColorTheme::Blue),
            "white" => Some(ColorTheme::White),
            _ => None,
        }
    }
}
