//! Color utility functions for the rain.

use glyphfall_core::ColorTheme;
use ratatui::style::Color;

/// Intensity at which a cell is drawn as a head.
const HEAD_INTENSITY: f32 = 0.98;

/// Color of a cell glowing at `intensity` (0.0-1.0) in the given theme.
///
/// Heads are tinted toward white; the trail is the theme color scaled down.
pub fn glow_color(theme: ColorTheme, intensity: f32) -> Color {
    let intensity = intensity.clamp(0.0, 1.0);
    let (r, g, b) = theme.rgb();

    if intensity >= HEAD_INTENSITY {
        return Color::Rgb(lighten(r), lighten(g), lighten(b));
    }

    Color::Rgb(scale(r, intensity), scale(g, intensity), scale(b, intensity))
}

fn scale(channel: u8, intensity: f32) -> u8 {
    (f32::from(channel) * intensity).round() as u8
}

/// Move a channel 75% of the way toward white.
fn lighten(channel: u8) -> u8 {
    let c = f32::from(channel);
    (c + (255.0 - c) * 0.75).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_is_tinted() {
        assert_eq!(glow_color(ColorTheme::Green, 1.0), Color::Rgb(191, 255, 191));
    }

    #[test]
    fn test_trail_scales_theme_color() {
        assert_eq!(glow_color(ColorTheme::Green, 0.5), Color::Rgb(0, 128, 0));
        assert_eq!(glow_color(ColorTheme::Green, 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_intensity_is_clamped() {
        assert_eq!(glow_color(ColorTheme::Green, -1.0), Color::Rgb(0, 0, 0));
        assert_eq!(
            glow_color(ColorTheme::Green, 7.0),
            glow_color(ColorTheme::Green, 1.0)
        );
    }
}
