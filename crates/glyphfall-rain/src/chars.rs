//! Character constants for the rain.

/// Glyph placed in a column when the buffer runs dry (full-width space).
pub const FILLER_GLYPH: char = '\u{3000}';
