//! Digital rain animation for glyphfall.
//!
//! Columns of glyphs fall down the grid, each on its own clock, leaving a
//! trail that fades in widening bands. Glyphs come from a FIFO buffer fed
//! by the text supplier; when it runs dry the columns are padded with
//! blank full-width glyphs instead of waiting.

mod buffer;
mod canvas;
mod chars;
mod color;
mod column;
mod glitch;
mod session;

pub use buffer::CharacterBuffer;
pub use canvas::{Afterglow, GlowCell};
pub use chars::FILLER_GLYPH;
pub use color::glow_color;
pub use column::Column;
pub use glitch::{Glitch, variant};
pub use session::{RainSession, RainSettings, SlotState};
