//! Core types shared across the glyphfall crates.
//!
//! This crate holds the data that more than one part of the application
//! needs to agree on: grid geometry, tunable settings, colour themes, the
//! message protocol spoken between the render loop and the text supplier,
//! and a few small utilities (soft assertions, bounded random numbers and
//! a resize debouncer).

mod assertion;
mod debounce;
mod grid;
mod protocol;
mod random;
mod settings;
mod theme;

pub use assertion::{AssertMode, check};
pub use debounce::Debouncer;
pub use grid::GridParameters;
pub use protocol::{SupplierCommand, SupplierMessage};
pub use random::random_number;
pub use settings::{
    AnimationSettings, DisplaySettings, GlitchSettings, MAX_STREAM_BATCH_SIZE, StreamSettings,
};
pub use theme::ColorTheme;
