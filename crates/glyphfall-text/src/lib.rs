//! Background text supplier for the glyphfall rain.
//!
//! The supplier loads a JSON text document (`{"content": {"text": "..."}}`)
//! from a URL or a local file, repeats it into a long looping sequence and
//! hands it out in fixed-size batches. It runs on its own thread and talks
//! to the render loop only through [`SupplierCommand`] and
//! [`SupplierMessage`] values.
//!
//! [`SupplierCommand`]: glyphfall_core::SupplierCommand
//! [`SupplierMessage`]: glyphfall_core::SupplierMessage

mod error;
mod fetch;
mod looped;
mod supplier;

pub use error::TextError;
pub use fetch::{BUNDLED_TEXT, TextLoader, load_text, parse_document};
pub use looped::LoopedText;
pub use supplier::{SupplierCore, SupplierSettings, TextSupplier};
