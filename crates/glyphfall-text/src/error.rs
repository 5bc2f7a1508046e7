//! Text loading errors.

use thiserror::Error;

/// Errors raised while loading the source text.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but `content.text` is empty.
    #[error("Invalid JSON structure or empty text")]
    EmptyText,
}
