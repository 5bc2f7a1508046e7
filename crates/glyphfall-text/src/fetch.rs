//! Loading the source text document.

use std::fs;
use std::time::Duration;

use serde::Deserialize;

use crate::error::TextError;

/// Timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Text used when no source is configured.
pub const BUNDLED_TEXT: &str = "道可道，非常道。名可名，非常名。無名天地之始；有名萬物之母。\
故常無欲，以觀其妙；常有欲，以觀其徼。此兩者同出而異名，同謂之玄。玄之又玄，眾妙之門。\
天下皆知美之為美，斯惡已；皆知善之為善，斯不善已。故有無相生，難易相成，長短相形，\
高下相傾，音聲相和，前後相隨。道生一，一生二，二生三，三生萬物。萬物負陰而抱陽，\
沖氣以為和。為學日益，為道日損。損之又損，以至於無為。無為而無不為。\
治大國，若烹小鮮。見小曰明，守柔曰強。天網恢恢，疏而不失。";

/// Source of the raw base text.
///
/// `url` is a URL or file path of a JSON text document; `None` selects the
/// bundled text.
pub trait TextLoader: Send {
    fn load(&self, url: Option<&str>) -> Result<String, TextError>;
}

impl<F> TextLoader for F
where
    F: Fn(Option<&str>) -> Result<String, TextError> + Send,
{
    fn load(&self, url: Option<&str>) -> Result<String, TextError> {
        self(url)
    }
}

/// JSON text document (only the fields we need).
#[derive(Debug, Deserialize)]
struct TextDocument {
    content: TextContent,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    text: String,
}

/// Parse a JSON text document and return its non-empty text.
pub fn parse_document(json: &str) -> Result<String, TextError> {
    let document: TextDocument = serde_json::from_str(json)?;
    if document.content.text.is_empty() {
        return Err(TextError::EmptyText);
    }
    Ok(document.content.text)
}

/// Load the base text from an HTTP(S) URL, a local file or the bundled text.
pub fn load_text(url: Option<&str>) -> Result<String, TextError> {
    let Some(url) = url else {
        return Ok(BUNDLED_TEXT.to_string());
    };

    let body = if url.starts_with("http://") || url.starts_with("https://") {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();

        agent.get(url).call()?.body_mut().read_to_string()?
    } else {
        fs::read_to_string(url).map_err(|source| TextError::Io {
            path: url.to_string(),
            source,
        })?
    };

    parse_document(&body)
}
