//! Messages exchanged between the render loop and the text supplier.
//!
//! The two sides share no memory; everything crosses as one of these
//! values. The serde representation matches the JSON shape
//! `{"command": "load", ...}` / `{"type": "character", "data": [...]}`.

use serde::{Deserialize, Serialize};

/// Commands sent from the render loop to the supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SupplierCommand {
    /// Fetch and prepare the source text. A no-op once loaded.
    #[serde(rename_all = "camelCase")]
    Load {
        /// URL or path of the text document, `None` for the bundled text.
        url: Option<String>,
        batch_size: usize,
    },
    /// Ask for one more batch of characters.
    #[serde(rename_all = "camelCase")]
    RequestMore { batch_size: usize },
}

/// Events sent from the supplier to the render loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SupplierMessage {
    /// A batch of characters, in stream order.
    Character { data: Vec<char> },
    /// Informational status.
    Info { message: String },
    /// A failure on the supplier side. Never fatal for the render loop.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_shape() {
        let load = SupplierCommand::Load {
            url: Some("text.json".to_string()),
            batch_size: 1000,
        };
        let json = serde_json::to_value(&load).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"command": "load", "url": "text.json", "batchSize": 1000})
        );

        let more: SupplierCommand =
            serde_json::from_str(r#"{"command":"requestMore","batchSize":5}"#).unwrap();
        assert_eq!(more, SupplierCommand::RequestMore { batch_size: 5 });
    }

    #[test]
    fn test_message_wire_shape() {
        let batch = SupplierMessage::Character {
            data: vec!['天', '地'],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "character", "data": ["天", "地"]})
        );

        let error: SupplierMessage =
            serde_json::from_str(r#"{"type":"error","message":"empty text"}"#).unwrap();
        assert_eq!(
            error,
            SupplierMessage::Error {
                message: "empty text".to_string()
            }
        );
    }
}
