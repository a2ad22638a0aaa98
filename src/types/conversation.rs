use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// A conversation as returned by the start endpoint.
///
/// The backend assigns the id; `messages` holds the initial exchange when an
/// opening message was supplied, and is empty otherwise. From the client's
/// perspective the message sequence is append-only and chronological.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// Backend-assigned conversation identifier.
    pub id: String,

    /// Initial exchange, if the conversation was started with a message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Creates a conversation with no messages.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    /// Creates a conversation seeded with an initial exchange.
    pub fn with_messages(id: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            id: id.into(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;
    use serde_json::{json, to_value};

    #[test]
    fn empty_conversation() {
        let conversation = Conversation::new("conv-1");
        assert_eq!(to_value(&conversation).unwrap(), json!({ "id": "conv-1" }));
    }

    #[test]
    fn deserializes_start_response_with_exchange() {
        let conversation: Conversation = serde_json::from_value(json!({
            "id": "conv-2",
            "messages": [
                { "id": "msg-1", "sender": "customer", "content": "Hi" },
                { "id": "msg-2", "sender": "ai", "content": "Hello! How can I help?" }
            ]
        }))
        .unwrap();
        assert_eq!(conversation.id, "conv-2");
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].sender, Sender::Ai);
    }

    #[test]
    fn ignores_extra_fields_from_server() {
        let conversation: Conversation = serde_json::from_value(json!({
            "id": "conv-3",
            "created_at": "2024-05-01T12:30:00Z",
            "status": "active"
        }))
        .unwrap();
        assert_eq!(conversation.id, "conv-3");
        assert!(conversation.messages.is_empty());
    }
}
