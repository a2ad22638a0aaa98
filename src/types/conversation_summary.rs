use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A conversation summary from the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    /// Backend-assigned conversation identifier.
    pub id: String,

    /// Server-derived title, usually the first customer message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// When the conversation was created.
    #[serde(with = "crate::utils::time")]
    pub created_at: OffsetDateTime,

    /// When the conversation last received a message.
    #[serde(
        default,
        with = "crate::utils::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,

    /// Number of messages in the conversation.
    #[serde(default)]
    pub message_count: u32,

    /// True once a human handoff has been requested. Escalation flags the
    /// conversation; it never terminates the record.
    #[serde(default)]
    pub escalated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn deserializes_minimal_summary() {
        let summary: ConversationSummary = serde_json::from_value(json!({
            "id": "conv-9",
            "created_at": "2024-05-01T12:30:00Z"
        }))
        .unwrap();
        assert_eq!(summary.id, "conv-9");
        assert_eq!(summary.created_at, datetime!(2024-05-01 12:30:00 UTC));
        assert_eq!(summary.message_count, 0);
        assert!(!summary.escalated);
        assert!(summary.title.is_none());
        assert!(summary.updated_at.is_none());
    }

    #[test]
    fn deserializes_full_summary() {
        let summary: ConversationSummary = serde_json::from_value(json!({
            "id": "conv-10",
            "title": "Where is my order?",
            "created_at": "2024-05-01T12:30:00Z",
            "updated_at": "2024-05-01T12:45:00Z",
            "message_count": 6,
            "escalated": true
        }))
        .unwrap();
        assert_eq!(summary.title.as_deref(), Some("Where is my order?"));
        assert_eq!(summary.message_count, 6);
        assert!(summary.escalated);
    }
}
