use serde::{Deserialize, Serialize};

/// Acknowledgement of a feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackAck {
    /// Whether the feedback was recorded.
    #[serde(default = "default_true")]
    pub recorded: bool,

    /// Human-readable status note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_bare_ack() {
        let ack: FeedbackAck = serde_json::from_value(json!({})).unwrap();
        assert!(ack.recorded);
    }

    #[test]
    fn deserializes_ack_with_message() {
        let ack: FeedbackAck = serde_json::from_value(json!({
            "recorded": true,
            "message": "Thanks for the feedback!"
        }))
        .unwrap();
        assert_eq!(ack.message.as_deref(), Some("Thanks for the feedback!"));
    }
}
