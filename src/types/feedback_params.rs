use serde::{Deserialize, Serialize};

use crate::types::Rating;

/// Parameters for submitting feedback on an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackParams {
    /// The server-assigned id of the message being rated.
    pub message_id: String,

    /// The rating.
    pub rating: Rating,

    /// Optional free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
}

impl FeedbackParams {
    /// Creates feedback params without a comment.
    pub fn new(message_id: impl Into<String>, rating: Rating) -> Self {
        Self {
            message_id: message_id.into(),
            rating,
            feedback_text: None,
        }
    }

    /// Attaches a free-form comment.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.feedback_text = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn positive_feedback() {
        let params = FeedbackParams::new("msg-42", Rating::Helpful);
        assert_eq!(
            to_value(&params).unwrap(),
            json!({ "message_id": "msg-42", "rating": 5 })
        );
    }

    #[test]
    fn negative_feedback_with_text() {
        let params =
            FeedbackParams::new("msg-42", Rating::NotHelpful).with_text("Wrong order cited");
        assert_eq!(
            to_value(&params).unwrap(),
            json!({
                "message_id": "msg-42",
                "rating": 1,
                "feedback_text": "Wrong order cited"
            })
        );
    }
}
