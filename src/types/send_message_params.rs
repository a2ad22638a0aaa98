use serde::{Deserialize, Serialize};

/// Parameters for sending a customer message.
///
/// `message` must be non-empty; that is enforced by the caller, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageParams {
    /// The conversation to append to.
    pub conversation_id: String,

    /// The customer's message text.
    pub message: String,

    /// Optional knowledge-base category restriction for retrieval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,
}

impl SendMessageParams {
    /// Creates params for the given conversation and text.
    pub fn new(conversation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            message: message.into(),
            category_filter: None,
        }
    }

    /// Restricts retrieval to a knowledge-base category.
    pub fn with_category_filter(mut self, category: impl Into<String>) -> Self {
        self.category_filter = Some(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn minimal_params() {
        let params = SendMessageParams::new("conv-1", "Where is my order?");
        assert_eq!(
            to_value(&params).unwrap(),
            json!({
                "conversation_id": "conv-1",
                "message": "Where is my order?"
            })
        );
    }

    #[test]
    fn with_category_filter() {
        let params =
            SendMessageParams::new("conv-1", "Can I return these?").with_category_filter("returns");
        assert_eq!(
            to_value(&params).unwrap(),
            json!({
                "conversation_id": "conv-1",
                "message": "Can I return these?",
                "category_filter": "returns"
            })
        );
    }
}
