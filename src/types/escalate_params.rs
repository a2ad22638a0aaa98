use serde::{Deserialize, Serialize};

/// Parameters for requesting a human handoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalateParams {
    /// The conversation to escalate.
    pub conversation_id: String,

    /// Why the customer wants a human agent.
    pub reason: String,
}

impl EscalateParams {
    /// Creates escalation params.
    pub fn new(conversation_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn serializes_both_fields() {
        let params = EscalateParams::new("conv-1", "The bot could not find my order");
        assert_eq!(
            to_value(&params).unwrap(),
            json!({
                "conversation_id": "conv-1",
                "reason": "The bot could not find my order"
            })
        );
    }
}
