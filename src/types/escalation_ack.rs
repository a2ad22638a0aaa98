use serde::{Deserialize, Serialize};

/// Acknowledgement of an escalation request.
///
/// Escalation flags the conversation for human pickup; the conversation
/// record itself is not terminated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalationAck {
    /// Whether the handoff was recorded.
    #[serde(default = "default_true")]
    pub acknowledged: bool,

    /// Ticket opened for the human agent, when the backend creates one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,

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
        let ack: EscalationAck = serde_json::from_value(json!({})).unwrap();
        assert!(ack.acknowledged);
        assert!(ack.ticket_id.is_none());
    }

    #[test]
    fn deserializes_ack_with_ticket() {
        let ack: EscalationAck = serde_json::from_value(json!({
            "acknowledged": true,
            "ticket_id": "TCK-1009",
            "message": "An agent will join shortly."
        }))
        .unwrap();
        assert_eq!(ack.ticket_id.as_deref(), Some("TCK-1009"));
        assert_eq!(ack.message.as_deref(), Some("An agent will join shortly."));
    }
}
