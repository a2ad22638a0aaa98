use serde::{Deserialize, Serialize};

/// The author of a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The customer on the other end of the widget.
    Customer,

    /// The RAG assistant.
    Ai,
}

impl Sender {
    /// Returns true if the message came from the assistant.
    pub fn is_ai(&self) -> bool {
        matches!(self, Sender::Ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn serializes_lowercase() {
        assert_eq!(to_value(Sender::Customer).unwrap(), json!("customer"));
        assert_eq!(to_value(Sender::Ai).unwrap(), json!("ai"));
    }

    #[test]
    fn deserializes_lowercase() {
        let sender: Sender = serde_json::from_value(json!("ai")).unwrap();
        assert_eq!(sender, Sender::Ai);
        assert!(sender.is_ai());
    }
}
