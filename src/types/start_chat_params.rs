use serde::{Deserialize, Serialize};

/// Parameters for starting a conversation.
///
/// The widget's convention is to omit the initial message and seed a local
/// greeting instead, so the common case serializes to `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StartChatParams {
    /// Optional opening message to send with the start request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_message: Option<String>,
}

impl StartChatParams {
    /// Creates params with no initial message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates params carrying an opening message.
    pub fn with_initial_message(message: impl Into<String>) -> Self {
        Self {
            initial_message: Some(message.into()),
        }
    }
}
