use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{KnowledgeSource, Sender};

/// A message on the wire.
///
/// This is the shape the backend returns from the send and history
/// endpoints. Client-side presentation state (feedback locks, local error
/// markers, delivery tracking) lives on the widget transcript, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Server-assigned message identifier.
    pub id: String,

    /// Who authored the message.
    pub sender: Sender,

    /// The message text.
    pub content: String,

    /// Server-reported creation time. Some records omit this; callers use
    /// [`ChatMessage::timestamp_or_now`] to substitute the local clock.
    #[serde(
        default,
        with = "crate::utils::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<OffsetDateTime>,

    /// Knowledge-base citations supporting an assistant reply.
    #[serde(default, rename = "rag_sources", skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<KnowledgeSource>,
}

impl ChatMessage {
    /// Creates a new message with the given id, sender, and content.
    pub fn new(id: impl Into<String>, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender,
            content: content.into(),
            timestamp: None,
            sources: Vec::new(),
        }
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the citations.
    pub fn with_sources(mut self, sources: Vec<KnowledgeSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Returns the server timestamp, or the current time when the server
    /// omitted one.
    pub fn timestamp_or_now(&self) -> OffsetDateTime {
        self.timestamp.unwrap_or_else(OffsetDateTime::now_utc)
    }

    /// Returns true if the reply carries at least one citation.
    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}
