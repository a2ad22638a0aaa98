//! The session-operation seam between the widget and the HTTP client.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    ChatMessage, Conversation, ConversationSummary, EscalateParams, EscalationAck, FeedbackAck,
    FeedbackParams, HealthStatus, RefundEligibility, RefundEligibilityParams, ReturnWindow,
    SendMessageParams, StartChatParams,
};

/// Default number of messages fetched by a history read.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Default number of conversations fetched by a listing.
pub const DEFAULT_CONVERSATIONS_LIMIT: u32 = 20;

/// The conversation-session operations exposed by the chat backend.
///
/// [`crate::Helpdesk`] implements this over HTTP; tests drive the widget
/// state machine with a scripted implementation instead. Keeping the widget
/// generic over this trait is what makes the 401 path and the delivery
/// contract deterministic to test.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Opens a conversation. The backend assigns the id; `messages` carries
    /// the initial exchange only when `initial_message` was supplied.
    async fn start_chat(&self, params: StartChatParams) -> Result<Conversation>;

    /// Sends a customer message and returns the assistant's reply.
    ///
    /// This is a long-running call; RAG replies routinely take tens of
    /// seconds. Callers present a waiting indicator rather than polling.
    async fn send_message(&self, params: SendMessageParams) -> Result<ChatMessage>;

    /// Reads the first `limit` messages of a conversation, in order.
    async fn chat_history(&self, conversation_id: &str, limit: u32) -> Result<Vec<ChatMessage>>;

    /// Lists the caller's most recent conversations.
    async fn conversations(&self, limit: u32) -> Result<Vec<ConversationSummary>>;

    /// Requests a human handoff. Flags the conversation; never deletes it.
    async fn escalate(&self, params: EscalateParams) -> Result<EscalationAck>;

    /// Submits feedback for an assistant message.
    async fn submit_feedback(&self, params: FeedbackParams) -> Result<FeedbackAck>;

    /// Evaluates refund eligibility. Pure query, no side effects.
    async fn check_refund_eligibility(
        &self,
        params: RefundEligibilityParams,
    ) -> Result<RefundEligibility>;

    /// Looks up the return window for a product category. Pure query.
    async fn return_window(&self, category: &str) -> Result<ReturnWindow>;

    /// Probes backend availability.
    async fn health(&self) -> Result<HealthStatus>;
}
