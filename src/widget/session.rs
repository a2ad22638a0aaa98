//! Widget session state machine.
//!
//! This module provides [`WidgetSession`], which owns a conversation's
//! client-side state: the transcript, the lifecycle state, and the delivery
//! tracking for optimistic sends. The session is generic over [`ChatApi`] so
//! the machine can be driven deterministically in tests.

use time::OffsetDateTime;

use crate::api::ChatApi;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{
    ChatMessage, EscalateParams, EscalationAck, FeedbackAck, FeedbackParams, HealthStatus,
    KnowledgeSource, Rating, SendMessageParams, Sender, StartChatParams,
};
use crate::widget::config::WidgetConfig;

/// Greeting seeded locally after a successful open. Never sent through
/// `send_message` and never persisted server-side.
pub const GREETING: &str =
    "Hi! I'm your support assistant. Ask me about orders, returns, refunds, or anything else.";

/// Apology seeded when the backend cannot be reached at open time. The
/// widget stays usable for ticket-creation guidance.
pub const UNAVAILABLE_APOLOGY: &str = "Sorry, I'm having trouble connecting to the support \
     assistant right now. You can still create a support ticket and an agent will follow up.";

/// Shown when a send fails and the server gave no detail.
const SEND_FAILURE_FALLBACK: &str = "Sorry, something went wrong handling that message. \
     Please try again in a moment.";

/// Prefix for client-generated message ids. Server ids are never prefixed
/// this way, so temporary ids cannot collide with them.
const LOCAL_ID_PREFIX: &str = "local-";

/// Escalation becomes available once the transcript has grown past this.
const ESCALATION_VISIBLE_AFTER: usize = 2;

/// Lifecycle state of the widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WidgetState {
    /// Panel dismissed. No network activity.
    Closed,

    /// Open requested, `start_chat` in flight.
    Initializing,

    /// Conversation usable; the customer may type and submit.
    Ready,

    /// A send is in flight. Input is held until it resolves.
    Sending,
}

/// Delivery state of an optimistically appended message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Appended locally, server acknowledgment outstanding.
    Pending,

    /// Acknowledged by the server.
    Confirmed,

    /// The send failed. The entry stays visible; it is never rolled back.
    Failed,
}

/// Outcome of a submit, surfaced to the host alongside the transcript
/// mutation so every user action has a visible result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply was appended.
    Delivered,

    /// A locally synthesized error message was appended.
    Failed,

    /// Nothing was sent: blank input, or no conversation id yet.
    Ignored,
}

/// One rendered line of the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Server-assigned id, when the message exists server-side. Locally
    /// synthesized entries (greeting, apology, error stand-ins) have none.
    pub id: Option<String>,

    /// Client-generated id, unique within the session.
    pub local_id: String,

    /// Who authored the entry.
    pub sender: Sender,

    /// The text shown to the customer.
    pub content: String,

    /// Client clock for local entries, server-reported time otherwise.
    pub timestamp: OffsetDateTime,

    /// Knowledge-base citations, for assistant replies.
    pub sources: Vec<KnowledgeSource>,

    /// Latched once feedback has been submitted for this entry.
    pub feedback_given: bool,

    /// Marks a locally synthesized failure message. Never sent to the
    /// server.
    pub is_error: bool,

    /// Optimistic delivery tracking.
    pub delivery: Delivery,
}

impl TranscriptEntry {
    /// True when feedback buttons are visible for this entry: it is an
    /// assistant message that exists server-side, no feedback has been
    /// given, and it is not a local error stand-in.
    pub fn feedback_open(&self) -> bool {
        self.sender.is_ai() && self.id.is_some() && !self.feedback_given && !self.is_error
    }
}

/// Aggregated stats for a widget session.
#[derive(Debug, Clone)]
pub struct WidgetStats {
    /// Current lifecycle state.
    pub state: WidgetState,

    /// Whether the backend was unreachable at open time.
    pub service_unavailable: bool,

    /// The conversation id, once assigned.
    pub conversation_id: Option<String>,

    /// Number of transcript entries.
    pub message_count: usize,

    /// Whether the escalation affordance is visible.
    pub escalation_available: bool,
}

/// A widget session owning conversation state and delivery tracking.
///
/// There is exactly one mutable session per widget instance; nothing is
/// shared across instances. At most one send is outstanding at a time: the
/// `Sending` state is an explicit capacity-1 guard, not just a disabled
/// input box.
pub struct WidgetSession<C: ChatApi> {
    client: C,
    config: WidgetConfig,
    state: WidgetState,
    service_unavailable: bool,
    conversation_id: Option<String>,
    transcript: Vec<TranscriptEntry>,
    local_id_counter: u64,
}

impl<C: ChatApi> WidgetSession<C> {
    /// Creates a closed session.
    pub fn new(client: C, config: WidgetConfig) -> Self {
        Self {
            client,
            config,
            state: WidgetState::Closed,
            service_unavailable: false,
            conversation_id: None,
            transcript: Vec::new(),
            local_id_counter: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// True if the backend was unreachable when the widget opened.
    pub fn service_unavailable(&self) -> bool {
        self.service_unavailable
    }

    /// The conversation id, once the backend assigned one.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// The transcript, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Number of transcript entries.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// The active configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Returns session statistics.
    pub fn stats(&self) -> WidgetStats {
        WidgetStats {
            state: self.state,
            service_unavailable: self.service_unavailable,
            conversation_id: self.conversation_id.clone(),
            message_count: self.transcript.len(),
            escalation_available: self.can_escalate(),
        }
    }

    /// Next client-generated id. The fixed prefix plus a monotonically
    /// increasing counter keeps these disjoint from server ids for the life
    /// of the session.
    fn next_local_id(&mut self) -> String {
        self.local_id_counter += 1;
        format!("{}{}", LOCAL_ID_PREFIX, self.local_id_counter)
    }

    /// Timestamp for the next appended entry. Strictly greater than the
    /// last entry's, so transcript order and time order agree even when the
    /// clock reads the same millisecond twice.
    fn next_timestamp(&self, preferred: Option<OffsetDateTime>) -> OffsetDateTime {
        let candidate = preferred.unwrap_or_else(OffsetDateTime::now_utc);
        match self.transcript.last() {
            Some(last) if candidate <= last.timestamp => {
                last.timestamp + time::Duration::milliseconds(1)
            }
            _ => candidate,
        }
    }

    fn push_local(&mut self, sender: Sender, content: &str, is_error: bool) {
        let local_id = self.next_local_id();
        let timestamp = self.next_timestamp(None);
        self.transcript.push(TranscriptEntry {
            id: None,
            local_id,
            sender,
            content: content.to_string(),
            timestamp,
            sources: Vec::new(),
            feedback_given: false,
            is_error,
            delivery: Delivery::Confirmed,
        });
    }

    fn push_reply(&mut self, reply: ChatMessage) {
        let local_id = self.next_local_id();
        let timestamp = self.next_timestamp(reply.timestamp);
        self.transcript.push(TranscriptEntry {
            id: Some(reply.id),
            local_id,
            sender: reply.sender,
            content: reply.content,
            timestamp,
            sources: reply.sources,
            feedback_given: false,
            is_error: false,
            delivery: Delivery::Confirmed,
        });
    }

    /// Opens the widget.
    ///
    /// With no conversation yet, this runs `start_chat` and seeds exactly
    /// one locally authored greeting on success. When the backend is
    /// unreachable the widget still comes up: state goes to `Ready` with
    /// `service_unavailable` set and one apology message seeded. Reopening
    /// an existing conversation skips the network entirely.
    pub async fn open(&mut self) {
        if self.state != WidgetState::Closed {
            return;
        }
        observability::WIDGET_OPENS.click();

        if self.conversation_id.is_some() {
            self.state = WidgetState::Ready;
            return;
        }

        self.state = WidgetState::Initializing;
        match self.client.start_chat(StartChatParams::new()).await {
            Ok(conversation) => {
                self.conversation_id = Some(conversation.id);
                self.service_unavailable = false;
                self.push_local(Sender::Ai, GREETING, false);
            }
            Err(_) => {
                observability::WIDGET_DEGRADED_OPENS.click();
                self.service_unavailable = true;
                // One apology per degraded session, even across reopen
                // attempts.
                let already_seeded = self
                    .transcript
                    .iter()
                    .any(|entry| entry.content == UNAVAILABLE_APOLOGY);
                if !already_seeded {
                    self.push_local(Sender::Ai, UNAVAILABLE_APOLOGY, false);
                }
            }
        }
        self.state = WidgetState::Ready;
    }

    /// Dismisses the panel. The conversation and transcript are retained.
    pub fn close(&mut self) {
        self.state = WidgetState::Closed;
    }

    /// Submits customer text.
    ///
    /// The text is appended optimistically before the network call
    /// resolves, and is never rolled back. On success the assistant reply
    /// is appended; on failure a locally synthesized error entry is
    /// appended instead. Either way the transcript grows by exactly two
    /// entries and the customer sees a response.
    ///
    /// Blank text and missing conversation ids are no-ops. A submit while
    /// another send is in flight is rejected.
    pub async fn submit(&mut self, text: &str) -> Result<SendOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }
        let Some(conversation_id) = self.conversation_id.clone() else {
            return Ok(SendOutcome::Ignored);
        };
        if self.state == WidgetState::Sending {
            return Err(Error::validation(
                "a send is already in flight for this conversation",
                None,
            ));
        }
        if self.state != WidgetState::Ready {
            return Ok(SendOutcome::Ignored);
        }

        let local_id = self.next_local_id();
        let timestamp = self.next_timestamp(None);
        self.transcript.push(TranscriptEntry {
            id: None,
            local_id: local_id.clone(),
            sender: Sender::Customer,
            content: text.to_string(),
            timestamp,
            sources: Vec::new(),
            feedback_given: false,
            is_error: false,
            delivery: Delivery::Pending,
        });
        self.state = WidgetState::Sending;
        observability::WIDGET_SENDS.click();

        let mut params = SendMessageParams::new(conversation_id, text);
        if let Some(category) = &self.config.category_filter {
            params = params.with_category_filter(category.clone());
        }

        let outcome = match self.client.send_message(params).await {
            Ok(reply) => {
                self.mark_delivery(&local_id, Delivery::Confirmed);
                self.push_reply(reply);
                SendOutcome::Delivered
            }
            Err(e) => {
                observability::WIDGET_SEND_FAILURES.click();
                self.mark_delivery(&local_id, Delivery::Failed);
                let detail = e.detail();
                let content = if detail.is_empty() {
                    SEND_FAILURE_FALLBACK.to_string()
                } else {
                    format!("Sorry, I couldn't process that: {detail}")
                };
                self.push_local(Sender::Ai, &content, true);
                SendOutcome::Failed
            }
        };
        self.state = WidgetState::Ready;
        Ok(outcome)
    }

    fn mark_delivery(&mut self, local_id: &str, delivery: Delivery) {
        if let Some(entry) = self
            .transcript
            .iter_mut()
            .find(|entry| entry.local_id == local_id)
        {
            entry.delivery = delivery;
        }
    }

    /// True when the escalation affordance is visible: a conversation
    /// exists and more than two messages have accumulated.
    pub fn can_escalate(&self) -> bool {
        self.conversation_id.is_some() && self.transcript.len() > ESCALATION_VISIBLE_AFTER
    }

    /// Requests a human handoff.
    ///
    /// On success the widget closes; on failure the state is left unchanged
    /// and the error is surfaced for retry.
    pub async fn escalate(&mut self, reason: &str) -> Result<EscalationAck> {
        let Some(conversation_id) = self.conversation_id.clone().filter(|_| self.can_escalate())
        else {
            return Err(Error::validation(
                "escalation requires a conversation with more than two messages",
                None,
            ));
        };
        let ack = self
            .client
            .escalate(EscalateParams::new(conversation_id, reason))
            .await?;
        observability::WIDGET_ESCALATIONS.click();
        self.state = WidgetState::Closed;
        Ok(ack)
    }

    /// Submits feedback for the assistant message with the given server id.
    ///
    /// Idempotent from the UI's perspective: once `feedback_given` latches
    /// for an entry, further submissions for that id are rejected without a
    /// network call.
    pub async fn give_feedback(
        &mut self,
        message_id: &str,
        rating: Rating,
        feedback_text: Option<String>,
    ) -> Result<FeedbackAck> {
        let entry = self
            .transcript
            .iter()
            .find(|entry| entry.id.as_deref() == Some(message_id))
            .ok_or_else(|| {
                Error::not_found(
                    "no message with that id in this conversation",
                    Some("message".to_string()),
                    Some(message_id.to_string()),
                )
            })?;
        if !entry.feedback_open() {
            return Err(Error::validation(
                "feedback is not open for this message",
                Some("message_id".to_string()),
            ));
        }

        let mut params = FeedbackParams::new(message_id, rating);
        if let Some(text) = feedback_text {
            params = params.with_text(text);
        }
        let ack = self.client.submit_feedback(params).await?;
        observability::WIDGET_FEEDBACK.click();
        if let Some(entry) = self
            .transcript
            .iter_mut()
            .find(|entry| entry.id.as_deref() == Some(message_id))
        {
            entry.feedback_given = true;
        }
        Ok(ack)
    }

    /// Re-materializes the transcript from the server's history.
    ///
    /// Locally seeded entries (greeting, error stand-ins) are not
    /// persisted server-side and do not survive a sync. Server-reported
    /// timestamps are kept verbatim; the monotonic nudge applies only to
    /// live appends. Reading twice with no intervening writes yields an
    /// identical transcript.
    pub async fn sync_history(&mut self) -> Result<()> {
        let Some(conversation_id) = self.conversation_id.clone() else {
            return Err(Error::validation("no conversation to sync", None));
        };
        let messages = self
            .client
            .chat_history(&conversation_id, self.config.history_limit)
            .await?;
        self.transcript.clear();
        for message in messages {
            let local_id = self.next_local_id();
            let timestamp = message.timestamp_or_now();
            self.transcript.push(TranscriptEntry {
                id: Some(message.id),
                local_id,
                sender: message.sender,
                content: message.content,
                timestamp,
                sources: message.sources,
                feedback_given: false,
                is_error: false,
                delivery: Delivery::Confirmed,
            });
        }
        Ok(())
    }

    /// Probes backend availability and refreshes the unavailable flag.
    ///
    /// Nothing gates on this; a failed probe leaves the session untouched.
    pub async fn probe_health(&mut self) -> Result<HealthStatus> {
        let health = self.client.health().await?;
        self.service_unavailable = !health.is_healthy();
        Ok(health)
    }

    /// Access the underlying client, for operations that bypass session
    /// state (conversation listings, refund checks).
    pub fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::types::{
        Conversation, ConversationSummary, EscalationAck, FeedbackAck, RefundEligibility,
        RefundEligibilityParams, ReturnWindow,
    };

    /// A backend that answers every call with a fixed error. The helper
    /// tests below never reach the network.
    struct OfflineApi;

    #[async_trait]
    impl ChatApi for OfflineApi {
        async fn start_chat(&self, _params: StartChatParams) -> Result<Conversation> {
            Err(Error::connection("offline", None))
        }

        async fn send_message(&self, _params: SendMessageParams) -> Result<ChatMessage> {
            Err(Error::connection("offline", None))
        }

        async fn chat_history(
            &self,
            _conversation_id: &str,
            _limit: u32,
        ) -> Result<Vec<ChatMessage>> {
            Err(Error::connection("offline", None))
        }

        async fn conversations(&self, _limit: u32) -> Result<Vec<ConversationSummary>> {
            Err(Error::connection("offline", None))
        }

        async fn escalate(&self, _params: EscalateParams) -> Result<EscalationAck> {
            Err(Error::connection("offline", None))
        }

        async fn submit_feedback(&self, _params: FeedbackParams) -> Result<FeedbackAck> {
            Err(Error::connection("offline", None))
        }

        async fn check_refund_eligibility(
            &self,
            _params: RefundEligibilityParams,
        ) -> Result<RefundEligibility> {
            Err(Error::connection("offline", None))
        }

        async fn return_window(&self, _category: &str) -> Result<ReturnWindow> {
            Err(Error::connection("offline", None))
        }

        async fn health(&self) -> Result<HealthStatus> {
            Err(Error::connection("offline", None))
        }
    }

    fn entry(sender: Sender, id: Option<&str>, is_error: bool) -> TranscriptEntry {
        TranscriptEntry {
            id: id.map(String::from),
            local_id: "local-1".to_string(),
            sender,
            content: "text".to_string(),
            timestamp: OffsetDateTime::now_utc(),
            sources: Vec::new(),
            feedback_given: false,
            is_error,
            delivery: Delivery::Confirmed,
        }
    }

    #[test]
    fn feedback_visibility_predicate() {
        assert!(entry(Sender::Ai, Some("msg-1"), false).feedback_open());
        assert!(!entry(Sender::Ai, None, false).feedback_open());
        assert!(!entry(Sender::Ai, Some("msg-2"), true).feedback_open());
        assert!(!entry(Sender::Customer, Some("msg-3"), false).feedback_open());

        let mut rated = entry(Sender::Ai, Some("msg-4"), false);
        rated.feedback_given = true;
        assert!(!rated.feedback_open());
    }

    #[test]
    fn local_ids_are_prefixed_and_monotonic() {
        let mut session = WidgetSession::new(OfflineApi, WidgetConfig::new());
        let first = session.next_local_id();
        let second = session.next_local_id();
        assert_eq!(first, "local-1");
        assert_eq!(second, "local-2");
        // Server ids are plain identifiers; the prefix keeps the namespaces
        // disjoint by construction.
        assert!(!"msg-42".starts_with(LOCAL_ID_PREFIX));
    }

    #[test]
    fn appended_timestamps_strictly_increase() {
        let mut session = WidgetSession::new(OfflineApi, WidgetConfig::new());
        session.push_local(Sender::Ai, "one", false);
        session.push_local(Sender::Customer, "two", false);
        session.push_local(Sender::Ai, "three", false);
        let transcript = session.transcript();
        assert!(transcript[0].timestamp < transcript[1].timestamp);
        assert!(transcript[1].timestamp < transcript[2].timestamp);
    }

    #[tokio::test]
    async fn degraded_open_reaches_ready() {
        let mut session = WidgetSession::new(OfflineApi, WidgetConfig::new());
        session.open().await;
        assert_eq!(session.state(), WidgetState::Ready);
        assert!(session.service_unavailable());
        assert_eq!(session.message_count(), 1);
        assert_eq!(session.transcript()[0].content, UNAVAILABLE_APOLOGY);
    }
}
