// Public modules
pub mod chat_message;
pub mod conversation;
pub mod conversation_summary;
pub mod escalate_params;
pub mod escalation_ack;
pub mod feedback_ack;
pub mod feedback_params;
pub mod health_status;
pub mod knowledge_source;
pub mod rating;
pub mod refund_eligibility;
pub mod refund_eligibility_params;
pub mod return_window;
pub mod send_message_params;
pub mod sender;
pub mod start_chat_params;

// Re-exports
pub use chat_message::ChatMessage;
pub use conversation::Conversation;
pub use conversation_summary::ConversationSummary;
pub use escalate_params::EscalateParams;
pub use escalation_ack::EscalationAck;
pub use feedback_ack::FeedbackAck;
pub use feedback_params::FeedbackParams;
pub use health_status::HealthStatus;
pub use knowledge_source::KnowledgeSource;
pub use rating::Rating;
pub use refund_eligibility::RefundEligibility;
pub use refund_eligibility_params::RefundEligibilityParams;
pub use return_window::ReturnWindow;
pub use send_message_params::SendMessageParams;
pub use sender::Sender;
pub use start_chat_params::StartChatParams;
