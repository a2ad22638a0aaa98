//! Logging trait for support-chat client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log all API interactions passing through the [`Helpdesk`] client.
//!
//! [`Helpdesk`]: crate::Helpdesk

use crate::types::{ChatMessage, Conversation};

/// A trait for logging support-chat client operations.
///
/// Implement this trait to capture and record API interactions: conversation
/// starts and assistant replies. Installed with
/// [`Helpdesk::with_logger`](crate::Helpdesk::with_logger); when no logger is
/// installed nothing is recorded.
///
/// # Example
///
/// ```rust,ignore
/// use helpdesk::{ChatMessage, ClientLogger, Conversation};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_started(&self, conversation: &Conversation) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Started: {}", conversation.id).unwrap();
///     }
///
///     fn log_reply(&self, message: &ChatMessage) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Reply: {}", serde_json::to_string(message).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a successfully started conversation.
    ///
    /// Called once per successful `start_chat` call with the conversation
    /// the backend created.
    fn log_started(&self, conversation: &Conversation);

    /// Log an assistant reply.
    ///
    /// Called once per successful `send_message` call with the full reply,
    /// including any knowledge-base citations.
    fn log_reply(&self, message: &ChatMessage);
}
