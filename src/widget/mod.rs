//! Chat widget module for the embedded support assistant.
//!
//! This module provides the client-side session machinery behind the chat
//! widget: lifecycle state, optimistic message delivery, escalation, and
//! feedback. It supports:
//!
//! - Optimistic transcript updates that are never rolled back
//! - Graceful degradation when the backend is unreachable at open time
//! - A single outstanding send per conversation, enforced by state
//! - Slash commands for the REPL host
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: The widget state machine and transcript ownership
//! - [`commands`]: Slash command parsing and handling
//! - [`render`]: Plain-text transcript output

mod commands;
mod config;
mod render;
mod session;

pub use commands::{WidgetCommand, help_text, parse_command};
pub use config::{WidgetArgs, WidgetConfig};
pub use render::TranscriptRenderer;
pub use session::{
    Delivery, GREETING, SendOutcome, TranscriptEntry, UNAVAILABLE_APOLOGY, WidgetSession,
    WidgetState, WidgetStats,
};
