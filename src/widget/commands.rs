//! Slash command parsing for the widget host.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the session without sending messages to the
//! backend.

/// A parsed widget command.
///
/// These commands control the session and are not sent to the backend as
/// chat messages.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    /// Request a human handoff with the given reason.
    Escalate(String),

    /// Mark an assistant message as helpful.
    Helpful(String),

    /// Mark an assistant message as unhelpful.
    Unhelpful(String),

    /// Re-materialize the transcript from the server.
    History,

    /// List recent conversations.
    Conversations,

    /// Look up the return window for a product category.
    Window(String),

    /// Check refund eligibility: order id, product category, purchase date
    /// (RFC 3339).
    Refund {
        /// The order to evaluate.
        order_id: String,
        /// The product category.
        category: String,
        /// Purchase date, RFC 3339.
        purchase_date: String,
    },

    /// Probe backend health.
    Health,

    /// Dismiss the panel without exiting.
    Close,

    /// Reopen the panel.
    Open,

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(WidgetCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use helpdesk::widget::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/escalate I need a human").is_some());
/// assert!(parse_command("Where is my order?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<WidgetCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "escalate" => match argument {
            Some(reason) => WidgetCommand::Escalate(reason.to_string()),
            None => WidgetCommand::Invalid("/escalate requires a reason".to_string()),
        },
        "helpful" => match argument {
            Some(id) => WidgetCommand::Helpful(id.to_string()),
            None => WidgetCommand::Invalid("/helpful requires a message id".to_string()),
        },
        "unhelpful" => match argument {
            Some(id) => WidgetCommand::Unhelpful(id.to_string()),
            None => WidgetCommand::Invalid("/unhelpful requires a message id".to_string()),
        },
        "history" => WidgetCommand::History,
        "conversations" => WidgetCommand::Conversations,
        "window" => match argument {
            Some(category) => WidgetCommand::Window(category.to_string()),
            None => WidgetCommand::Invalid("/window requires a product category".to_string()),
        },
        "refund" => parse_refund_command(argument),
        "health" => WidgetCommand::Health,
        "close" => WidgetCommand::Close,
        "open" => WidgetCommand::Open,
        "stats" | "status" => WidgetCommand::Stats,
        "help" | "?" => WidgetCommand::Help,
        "quit" | "exit" | "q" => WidgetCommand::Quit,
        _ => WidgetCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_refund_command(argument: Option<&str>) -> WidgetCommand {
    let Some(arg) = argument else {
        return WidgetCommand::Invalid(
            "/refund requires '<order_id> <category> <purchase_date>'".to_string(),
        );
    };

    let mut parts = arg.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(order_id), Some(category), Some(purchase_date), None) => WidgetCommand::Refund {
            order_id: order_id.to_string(),
            category: category.to_string(),
            purchase_date: purchase_date.to_string(),
        },
        _ => WidgetCommand::Invalid(
            "/refund expects exactly '<order_id> <category> <purchase_date>'".to_string(),
        ),
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /escalate <reason>           Hand the conversation to a human agent
  /helpful <message-id>        Mark an assistant reply as helpful
  /unhelpful <message-id>      Mark an assistant reply as unhelpful
  /history                     Reload the transcript from the server
  /conversations               List recent conversations
  /window <category>           Show the return window for a category
  /refund <order> <cat> <date> Check refund eligibility (date is RFC 3339)
  /health                      Probe backend availability
  /close                       Dismiss the panel (conversation kept)
  /open                        Reopen the panel
  /stats                       Show session statistics
  /help                        Show this help message
  /quit                        Exit"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_text_is_not_a_command() {
        assert!(parse_command("Where is my order?").is_none());
        assert!(parse_command("  plain text  ").is_none());
    }

    #[test]
    fn escalate_requires_reason() {
        assert_eq!(
            parse_command("/escalate The bot is going in circles"),
            Some(WidgetCommand::Escalate(
                "The bot is going in circles".to_string()
            ))
        );
        assert!(matches!(
            parse_command("/escalate"),
            Some(WidgetCommand::Invalid(_))
        ));
    }

    #[test]
    fn feedback_commands() {
        assert_eq!(
            parse_command("/helpful msg-42"),
            Some(WidgetCommand::Helpful("msg-42".to_string()))
        );
        assert_eq!(
            parse_command("/unhelpful msg-42"),
            Some(WidgetCommand::Unhelpful("msg-42".to_string()))
        );
        assert!(matches!(
            parse_command("/helpful"),
            Some(WidgetCommand::Invalid(_))
        ));
    }

    #[test]
    fn refund_needs_three_arguments() {
        assert_eq!(
            parse_command("/refund ORD-7 electronics 2024-04-15T00:00:00Z"),
            Some(WidgetCommand::Refund {
                order_id: "ORD-7".to_string(),
                category: "electronics".to_string(),
                purchase_date: "2024-04-15T00:00:00Z".to_string(),
            })
        );
        assert!(matches!(
            parse_command("/refund ORD-7 electronics"),
            Some(WidgetCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/refund ORD-7 electronics then some extra"),
            Some(WidgetCommand::Invalid(_))
        ));
    }

    #[test]
    fn aliases() {
        assert_eq!(parse_command("/q"), Some(WidgetCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(WidgetCommand::Quit));
        assert_eq!(parse_command("/?"), Some(WidgetCommand::Help));
        assert_eq!(parse_command("/status"), Some(WidgetCommand::Stats));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(WidgetCommand::Invalid(_))
        ));
    }

    #[test]
    fn case_insensitive_command_names() {
        assert_eq!(parse_command("/HISTORY"), Some(WidgetCommand::History));
        assert_eq!(parse_command("/Health"), Some(WidgetCommand::Health));
    }
}
