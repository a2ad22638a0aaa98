//! Interactive support-chat widget host.
//!
//! This binary hosts the chat widget session against the support API,
//! providing a REPL stand-in for the embedded web widget.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage (base URL from HELPDESK_API_URL)
//! helpdesk-chat --token <bearer-token>
//!
//! # Explicit base URL and role
//! helpdesk-chat --base-url https://support.example.com/api --role agent --token <t>
//!
//! # Restrict retrieval to a knowledge-base category
//! helpdesk-chat --category returns
//!
//! # Disable colors (useful for piping output)
//! helpdesk-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/escalate <reason>` - Hand off to a human agent
//! - `/helpful <id>` / `/unhelpful <id>` - Rate an assistant reply
//! - `/history` - Reload the transcript from the server
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use helpdesk::widget::{
    TranscriptRenderer, WidgetArgs, WidgetCommand, WidgetConfig, WidgetSession, help_text,
    parse_command,
};
use helpdesk::{
    ChatApi, Helpdesk, MemoryTokenStore, Rating, RefundEligibilityParams, TokenStore,
};

/// Main entry point for the helpdesk-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = WidgetArgs::from_command_line_relaxed("helpdesk-chat [OPTIONS]");
    let config = WidgetConfig::from(&args);
    let use_color = config.use_color;
    let role = config.role;

    let store = Arc::new(MemoryTokenStore::new());
    if let Some(token) = args.token.clone() {
        store.set(role, token);
    }
    let client = Helpdesk::new(args.base_url.clone(), store.clone(), role)?;
    let mut session = WidgetSession::new(client, config);
    let mut renderer = TranscriptRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Flag for interrupt handling while a send is in flight
    let interrupted = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Support Chat ({role})");
    println!("Type /help for commands, /quit to exit\n");

    session.open().await;
    if session.service_unavailable() {
        renderer.print_info("The assistant is unreachable; degraded mode.");
    }
    for entry in session.transcript().to_vec() {
        renderer.print_entry(&entry);
    }

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        if store.redirect_requested() {
            renderer.print_error("Session expired; please log in again.");
            break;
        }

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        WidgetCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        WidgetCommand::Escalate(reason) => {
                            match session.escalate(&reason).await {
                                Ok(ack) => {
                                    match ack.ticket_id {
                                        Some(ticket) => renderer.print_info(&format!(
                                            "Escalated; ticket {ticket} opened."
                                        )),
                                        None => renderer.print_info("Escalated to a human agent."),
                                    }
                                    println!("Goodbye!");
                                    break;
                                }
                                Err(err) => renderer.print_error(&format!(
                                    "Escalation failed (you can retry): {err}"
                                )),
                            }
                        }
                        WidgetCommand::Helpful(id) => {
                            match session.give_feedback(&id, Rating::Helpful, None).await {
                                Ok(_) => renderer.print_info("Thanks for the feedback!"),
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        WidgetCommand::Unhelpful(id) => {
                            match session.give_feedback(&id, Rating::NotHelpful, None).await {
                                Ok(_) => renderer.print_info("Thanks for the feedback!"),
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        WidgetCommand::History => match session.sync_history().await {
                            Ok(()) => {
                                for entry in session.transcript().to_vec() {
                                    renderer.print_entry(&entry);
                                }
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        WidgetCommand::Conversations => {
                            match session.client().conversations_default().await {
                                Ok(summaries) => print_conversations(&summaries),
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        WidgetCommand::Window(category) => {
                            match session.client().return_window(&category).await {
                                Ok(window) => {
                                    renderer.print_info(&format!(
                                        "Return window for {}: {} days",
                                        window.category, window.days
                                    ));
                                    if let Some(policy) = window.policy {
                                        renderer.print_info(&format!("  {policy}"));
                                    }
                                }
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        WidgetCommand::Refund {
                            order_id,
                            category,
                            purchase_date,
                        } => {
                            let purchase_date =
                                match OffsetDateTime::parse(&purchase_date, &Rfc3339) {
                                    Ok(date) => date,
                                    Err(_) => {
                                        renderer.print_error(
                                            "purchase date must be RFC 3339, e.g. 2024-04-15T00:00:00Z",
                                        );
                                        continue;
                                    }
                                };
                            let params =
                                RefundEligibilityParams::new(order_id, category, purchase_date);
                            match session.client().check_refund_eligibility(params).await {
                                Ok(result) if result.eligible => {
                                    match result.refund_amount {
                                        Some(amount) => renderer.print_info(&format!(
                                            "Eligible for a refund of {amount:.2}"
                                        )),
                                        None => renderer.print_info("Eligible for a refund."),
                                    }
                                }
                                Ok(result) => {
                                    let reason = result
                                        .reason
                                        .unwrap_or_else(|| "not eligible".to_string());
                                    renderer.print_info(&format!("Not eligible: {reason}"));
                                }
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        WidgetCommand::Health => match session.probe_health().await {
                            Ok(health) => {
                                renderer.print_info(&format!("Backend status: {}", health.status));
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        WidgetCommand::Close => {
                            session.close();
                            renderer.print_info("Panel dismissed; /open to resume.");
                        }
                        WidgetCommand::Open => {
                            session.open().await;
                            renderer.print_info("Panel reopened.");
                        }
                        WidgetCommand::Stats => {
                            print_stats(&session);
                        }
                        WidgetCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        WidgetCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - optimistic append, then the send
                let before = session.message_count();
                match session.submit(line).await {
                    Ok(_) => {
                        // There is no cancellation path for an in-flight
                        // send; a Ctrl+C during the wait only annotates the
                        // outcome.
                        if interrupted.load(Ordering::Relaxed) {
                            renderer.print_info("(interrupt noted; the send had already landed)");
                        }
                        for entry in session.transcript()[before..].to_vec() {
                            renderer.print_entry(&entry);
                        }
                        if session.message_count() == before {
                            renderer.print_info(
                                "No conversation yet; try /open, or create a support ticket.",
                            );
                        }
                    }
                    Err(err) => renderer.print_error(&err.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats<C: helpdesk::ChatApi>(session: &WidgetSession<C>) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      State: {:?}", stats.state);
    match stats.conversation_id {
        Some(ref id) => println!("      Conversation: {}", id),
        None => println!("      Conversation: (none)"),
    }
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Backend: {}",
        if stats.service_unavailable {
            "unavailable"
        } else {
            "reachable"
        }
    );
    println!(
        "      Escalation: {}",
        if stats.escalation_available {
            "available"
        } else {
            "not yet available"
        }
    );
}

fn print_conversations(summaries: &[helpdesk::ConversationSummary]) {
    if summaries.is_empty() {
        println!("    No conversations yet.");
        return;
    }
    println!("    Recent conversations:");
    for summary in summaries {
        let title = summary.title.as_deref().unwrap_or("(untitled)");
        let escalated = if summary.escalated { " [escalated]" } else { "" };
        println!(
            "      {} - {} ({} messages){}",
            summary.id, title, summary.message_count, escalated
        );
    }
}
