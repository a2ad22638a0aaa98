//! Plain-text output for the widget host.
//!
//! Renders transcript entries with optional ANSI styling: customer lines,
//! assistant replies with their citations, and locally synthesized error
//! stand-ins.

use std::io::{self, Stdout, Write};

use crate::types::Sender;
use crate::widget::session::{Delivery, TranscriptEntry};

/// ANSI escape code for dim text (used for citations and pending sends).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for assistant replies).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for error stand-ins).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for green text (used for informational notes).
const ANSI_GREEN: &str = "\x1b[32m";

/// Renders transcript entries and session notices as plain text.
pub struct TranscriptRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl TranscriptRenderer {
    /// Creates a renderer, optionally with ANSI styling.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    /// Prints a single transcript entry.
    pub fn print_entry(&mut self, entry: &TranscriptEntry) {
        let line = match (entry.sender, entry.is_error) {
            (_, true) => self.paint(ANSI_RED, &format!("Assistant: {}", entry.content)),
            (Sender::Ai, false) => self.paint(ANSI_CYAN, &format!("Assistant: {}", entry.content)),
            (Sender::Customer, false) => format!("You: {}", entry.content),
        };
        println!("{line}");

        if entry.delivery == Delivery::Pending {
            println!("{}", self.paint(ANSI_DIM, "  (sending...)"));
        }
        if entry.delivery == Delivery::Failed {
            println!("{}", self.paint(ANSI_DIM, "  (not delivered)"));
        }
        for source in &entry.sources {
            let mut citation = format!("  [source] {}", source.title);
            if let Some(url) = &source.url {
                citation.push_str(&format!(" <{url}>"));
            }
            println!("{}", self.paint(ANSI_DIM, &citation));
        }
        if let Some(id) = &entry.id {
            if entry.feedback_open() {
                println!(
                    "{}",
                    self.paint(
                        ANSI_DIM,
                        &format!("  (rate with /helpful {id} or /unhelpful {id})")
                    )
                );
            }
        }
        self.flush();
    }

    /// Prints an informational message.
    pub fn print_info(&mut self, info: &str) {
        println!("{}", self.paint(ANSI_GREEN, info));
        self.flush();
    }

    /// Prints an error message to stderr.
    pub fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }
}
