//! Console output formatter for portal results

use colored::Colorize;
use portal_application::{ConversationHistory, ConversationSummary, ServiceHealth};
use portal_domain::{ConversationId, Message, RedirectDecision, Sidebar};

/// Formats chat replies, the sidebar and service reports for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One assistant message: text, then its expression/animation tags
    pub fn format_message(message: &Message) -> String {
        let mut output = format!("{} {}", "assistant:".green().bold(), message.text);

        let mut tags = Vec::new();
        if let Some(expression) = &message.facial_expression {
            tags.push(expression.as_str());
        }
        if let Some(animation) = &message.animation {
            tags.push(animation.as_str());
        }
        if message.has_audio() {
            tags.push("audio");
        }
        if !tags.is_empty() {
            output.push_str(&format!(" {}", format!("[{}]", tags.join(", ")).dimmed()));
        }

        output
    }

    /// Every message of a reply, in order
    pub fn format_messages(messages: &[Message]) -> String {
        if messages.is_empty() {
            return format!("{}", "(no reply)".dimmed());
        }
        messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Messages as pretty JSON, the way the service sent them
    pub fn format_json(messages: &[Message]) -> String {
        serde_json::to_string_pretty(messages).unwrap_or_else(|_| "[]".to_string())
    }

    /// The sidebar with the entry matching `pathname` highlighted
    pub fn format_sidebar(sidebar: &Sidebar, pathname: &str) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Institution Admin"));
        output.push('\n');

        for item in sidebar.items(pathname) {
            let line = if item.active {
                format!(
                    "{} {:<24} {}",
                    "▸".cyan().bold(),
                    item.entry.name.cyan().bold(),
                    item.entry.href.cyan()
                )
            } else {
                format!("  {:<24} {}", item.entry.name, item.entry.href.dimmed())
            };
            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    pub fn format_health(health: &ServiceHealth) -> String {
        let status = if health.is_ok() {
            health.status.green().bold()
        } else {
            health.status.red().bold()
        };

        let mut output = format!("{} {}\n", "Status:".cyan().bold(), status);
        if !health.title.is_empty() {
            output.push_str(&format!("{} {}\n", "Service:".cyan().bold(), health.title));
        }
        if !health.version.is_empty() {
            output.push_str(&format!("{} {}\n", "Version:".cyan().bold(), health.version));
        }
        if !health.description.is_empty() {
            output.push_str(&format!("{}\n", health.description.dimmed()));
        }
        output
    }

    pub fn format_history(history: &ConversationHistory) -> String {
        let mut output = Self::section_header(&format!("Conversation {}", history.conversation_id));

        if history.messages.is_empty() {
            output.push_str(&format!("{}\n", "(empty)".dimmed()));
        }
        for entry in &history.messages {
            let role = format!("{}:", entry.role);
            let role = if entry.role == "user" {
                role.yellow().bold()
            } else {
                role.green().bold()
            };
            output.push_str(&format!("{} {}\n", role, entry.content));
        }

        output
    }

    /// Stored conversations, the active one marked
    pub fn format_conversations(
        conversations: &[ConversationSummary],
        active: &ConversationId,
    ) -> String {
        let mut output = Self::section_header("Conversations");
        if conversations.is_empty() {
            output.push_str(&format!("{}
", "(none)".dimmed()));
        }
        for summary in conversations {
            let id = summary.id.as_str();
            let marker = if summary.id == *active {
                format!("{} {}", "▸".cyan().bold(), id.cyan().bold())
            } else {
                format!("  {}", id)
            };
            match summary.last_activity.as_deref().or(summary.created_at.as_deref()) {
                Some(when) => output.push_str(&format!("{}  {}\n", marker, when.dimmed())),
                None => output.push_str(&format!("{}\n", marker)),
            }
        }
        output
    }

    /// Why sign-in led where it did.
    ///
    /// The route itself is already printed by the navigator.
    pub fn format_redirect(decision: Option<&RedirectDecision>) -> String {
        match decision {
            Some(decision) => format!("{} {}", "Reason:".cyan().bold(), decision.reason),
            None => format!("{}", "No redirect: session is not authenticated".yellow()),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
