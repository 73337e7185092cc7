//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::LoadingSpinner;
use portal_application::ChatSession;
use portal_domain::ConversationId;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Slash command recognised by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    New,
    History,
    List,
    /// `/delete <id>`; `None` when the id is missing
    Delete(Option<String>),
    Zoom,
    Quit,
    Unknown,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/new" => ReplCommand::New,
            "/history" => ReplCommand::History,
            "/list" | "/ls" => ReplCommand::List,
            "/delete" | "/rm" => ReplCommand::Delete(parts.next().map(str::to_string)),
            "/zoom" => ReplCommand::Zoom,
            _ => ReplCommand::Unknown,
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: Arc<ChatSession>,
    show_progress: bool,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(session: Arc<ChatSession>) -> Self {
        Self {
            session,
            show_progress: true,
        }
    }

    /// Set whether to show the loading spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("campus-portal").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("you> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Campus Portal - Placement Chat       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Conversation: {}", self.session.conversation_id());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /new             - Start a new conversation");
        println!("  /history         - Show the stored transcript");
        println!("  /list, /ls       - List conversations on the service");
        println!("  /delete <id>     - Delete a conversation");
        println!("  /zoom            - Toggle the camera zoom");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, cmd: &str) -> bool {
        match ReplCommand::parse(cmd) {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::New => {
                match self.session.new_conversation().await {
                    Ok(id) => println!("Started conversation {}", id),
                    Err(e) => eprintln!("Error: {}", e),
                }
                false
            }
            ReplCommand::History => {
                match self.session.history().await {
                    Ok(history) => println!("{}", ConsoleFormatter::format_history(&history)),
                    Err(e) => eprintln!("Error: {}", e),
                }
                false
            }
            ReplCommand::List => {
                match self.session.conversations().await {
                    Ok(conversations) => print!(
                        "{}",
                        ConsoleFormatter::format_conversations(
                            &conversations,
                            &self.session.conversation_id()
                        )
                    ),
                    Err(e) => eprintln!("Error: {}", e),
                }
                false
            }
            ReplCommand::Delete(None) => {
                println!("Usage: /delete <conversation-id>");
                false
            }
            ReplCommand::Delete(Some(id)) => {
                let result = match ConversationId::new(id) {
                    Ok(id) => self.session.delete_conversation(&id).await.map(|_| id),
                    Err(e) => Err(e.into()),
                };
                match result {
                    Ok(id) => println!("Deleted conversation {}", id),
                    Err(e) => eprintln!("Error: {}", e),
                }
                false
            }
            ReplCommand::Zoom => {
                let zoomed = !self.session.camera_zoomed();
                self.session.set_camera_zoomed(zoomed);
                println!("Camera {}", if zoomed { "zoomed in" } else { "zoomed out" });
                false
            }
            ReplCommand::Unknown => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, text: &str) {
        println!();

        let spinner = LoadingSpinner::start("Waiting for the assistant...", self.show_progress);
        let result = self.session.send(text).await;
        spinner.finish();

        match result {
            Ok(_) => self.play_pending(),
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }

    /// Print queued messages, consuming each once shown
    fn play_pending(&self) {
        while let Some(message) = self.session.current_message() {
            println!("{}", ConsoleFormatter::format_message(&message));
            self.session.consume_one();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/new"), ReplCommand::New);
        assert_eq!(ReplCommand::parse(" /history "), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/zoom"), ReplCommand::Zoom);
        assert_eq!(ReplCommand::parse("/list"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("/ls"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("/dance"), ReplCommand::Unknown);
        assert_eq!(ReplCommand::parse("/new now"), ReplCommand::New);
    }

    #[test]
    fn test_parse_delete_takes_an_id() {
        assert_eq!(
            ReplCommand::parse("/delete abc-123"),
            ReplCommand::Delete(Some("abc-123".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("  /rm   abc-123  "),
            ReplCommand::Delete(Some("abc-123".to_string()))
        );
        assert_eq!(ReplCommand::parse("/delete"), ReplCommand::Delete(None));
    }
}
