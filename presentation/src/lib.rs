//! Presentation layer for campus-portal
//!
//! This crate contains the CLI definition, output formatters, the console
//! navigator, a loading spinner and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod navigation;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, Command};
pub use navigation::ConsoleNavigator;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::LoadingSpinner;
