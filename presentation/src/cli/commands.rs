//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for campus-portal
#[derive(Parser, Debug)]
#[command(name = "campus-portal")]
#[command(author, version, about = "Campus placement portal client")]
#[command(long_about = r#"
Campus portal client: sign in and land on the page for your role, browse the
institution-admin sidebar, and chat with the placement assistant.

Configuration files are loaded from (in priority order):
1. PORTAL_* environment variables (e.g. PORTAL_CHAT__BASE_URL)
2. --config <path>     Explicit config file
3. ./portal.toml       Project-level config
4. ~/.config/campus-portal/config.toml   Global config

Example:
  campus-portal chat
  campus-portal send "Which companies are hiring this month?"
  campus-portal send --json "Hello"
  campus-portal sign-in --role student --status APPROVED
  campus-portal sidebar --path /institution-admin/profile
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the loading spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append chat events as JSON lines to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_conversation: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start interactive chat mode
    Chat,

    /// Send a single message and print the reply
    Send {
        /// Text to send
        message: String,

        /// Print the reply as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Sign in with the local identity provider and follow the redirect
    SignIn {
        /// Role of the account (overrides auth.dev_user.role)
        #[arg(long, value_name = "ROLE")]
        role: Option<String>,

        /// Verification status, e.g. PENDING or APPROVED
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
    },

    /// Print the institution-admin sidebar
    Sidebar {
        /// Current path; the matching entry is highlighted
        #[arg(long, value_name = "PATH", default_value = "/")]
        path: String,
    },

    /// Check the conversational service
    Health,
}
