//! CLI entrypoint for campus-portal
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use portal_application::{
    AuthRedirectUseCase, ChatGateway, ChatSession, ConversationLogger, SessionProvider,
    SignInOutcome, SignInUseCase,
};
use portal_domain::{RedirectPolicy, SessionUser, Sidebar, VerificationStatus};
use portal_infrastructure::{
    ConfigLoader, FileConfig, HttpChatGateway, JsonlConversationLogger, LocalIdentityProvider,
    WatchSessionProvider,
};
use portal_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, ConsoleNavigator, LoadingSpinner,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting campus-portal");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Try `campus-portal chat` or `campus-portal --help`.");
    };

    match command {
        Command::Chat => {
            let session = Arc::new(chat_session(&config, cli.log_conversation.as_deref())?);
            ChatRepl::new(session)
                .with_progress(!cli.quiet)
                .run()
                .await?;
        }
        Command::Send { message, json } => {
            let session = chat_session(&config, cli.log_conversation.as_deref())?;

            let spinner = LoadingSpinner::start("Waiting for the assistant...", !cli.quiet);
            let result = session.send(message).await;
            spinner.finish();

            result?;
            let messages = session.messages();
            if json {
                println!("{}", ConsoleFormatter::format_json(&messages));
            } else {
                println!("{}", ConsoleFormatter::format_messages(&messages));
            }
        }
        Command::SignIn { role, status } => {
            let user = sign_in_user(&config, role, status);
            sign_in(&config, user).await?;
        }
        Command::Sidebar { path } => {
            print!(
                "{}",
                ConsoleFormatter::format_sidebar(&Sidebar::institution_admin(), &path)
            );
        }
        Command::Health => {
            let health = gateway(&config)?.health().await?;
            print!("{}", ConsoleFormatter::format_health(&health));
            if !health.is_ok() {
                bail!("Service reported status '{}'", health.status);
            }
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn gateway(config: &FileConfig) -> Result<HttpChatGateway> {
    let gateway = match config.chat.timeout() {
        Some(timeout) => HttpChatGateway::with_timeout(&config.chat.base_url, timeout)?,
        None => HttpChatGateway::new(&config.chat.base_url),
    };
    info!("Chat service at {}", gateway.base_url());
    Ok(gateway)
}

fn chat_session(config: &FileConfig, log_conversation: Option<&Path>) -> Result<ChatSession> {
    let gateway: Arc<dyn ChatGateway> = Arc::new(gateway(config)?);
    let conversation = config.chat.conversation_id()?;

    let mut session = ChatSession::new(gateway, conversation);
    if let Some(path) = log_conversation
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!("Logging chat events to {}", logger.path().display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        session = session.with_conversation_logger(logger);
    }
    Ok(session)
}

/// The configured local account, with command-line overrides applied
fn sign_in_user(
    config: &FileConfig,
    role: Option<String>,
    status: Option<String>,
) -> Option<SessionUser> {
    let mut user = match (config.auth.dev_user(), role.as_deref()) {
        (_, Some(role)) => SessionUser::new(role),
        (Some(user), None) => user,
        (None, None) => return None,
    };
    if let Some(status) = status {
        user.verification_status = Some(VerificationStatus::from(status));
    }
    Some(user)
}

async fn sign_in(config: &FileConfig, user: Option<SessionUser>) -> Result<()> {
    let policy = RedirectPolicy::new(config.auth.role_routes()?);
    let sessions = Arc::new(WatchSessionProvider::new());

    let redirect = Arc::new(
        AuthRedirectUseCase::new(Arc::new(ConsoleNavigator::new())).with_policy(policy),
    );
    let observer = Arc::clone(&redirect).spawn(sessions.subscribe());

    let provider = Arc::new(LocalIdentityProvider::new(Arc::clone(&sessions), user));
    let outcome = SignInUseCase::new(provider)
        .with_provider_name(config.auth.provider.clone())
        .sign_in()
        .await;

    // Closing the provider lets the observer drain the last update and stop
    drop(sessions);
    observer.await?;

    println!(
        "{}",
        ConsoleFormatter::format_redirect(redirect.last_decision().as_ref())
    );

    match outcome {
        SignInOutcome::Completed => Ok(()),
        SignInOutcome::Failed => bail!("Sign-in failed"),
        SignInOutcome::AlreadyInFlight => bail!("A sign-in is already in progress"),
    }
}
