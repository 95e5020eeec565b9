//! memex CLI
//!
//! Main entry point for the memex command-line tool: a personal memory
//! companion over a managed warehouse platform. Free-text memories go in
//! with `remember`, natural-language questions come back answered with
//! `ask` and `chat`.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, InitCommand, ListCommand, RememberCommand};
use memex_core::{config::MemexConfig, logging, AppResult};
use std::path::PathBuf;

/// memex - your digital memory companion
#[derive(Parser, Debug)]
#[command(name = "memex")]
#[command(about = "Store free-text memories and ask questions about them", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the warehouse platform API
    #[arg(short, long, global = true, env = "MEMEX_ENDPOINT")]
    endpoint: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true, env = "MEMEX_CONFIG")]
    config: Option<PathBuf>,

    /// Model identifier for completion calls
    #[arg(short, long, global = true, env = "MEMEX_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a new memory
    Remember(RememberCommand),

    /// Ask a one-shot question about your memories
    Ask(AskCommand),

    /// Interactive chat over your memories
    Chat(ChatCommand),

    /// Provision the backing table and search service
    Init(InitCommand),

    /// List stored memories
    List(ListCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment and config file
    let config = MemexConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.endpoint,
        cli.config,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("memex starting");
    tracing::debug!("Endpoint: {}", config.endpoint);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Remember(_) => "remember",
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Init(_) => "init",
        Commands::List(_) => "list",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Remember(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Init(cmd) => cmd.execute(&config).await,
        Commands::List(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
