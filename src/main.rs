//! AI Prompter - prompt refinement relay and client
//!
//! Main entry point for the relay server and the command-line client.

mod cmd_client;
mod cmd_serve;
mod presentation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// AI Prompter CLI.
#[derive(Parser)]
#[command(name = "prompter")]
#[command(author, version, about = "Turn rough ideas into refined AI prompts", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/prompter.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server in foreground
    Serve {
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Refine an idea through the relay
    Generate {
        /// The rough idea
        input: String,

        /// Skip the startup status probe
        #[arg(long)]
        no_probe: bool,
    },

    /// Check which relay host is reachable
    Status,

    /// Manage generation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved generations, newest first
    List {
        /// Print full outputs instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Delete the entry at INDEX (as shown by `history list`)
    Delete { index: usize },
}

/// Get the prompter home directory (~/.prompter).
pub(crate) fn prompter_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".prompter")
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.prompter/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = prompter_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("prompter")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes buffered lines on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => cmd_serve::run_server(&cli.config, host, port).await,
        Commands::Generate { input, no_probe } => {
            cmd_client::generate(&cli.config, &input, !no_probe).await
        }
        Commands::Status => cmd_client::status(&cli.config).await,
        Commands::History { action } => match action {
            HistoryAction::List { full } => cmd_client::history_list(&cli.config, full).await,
            HistoryAction::Delete { index } => {
                cmd_client::history_delete(&cli.config, index).await
            }
        },
    }
}
