//! Swarmlet CLI — the main entry point.
//!
//! Commands:
//! - `agent`     — One-shot single-agent invocation
//! - `network`   — Run the demo developer network until it reports completion
//! - `providers` — Show configured model backends

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "swarmlet",
    about = "Swarmlet — minimal multi-agent orchestration for LLM agents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a single developer agent with one message
    Agent {
        /// The message to send
        #[arg(short, long)]
        message: String,
    },

    /// Run the developer network on a task until it reports TASK COMPLETE
    Network {
        /// The task description
        #[arg(short, long)]
        task: String,

        /// Override the iteration budget
        #[arg(long)]
        max_iter: Option<usize>,
    },

    /// Show configured model backends
    Providers,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Agent { message } => commands::agent::run(&message).await?,
        Commands::Network { task, max_iter } => commands::network::run(&task, max_iter).await?,
        Commands::Providers => commands::providers::run()?,
    }

    Ok(())
}
