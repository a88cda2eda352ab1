use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use holiday_grid::UserId;
use holiday_grid::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "holiday-grid")]
#[command(about = "Holiday planning grid - select days, classify them, save them per employee")]
#[command(version)]
struct Cli {
    /// Path to the table snapshot (JSON)
    #[arg(short, long, global = true, default_value = "holidays.json")]
    table: PathBuf,

    /// Path to the config file (defaults to ~/.holiday-grid/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the endpoint base URL from the config
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the holiday grid window
    Gui,

    /// Save one employee's classified days
    Submit {
        /// Employee id as it appears in the table
        #[arg(short, long)]
        user: UserId,
    },

    /// Save every employee's classified days
    SubmitAll,

    /// Validate the table snapshot and summarize each employee
    Check,

    /// Serve a local stand-in for the save endpoint
    StubEndpoint {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Reject one user's posts: USER:MESSAGE (repeatable)
        #[arg(long = "reject", value_parser = cli::stub::parse_rejection)]
        rejections: Vec<(UserId, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint.base_url = endpoint;
    }

    match cli.command {
        Some(Commands::Submit { user }) => {
            cli::submit::submit_command(&cli.table, &config, user).await?;
        }
        Some(Commands::SubmitAll) => {
            cli::submit::submit_all_command(&cli.table, &config).await?;
        }
        Some(Commands::Check) => {
            cli::check::check_command(&cli.table)?;
        }
        Some(Commands::StubEndpoint { port, rejections }) => {
            cli::stub::stub_command(port, &config, rejections)?;
        }
        Some(Commands::Gui) | None => {
            cli::gui::gui_command(&cli.table, config)?;
        }
    }

    Ok(())
}
