//! oxrates CLI - Open Exchange Rates source connector.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use oxrates_lib::ClientConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod message;

#[derive(Parser)]
#[command(name = "oxrates")]
#[command(about = "Sync historical daily exchange rates from Open Exchange Rates", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the API base URL
    #[arg(long, global = true, env = "OXRATES_BASE_URL", hide = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "60")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configuration schema
    Spec,

    /// Check credentials and remaining quota
    Check {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// List available streams and their schemas
    Discover {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Read daily rates, emitting records and state
    Read {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: PathBuf,

        /// Path to a JSON state file from a previous read
        #[arg(short, long)]
        state: Option<PathBuf>,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig {
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        };
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        config
    }
}

/// Install the stderr log subscriber; stdout carries protocol messages only.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "info,oxrates=debug,oxrates_fetch=debug,oxrates_source=debug",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Show help if no command provided
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let client_config = cli.client_config();

    match command {
        Commands::Spec => commands::spec::spec(),
        Commands::Check { config } => commands::check::check(config, client_config).await,
        Commands::Discover { config } => commands::discover::discover(config),
        Commands::Read { config, state } => {
            commands::read::read(config, state.as_deref(), client_config, cli.quiet).await
        }
    }
}
