use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error};

use sakram_portal::config::PortalConfig;
use sakram_portal::seed::seed_demo_data;
use sakram_portal::server::PortalServer;
use sakram_portal::storage::create_storage;

/// Sakram portal - marketing site and governance demo dashboard
#[derive(Parser)]
#[command(name = "sakram-portal")]
#[command(about = "Serve the Sakram marketing and demo portal", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the portal (default command)
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write the demo dataset into the configured store
    Seed,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("Sakram portal started with verbosity level: {}", cli.verbose);

    let result = match cli.command {
        Some(Commands::Serve { port }) => run_serve(cli.config, port).await,
        Some(Commands::Seed) => run_seed(cli.config).await,
        None => run_serve(cli.config, None).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_serve(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = PortalConfig::load(config_path.as_deref()).await?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let storage = create_storage(&config.storage).await?;
    // A fresh memory store has nothing for the dashboard to show
    if config.storage.backend == sakram_portal::storage::BackendKind::Memory {
        seed_demo_data(storage.as_ref()).await?;
    }

    PortalServer::new(config, storage).start().await?;
    Ok(())
}

async fn run_seed(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = PortalConfig::load(config_path.as_deref()).await?;
    let storage = create_storage(&config.storage).await?;
    let events = seed_demo_data(storage.as_ref()).await?;
    println!("Seeded {} demo events", events.len());
    Ok(())
}
