//! cumulus CLI
//!
//! Dynamic inventory for automation tooling: reads servers from the cloud
//! API, filters and projects them per the configuration file, and prints
//! the resulting inventory as JSON on stdout. All logging goes to stderr
//! so stdout stays machine-readable.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::debug;

use cumulus_client::HttpCloudClient;
use cumulus_core::{InventoryAssembler, InventoryConfig};

mod eval;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cumulus")]
#[command(about = "Cloud server inventory for automation tooling", long_about = None)]
struct Cli {
    /// Path to the inventory configuration file
    #[arg(short, long, global = true, default_value = "cumulus.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full inventory
    List,
    /// Print one host's variables
    Host {
        /// Hostname to look up
        hostname: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    let config = load_config(&cli.config)?;
    debug!(config = %cli.config.display(), "configuration loaded");

    let client = HttpCloudClient::new(config.auth.resolve())?;
    let evaluator = eval::TemplateEvaluator::new();

    let inventory = InventoryAssembler::new(&client, &config, &evaluator)
        .run()
        .await?;

    match cli.command {
        Commands::List => println!("{}", output::render_inventory(&inventory)?),
        Commands::Host { hostname } => {
            println!("{}", output::render_host(&inventory, &hostname)?);
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<InventoryConfig> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading configuration file {}", path.display()))?;
    let config: InventoryConfig =
        toml::from_str(&content).wrap_err("parsing configuration file")?;
    config.validate()?;
    Ok(config)
}
