//! `eandash` — command-line front end for the EAN catalog importer.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod credentials;
mod gateways;
mod import;
mod lookup;
mod products;

#[derive(Parser)]
#[command(name = "eandash", version, about = "EAN catalog import and management")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import EAN codes in bulk and enrich them from the seller API
    Import(import::ImportArgs),
    /// Look up a single EAN code without writing anything
    Lookup(lookup::LookupArgs),
    /// Inspect and manage catalog products
    Products {
        #[command(subcommand)]
        command: products::ProductCommand,
    },
    /// Manage stored seller API credentials
    Credentials {
        #[command(subcommand)]
        command: credentials::CredentialCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = eandash_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Import(args) => import::run(&config, args).await,
        Command::Lookup(args) => lookup::run(&config, args).await,
        Command::Products { command } => products::run(&config, command).await,
        Command::Credentials { command } => credentials::run(&config, command).await,
    }
}
