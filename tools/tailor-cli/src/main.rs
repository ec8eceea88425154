//! Tailor CLI - terminal storefront for the tailoring shop.
//!
//! Commands:
//! - `tailor catalog` - Browse the catalog
//! - `tailor show` - Product details and customization options
//! - `tailor shop` - Interactive shopping session with a cart
//! - `tailor track` - Track an order
//! - `tailor config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CatalogArgs, ConfigArgs, ShopArgs, ShowArgs, TrackArgs};

/// Tailor - browse, customize and order tailored clothing
#[derive(Parser)]
#[command(name = "tailor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(CatalogArgs),

    /// Show a product and its customization options
    Show(ShowArgs),

    /// Start a shopping session
    Shop(ShopArgs),

    /// Track an order by number
    Track(TrackArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    logging::init(&ctx.config.logging, cli.verbose);
    tracing::debug!(config = ?ctx.config_path, "Loaded configuration");

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Track(args) => commands::track::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
