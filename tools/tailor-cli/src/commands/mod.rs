//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod shop;
pub mod show;
pub mod track;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only list one category (suits, shirts, pants, african).
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID (e.g. suit-navy).
    pub product: String,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Read session commands from a file instead of stdin.
    #[arg(short, long)]
    pub script: Option<String>,

    /// Skip the checkout confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the track command.
#[derive(Args)]
pub struct TrackArgs {
    /// Order number, e.g. MT2024001.
    #[arg(default_value = "")]
    pub order: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default tailor.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
