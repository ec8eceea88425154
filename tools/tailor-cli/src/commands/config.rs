//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("currency", ctx.config.cart.currency.code());
    ctx.output.kv(
        "max_quantity_per_line",
        &ctx.config.cart.max_quantity_per_line.to_string(),
    );
    ctx.output
        .kv("price_on_merge", ctx.config.cart.price_on_merge.as_str());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("json", &ctx.config.logging.json.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output
        .success(&format!("Wrote {}", path.display()));
    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    // Context::load already parsed and validated whatever it found.
    match &ctx.config_path {
        Some(path) => ctx
            .output
            .success(&format!("{} is valid", path.display())),
        None => ctx
            .output
            .warn("No tailor.toml found; using built-in defaults"),
    }
    Ok(())
}
