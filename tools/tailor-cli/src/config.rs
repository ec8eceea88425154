//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tailor_commerce::cart::CartConfig;

/// Log levels accepted in `[logging] level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// `tailor.toml` contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TailorConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TailorConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.cart.max_quantity_per_line < 1 {
            bail!(
                "cart.max_quantity_per_line must be at least 1, got {}",
                self.cart.max_quantity_per_line
            );
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            bail!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            );
        }

        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON log lines.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Generate a default tailor.toml config file.
pub fn generate_default_config() -> String {
    r#"# Tailor storefront configuration

[cart]
# Currency every price is quoted in: USD, EUR, GBP, CAD, NGN, GHS, KES, ZAR
currency = "USD"
# Largest quantity a single cart line may hold
max_quantity_per_line = 9999
# When the same configuration is added at a new price:
#   keep_original - only the quantity changes
#   take_latest   - the line is repriced
price_on_merge = "keep_original"

[logging]
# trace | debug | info | warn | error | off (RUST_LOG overrides)
level = "warn"
json = false
"#
    .to_string()
}
