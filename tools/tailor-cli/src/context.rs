//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tailor_commerce::cart::CartStore;
use tailor_commerce::catalog::StaticCatalog;
use tailor_commerce::tracking::OrderTracker;

use crate::config::TailorConfig;
use crate::output::Output;

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["tailor.toml", ".tailor.toml", "tailor.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: TailorConfig,
    /// Where the config came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Product catalog.
    pub catalog: StaticCatalog,
    /// Order table.
    pub tracker: OrderTracker,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (TailorConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (TailorConfig::load(&path)?, Some(path)),
                None => (TailorConfig::default(), None),
            },
        };
        config.validate()?;

        Ok(Self {
            catalog: StaticCatalog::tailoring(config.cart.currency),
            tracker: OrderTracker::sample(),
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// A fresh cart for one shopping session.
    pub fn new_cart(&self) -> CartStore {
        CartStore::with_config(self.config.cart)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("tailor.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, root.path().join("tailor.toml"));
    }

    #[test]
    fn test_nearest_config_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("tailor.toml"), "").unwrap();
        std::fs::write(nested.join(".tailor.toml"), "").unwrap();

        assert_eq!(find_config(&nested).unwrap(), nested.join(".tailor.toml"));
    }
}
