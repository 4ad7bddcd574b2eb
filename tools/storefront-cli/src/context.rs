//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::catalog::{generate_catalog, CatalogData, CatalogEngine};
use storefront_store::{Cache, Checkout, ProductStore, StorageManager};
use tracing::debug;

use crate::config::{StorefrontConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Skip confirmation prompts.
    pub yes: bool,
}

/// Persisted state plus the live catalog, opened per command.
pub struct Storefront {
    pub storage: StorageManager,
    pub engine: CatalogEngine<ProductStore>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        data_dir: Option<&str>,
        yes: bool,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (StorefrontConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        let mut ctx = Self::new(config, cwd, yes, output);
        ctx.config_path = config_path;
        if let Some(dir) = data_dir {
            ctx.config.store.data_dir = dir.to_string();
        }
        Ok(ctx)
    }

    pub fn new(config: StorefrontConfig, cwd: PathBuf, yes: bool, output: Output) -> Self {
        Self {
            config,
            config_path: None,
            output,
            cwd,
            yes,
        }
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, StorefrontConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(config_path.to_str()?) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get the persisted state directory.
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.store.data_dir)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the store and load the catalog.
    ///
    /// A persisted product snapshot takes precedence over the configured
    /// catalog source.
    pub fn open_storefront(&self) -> Result<Storefront> {
        let data_dir = self.data_dir();
        let cache = Cache::open(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
        let storage = StorageManager::new(cache);
        storage.initialize().context("Failed to initialize storage")?;

        let mut engine = CatalogEngine::new(storage.product_store());
        engine.initialize(self.load_catalog()?);
        debug!(
            data_dir = %data_dir.display(),
            products = engine.all_products().len(),
            "storefront opened"
        );

        Ok(Storefront { storage, engine })
    }

    fn load_catalog(&self) -> Result<CatalogData> {
        match &self.config.catalog.source {
            Some(source) => {
                let path = self.resolve_path(source);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse catalog: {}", path.display()))
            }
            None => Ok(generate_catalog(self.config.catalog.seed)),
        }
    }

    /// Pricing rules from the configuration.
    pub fn checkout(&self) -> Result<Checkout<'_>> {
        Ok(Checkout::new(
            self.config.shipping,
            &self.config.coupons,
            self.config.currency()?,
        ))
    }

    /// Ask before a destructive action; `--yes` answers for the user.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }
}
