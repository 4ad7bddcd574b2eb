//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{default_coupons, Coupon, ShippingPolicy};
use storefront_commerce::catalog::DEFAULT_PAGE_SIZE;
use storefront_commerce::Currency;

/// File names searched for when no config path is given.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Persisted state location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog source and listing sizes.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Shipping charge rule.
    #[serde(default)]
    pub shipping: ShippingPolicy,

    /// Coupon codes accepted at checkout.
    #[serde(default = "default_coupons")]
    pub coupons: Vec<Coupon>,

    /// Shop currency.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            catalog: CatalogConfig::default(),
            shipping: ShippingPolicy::default(),
            coupons: default_coupons(),
            currency: CurrencyConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Check values the loaders cannot.
    pub fn validate(&self) -> Result<()> {
        self.currency()?;
        if self.catalog.page_size == 0 {
            return Err(anyhow!("catalog.page_size must be at least 1"));
        }
        if self.shipping.flat_rate < 0 || self.shipping.free_threshold < 0 {
            return Err(anyhow!("shipping amounts cannot be negative"));
        }
        for coupon in &self.coupons {
            if coupon.code.trim().is_empty() {
                return Err(anyhow!("coupon codes cannot be blank"));
            }
        }
        Ok(())
    }

    /// The configured shop currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency.code)
            .ok_or_else(|| anyhow!("unsupported currency: {}", self.currency.code))
    }
}

/// Persisted state location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for the key-value files, relative to the working directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    ".storefront".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Generator seed; the same seed yields the same catalog.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Products per highlight section.
    #[serde(default = "default_highlight_limit")]
    pub highlight_limit: usize,

    /// Related products shown on a product page.
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    /// JSON file with `{products, categories}` used instead of the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_seed() -> u64 {
    42
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_highlight_limit() -> usize {
    8
}

fn default_related_limit() -> usize {
    4
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            page_size: default_page_size(),
            highlight_limit: default_highlight_limit(),
            related_limit: default_related_limit(),
            source: None,
        }
    }
}

/// Currency configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO code (BDT, USD, EUR, GBP, INR).
    #[serde(default = "default_currency_code")]
    pub code: String,
}

fn default_currency_code() -> String {
    Currency::default().code().to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency_code(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[store]
# Where the cart, wishlist, orders and product snapshot are kept.
data_dir = ".storefront"

[catalog]
# Same seed, same generated catalog.
seed = 42
page_size = 20
highlight_limit = 8
related_limit = 4
# Load products from a JSON file instead of generating them.
# source = "catalog.json"

[shipping]
# Subtotals above this ship free.
free_threshold = 2000
flat_rate = 100

[[coupons]]
code = "WELCOME10"
kind = "percent"
value = 10

[[coupons]]
code = "SAVE200"
kind = "fixed"
value = 200
minimum_subtotal = 1500

[[coupons]]
code = "MEGA25"
kind = "percent"
value = 25
minimum_subtotal = 10000

[currency]
code = "BDT"
"#
    .to_string()
}
