// src/config/models.rs
use crate::identity::ProductHeader;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::Directive;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub product: ProductConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    #[serde(default = "default_product_name")]
    pub name: String,
    #[serde(default = "default_product_version")]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            name: default_product_name(),
            version: default_product_version(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_product_name() -> String {
    ProductHeader::crate_default().name().to_string()
}

fn default_product_version() -> String {
    ProductHeader::crate_default().version().to_string()
}

fn default_log_filter() -> String {
    "enterprise_probe=info".to_string()
}

impl LoggingConfig {
    /// Comma separated `EnvFilter` directives, layered over `RUST_LOG`.
    pub fn directives(&self) -> Result<Vec<Directive>> {
        self.filter
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| {
                d.parse::<Directive>()
                    .with_context(|| format!("Invalid log directive '{}'", d))
            })
            .collect()
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.product_header()?;
        self.logging.directives()?;
        Ok(())
    }

    pub fn product_header(&self) -> Result<ProductHeader> {
        ProductHeader::new(&self.product.name, &self.product.version)
            .context("Invalid product configuration")
    }
}
