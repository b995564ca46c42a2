// src/models/selectors.rs

//! CSS selectors for scraping a product listing.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Selector strings as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Selector for each product container on the listing page
    #[serde(default = "default_product")]
    pub product: String,

    /// Selector for the name element within a container
    #[serde(default = "default_name")]
    pub name: String,

    /// Selector for the price element within a container
    #[serde(default = "default_price")]
    pub price: String,
}

fn default_product() -> String {
    "div.wd-product".to_string()
}

fn default_name() -> String {
    "h3.wd-entities-title a".to_string()
}

fn default_price() -> String {
    "span.woocommerce-Price-amount bdi".to_string()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            name: default_name(),
            price: default_price(),
        }
    }
}

/// Compiled selectors, parsed once per crawl.
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    pub product: Selector,
    pub name: Selector,
    pub price: Selector,
    pub load_more: Option<Selector>,
}

impl ProductSelectors {
    /// Parse every configured selector, failing on the first invalid one.
    pub fn compile(config: &SelectorConfig, load_more: Option<&str>) -> Result<Self> {
        Ok(Self {
            product: parse_selector(&config.product)?,
            name: parse_selector(&config.name)?,
            price: parse_selector(&config.price)?,
            load_more: load_more.map(parse_selector).transpose()?,
        })
    }
}

/// Parse a CSS selector into the crate error type.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
