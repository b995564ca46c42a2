// src/services/extract.rs

//! Product extraction from listing HTML.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{PageResult, ProductRecord, ProductSelectors, SelectorConfig};

/// Turns a listing page into product records using fixed selectors.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    selectors: ProductSelectors,
}

impl ProductExtractor {
    pub fn new(selectors: ProductSelectors) -> Self {
        Self { selectors }
    }

    /// Compile selectors from configuration.
    pub fn from_config(config: &SelectorConfig, load_more: Option<&str>) -> Result<Self> {
        Ok(Self::new(ProductSelectors::compile(config, load_more)?))
    }

    /// Extract every complete product from a page, in document order.
    pub fn extract(&self, html: &str) -> PageResult {
        let document = Html::parse_document(html);
        let mut page = PageResult::default();

        for container in document.select(&self.selectors.product) {
            page.containers += 1;
            match self.parse_product(&container) {
                Some(record) => page.records.push(record),
                None => {
                    page.incomplete += 1;
                    log::debug!("Skipping product without name or price");
                }
            }
        }

        page.has_more = match &self.selectors.load_more {
            Some(sel) => document.select(sel).next().is_some(),
            None => true,
        };

        page
    }

    fn parse_product(&self, container: &ElementRef) -> Option<ProductRecord> {
        let name = first_text(container, &self.selectors.name)?;
        let price = first_text(container, &self.selectors.price)?;
        Some(ProductRecord { name, price })
    }
}

/// Trimmed text of the first match, or None if absent or blank.
fn first_text(scope: &ElementRef, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    let raw: String = element.text().collect();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
