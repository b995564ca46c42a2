// src/services/listing.rs

//! Listing crawler service.
//!
//! Walks a paginated product listing one page at a time, extracting
//! products with configured CSS selectors and emitting each distinct
//! (name, price) pair exactly once.

use std::time::Duration;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, CrawlReport, CrawlState, ProductRecord, StopReason};
use crate::services::ProductExtractor;
use crate::storage::ProductSink;
use crate::utils::{PageFetcher, PageRequest, page_url};

/// Sequential crawler over a paginated product listing.
pub struct ListingCrawler<F: PageFetcher> {
    fetcher: F,
    extractor: ProductExtractor,
    start_url: String,
    page_url_template: String,
    max_pages: Option<u32>,
    request_delay: Duration,
}

impl<F: PageFetcher> ListingCrawler<F> {
    /// Create a crawler starting at `start_url` with default pagination.
    pub fn new(fetcher: F, extractor: ProductExtractor, start_url: impl Into<String>) -> Self {
        let defaults = Config::default();
        Self {
            fetcher,
            extractor,
            start_url: start_url.into(),
            page_url_template: defaults.pagination.page_url_template,
            max_pages: None,
            request_delay: Duration::ZERO,
        }
    }

    /// Create a crawler from the full configuration.
    pub fn from_config(fetcher: F, config: &Config) -> Result<Self> {
        let extractor = ProductExtractor::from_config(
            &config.selectors,
            config.pagination.load_more_selector.as_deref(),
        )?;

        Ok(Self::new(fetcher, extractor, &config.crawler.start_url)
            .with_page_url_template(&config.pagination.page_url_template)
            .with_max_pages(config.pagination.max_pages)
            .with_request_delay(Duration::from_millis(config.crawler.request_delay_ms)))
    }

    pub fn with_page_url_template(mut self, template: impl Into<String>) -> Self {
        self.page_url_template = template.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// URL of a given page number.
    pub fn page_url(&self, page: u32) -> String {
        page_url(&self.start_url, &self.page_url_template, page)
    }

    /// Crawl until pagination runs out, writing new records to `sink`.
    ///
    /// A failed fetch ends the crawl without an error; the returned report
    /// says why the crawl stopped. Errors from the sink are propagated.
    pub async fn crawl(&self, sink: &mut dyn ProductSink) -> Result<CrawlReport> {
        let started_at = Utc::now();
        let mut state = CrawlState::new();

        let mut pages_fetched = 0;
        let mut products_found = 0;
        let mut duplicates_skipped = 0;
        let mut incomplete_skipped = 0;
        let mut records_emitted = 0;

        let stop_reason = loop {
            let page = state.current_page_number;
            let url = self.page_url(page);
            let request = PageRequest::for_page(&url, page);

            let body = match self.fetcher.fetch(&request).await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("Stopping at page {page}: failed to fetch {url}: {e}");
                    break StopReason::FetchFailed {
                        url,
                        message: e.to_string(),
                    };
                }
            };
            pages_fetched += 1;

            let result = self.extractor.extract(&body);
            if result.is_empty() {
                log::info!("No products on page {page}, pagination exhausted");
                break StopReason::Exhausted;
            }

            log::info!("Found {} products on page {}", result.containers, page);
            products_found += result.containers;
            incomplete_skipped += result.incomplete;

            for record in &result.records {
                if state.insert(record) {
                    sink.write(record)?;
                    records_emitted += 1;
                } else {
                    log::debug!("Skipping duplicate item: {}", record.name);
                    duplicates_skipped += 1;
                }
            }
            sink.flush()?;

            if !result.has_more {
                log::info!("No load-more link on page {page}, stopping");
                break StopReason::NoLoadMore;
            }
            if self.max_pages.is_some_and(|max| page >= max) {
                log::info!("Reached page limit of {page}");
                break StopReason::PageLimit;
            }

            let next = state.advance();
            log::info!("Moving to page {}: {}", next, self.page_url(next));

            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        };

        Ok(CrawlReport {
            pages_fetched,
            products_found,
            duplicates_skipped,
            incomplete_skipped,
            records_emitted,
            stop_reason,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Crawl into memory.
    pub async fn collect(&self) -> Result<(Vec<ProductRecord>, CrawlReport)> {
        let mut records: Vec<ProductRecord> = Vec::new();
        let report = self.crawl(&mut records).await?;
        Ok((records, report))
    }
}
