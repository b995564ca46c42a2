//! Per-run crawl state and outcome.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{ProductKey, ProductRecord};

/// Mutable state owned by a single crawl loop.
#[derive(Debug)]
pub struct CrawlState {
    pub current_page_number: u32,
    seen_keys: HashSet<ProductKey>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self {
            current_page_number: 1,
            seen_keys: HashSet::new(),
        }
    }

    /// Record a product's key. Returns false if it was already seen.
    pub fn insert(&mut self, record: &ProductRecord) -> bool {
        self.seen_keys.insert(record.key())
    }

    pub fn advance(&mut self) -> u32 {
        self.current_page_number += 1;
        self.current_page_number
    }
}

impl Default for CrawlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a crawl ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page matched no product containers
    Exhausted,
    /// A page could not be fetched
    FetchFailed { url: String, message: String },
    /// The load-more link was missing from the last page
    NoLoadMore,
    /// The configured page cap was reached
    PageLimit,
}

impl StopReason {
    /// True for the normal end of pagination.
    pub fn is_clean(&self) -> bool {
        !matches!(self, StopReason::FetchFailed { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "no more products"),
            StopReason::FetchFailed { url, message } => {
                write!(f, "fetch failed for {url}: {message}")
            }
            StopReason::NoLoadMore => write!(f, "no load-more link"),
            StopReason::PageLimit => write!(f, "page limit reached"),
        }
    }
}

/// Summary of a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub pages_fetched: u32,
    pub products_found: usize,
    pub duplicates_skipped: usize,
    pub incomplete_skipped: usize,
    pub records_emitted: usize,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
