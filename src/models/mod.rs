// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod product;
mod selectors;
mod state;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig, OutputFormat, PaginationConfig};
pub use product::{Field, PageResult, ProductKey, ProductRecord};
pub use selectors::{ProductSelectors, SelectorConfig, parse_selector};
pub use state::{CrawlReport, CrawlState, StopReason};
