//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Product extraction from listing HTML (`ProductExtractor`)
//! - The paginated crawl loop (`ListingCrawler`)

mod extract;
mod listing;

pub use extract::ProductExtractor;
pub use listing::ListingCrawler;
