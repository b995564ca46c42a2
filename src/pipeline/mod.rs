//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Crawl the listing and write the output feed
//! - `run_validate`: Check configuration and selectors without crawling
//! - `run_validate_file`: Strictly load a config file, then validate it

pub mod crawl;
pub mod validate;

pub use crawl::run_crawler;
pub use validate::{run_validate, run_validate_file};
