//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod url;

pub use self::http::{HttpFetcher, PageFetcher, PageRequest};
pub use self::url::page_url;
