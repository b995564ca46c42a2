// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Accept header sent with pagination requests.
const AJAX_ACCEPT: &str = "text/html, */*; q=0.01";

/// A single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,

    /// Send the headers WooCommerce expects for AJAX pagination
    pub ajax: bool,
}

impl PageRequest {
    /// Request for a page number; every page after the first is AJAX.
    pub fn for_page(url: impl Into<String>, page: u32) -> Self {
        Self {
            url: url.into(),
            ajax: page > 1,
        }
    }

    /// Extra headers for this request.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.ajax {
            headers.insert(
                HeaderName::from_static("x-requested-with"),
                HeaderValue::from_static("XMLHttpRequest"),
            );
            headers.insert(ACCEPT, HeaderValue::from_static(AJAX_ACCEPT));
        }
        headers
    }
}

/// Source of listing page bodies.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body. Any error ends the crawl.
    async fn fetch(&self, request: &PageRequest) -> Result<String>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetcher backed by a reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a fetcher with a fresh client from configuration.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String> {
        let response = self
            .client
            .get(&request.url)
            .headers(request.headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
